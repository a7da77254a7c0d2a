//! Runs every highlight analyzer over the game in a single pass.

use chess_core::game_data::{AnnotatedMove, TacticalHighlight};
use chess_core::replay::PositionLog;
use tracing::debug;

use crate::analyzer_trait::{HighlightAnalyzer, MoveContext};
use crate::analyzers;

/// Analyzers in emission order: the glyph highlight of a ply always precedes
/// its capture highlight.
pub fn create_all_analyzers() -> Vec<Box<dyn HighlightAnalyzer>> {
    vec![
        Box::new(analyzers::annotation::AnnotationAnalyzer),
        Box::new(analyzers::capture::CaptureAnalyzer),
    ]
}

/// Walk moves in order (white ply, then black ply) and collect highlights.
pub fn collect_highlights(
    analyzers: &[Box<dyn HighlightAnalyzer>],
    moves: &[AnnotatedMove],
    positions: &PositionLog,
) -> Vec<TacticalHighlight> {
    let mut highlights = Vec::new();

    for entry in moves {
        for (side, mv) in entry.plies() {
            let ctx = MoveContext {
                mv,
                move_number: entry.move_number,
                side,
                position: positions.after(entry.move_number, side),
            };
            for analyzer in analyzers {
                if let Some(highlight) = analyzer.process_move(&ctx) {
                    debug!(
                        analyzer = analyzer.name(),
                        move_number = entry.move_number,
                        san = %mv.san,
                        "Highlight"
                    );
                    highlights.push(highlight);
                }
            }
        }
    }

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::game_data::HighlightKind;
    use chess_core::movetext::parse_movetext;
    use chess_core::replay::STARTING_FEN;
    use chess_core::tokenizer::tokenize;
    use chess_core::Strictness;

    fn highlights(movetext: &str, replay: bool) -> Vec<TacticalHighlight> {
        let parsed = parse_movetext(&tokenize(movetext), Strictness::Lenient).unwrap();
        let positions = if replay {
            PositionLog::replay(&parsed.moves)
        } else {
            PositionLog::default()
        };
        collect_highlights(&create_all_analyzers(), &parsed.moves, &positions)
    }

    #[test]
    fn test_annotated_capture_emits_two_highlights() {
        let found = highlights("1. e4 d5 2. exd5!! Qxd5", false);
        let kinds: Vec<(u32, HighlightKind, i32)> = found
            .iter()
            .map(|h| (h.move_number, h.kind, h.evaluation))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (2, HighlightKind::Brilliant, 200),
                (2, HighlightKind::Tactical, 200),
                (2, HighlightKind::Tactical, 0),
            ]
        );
    }

    #[test]
    fn test_positions_come_from_replay() {
        let found = highlights("1. e4 d5 2. exd5", true);
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].position,
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2"
        );

        let found = highlights("1. e4 d5 2. exd5", false);
        assert_eq!(found[0].position, STARTING_FEN);
    }

    #[test]
    fn test_quiet_game_has_no_highlights() {
        assert!(highlights("1. d4 d5 2. c4 e6 3. Nc3 Nf6", true).is_empty());
    }
}
