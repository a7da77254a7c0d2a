//! Board replay of parsed moves, used to attach real positions to highlights.

use std::collections::HashMap;

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Color, EnPassantMode, Position};
use tracing::debug;

use crate::game_data::{AnnotatedMove, Side};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN after each ply that could be replayed from the standard start.
#[derive(Debug, Clone, Default)]
pub struct PositionLog {
    fens: HashMap<(u32, Side), String>,
}

impl PositionLog {
    /// Replay until the first ply that does not parse, is illegal, or is
    /// attributed to the side not on move.
    pub fn replay(moves: &[AnnotatedMove]) -> Self {
        let mut fens = HashMap::new();
        let mut pos = Chess::default();

        'game: for entry in moves {
            for (side, mv) in entry.plies() {
                let to_move = match side {
                    Side::White => Color::White,
                    Side::Black => Color::Black,
                };
                if pos.turn() != to_move {
                    debug!(
                        move_number = entry.move_number,
                        san = %mv.san,
                        "Replay stopped at out-of-turn move"
                    );
                    break 'game;
                }

                let san: SanPlus = match mv.san.parse() {
                    Ok(s) => s,
                    Err(_) => break 'game,
                };

                let legal = match san.san.to_move(&pos) {
                    Ok(m) => m,
                    Err(_) => {
                        debug!(
                            move_number = entry.move_number,
                            san = %mv.san,
                            "Replay stopped at illegal move"
                        );
                        break 'game;
                    }
                };

                pos.play_unchecked(legal);
                let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
                fens.insert((entry.move_number, side), fen);
            }
        }

        Self { fens }
    }

    /// Position after the given ply, or the starting position placeholder.
    pub fn after(&self, move_number: u32, side: Side) -> &str {
        self.fens
            .get(&(move_number, side))
            .map(String::as_str)
            .unwrap_or(STARTING_FEN)
    }

    pub fn len(&self) -> usize {
        self.fens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movetext::parse_movetext;
    use crate::options::Strictness;
    use crate::tokenizer::tokenize;

    fn replay(movetext: &str) -> PositionLog {
        let parsed = parse_movetext(&tokenize(movetext), Strictness::Lenient).unwrap();
        PositionLog::replay(&parsed.moves)
    }

    #[test]
    fn test_replay_records_each_ply() {
        let log = replay("1. e4 e5 2. Nf3");
        assert_eq!(log.len(), 3);
        assert_eq!(
            log.after(1, Side::White),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        assert_eq!(
            log.after(2, Side::White),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
        );
    }

    #[test]
    fn test_illegal_move_stops_replay() {
        let log = replay("1. e4 e5 2. Ke3 Nc6");
        assert_eq!(log.len(), 2);
        assert_eq!(log.after(2, Side::White), STARTING_FEN);
        assert_eq!(log.after(2, Side::Black), STARTING_FEN);
    }

    #[test]
    fn test_skipped_ply_stops_replay_for_the_other_side() {
        // Nz9 is dropped, so Nf6 is parsed as White's second move
        let log = replay("1. e4 Nz9 2. Nf6");
        assert_eq!(log.len(), 1);
        assert_eq!(log.after(2, Side::White), STARTING_FEN);
    }

    #[test]
    fn test_black_only_start_cannot_replay() {
        let log = replay("5... Nf6 6. e4");
        assert!(log.is_empty());
    }
}
