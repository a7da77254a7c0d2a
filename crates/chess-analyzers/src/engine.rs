//! The analysis pipeline: text in, `GameRecord` out.
//!
//! Validation → metadata + moves → opening + highlights → evaluation →
//! narrative. A validation failure ends the pipeline early with an error
//! record; nothing is ever returned as `Err` or allowed to panic through.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chess_core::game_data::GameRecord;
use chess_core::movetext::{parse_movetext, TokenOutcome};
use chess_core::replay::PositionLog;
use chess_core::{pgn, tokenizer, AnalysisOptions, PgnError};
use tracing::{debug, warn};

use crate::analyzer_trait::HighlightAnalyzer;
use crate::opening::OpeningClassifier;
use crate::{evaluation, narrative, unified};

/// Record plus per-token parse diagnostics.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub record: GameRecord,
    pub diagnostics: Vec<TokenOutcome>,
}

/// Stateless analysis engine. Lookup tables are built in `new` and never
/// change, so one engine can be shared across threads.
pub struct AnalysisEngine {
    options: AnalysisOptions,
    openings: OpeningClassifier,
    analyzers: Vec<Box<dyn HighlightAnalyzer>>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

impl AnalysisEngine {
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            options,
            openings: OpeningClassifier::new(),
            analyzers: unified::create_all_analyzers(),
        }
    }

    /// Analyze one game. Always returns a record.
    pub fn analyze(&self, text: &str) -> GameRecord {
        self.analyze_detailed(text).record
    }

    /// Like [`analyze`](Self::analyze), also returning what happened to each
    /// movetext token. Error records carry no diagnostics.
    pub fn analyze_detailed(&self, text: &str) -> Analysis {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.run(text)))
            .unwrap_or_else(|payload| Err(PgnError::Internal(panic_message(payload))));

        match outcome {
            Ok(analysis) => analysis,
            Err(err) => {
                warn!(error = %err, "PGN analysis failed");
                Analysis {
                    record: GameRecord::failed(err.title(), err.to_string()),
                    diagnostics: Vec::new(),
                }
            }
        }
    }

    fn run(&self, text: &str) -> Result<Analysis, PgnError> {
        let scanned = tokenizer::scan(text)?;
        let metadata = pgn::extract_metadata(&scanned.header_lines);
        let parsed = parse_movetext(&scanned.tokens, self.options.strictness)?;

        let opening = self.openings.classify(&parsed.moves);

        let positions = if self.options.replay_positions {
            PositionLog::replay(&parsed.moves)
        } else {
            PositionLog::default()
        };
        let highlights = unified::collect_highlights(&self.analyzers, &parsed.moves, &positions);

        let evaluation = evaluation::evaluate_game(&parsed.moves, &highlights);

        let title = narrative::title(&evaluation, &opening);
        let summary = narrative::summary(&metadata, &opening, &highlights, &evaluation);

        debug!(
            moves = parsed.moves.len(),
            opening = %opening.name,
            highlights = highlights.len(),
            result = evaluation.final_result.as_str(),
            "Game analyzed"
        );

        Ok(Analysis {
            record: GameRecord {
                title,
                summary,
                metadata,
                moves: parsed.moves,
                opening,
                tactical_highlights: highlights,
                evaluation,
                error: false,
                error_reason: None,
            },
            diagnostics: parsed.diagnostics,
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Analyze with default options.
pub fn analyze(text: &str) -> GameRecord {
    AnalysisEngine::default().analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::game_data::{GameEvaluation, GameQuality, GameResult, HighlightKind};

    const IMMORTAL_START: &str = r#"[Event "London"]
[White "Adolf Anderssen"]
[Black "Lionel Kieseritzky"]
[Result "1-0"]

1. e4 e5 2. f4 exf4 3. Bc4 Qh4+ 4. Kf1 b5?! 5. Bxb5 Nf6 6. Nf3 Qh6 7. d3 Nh5
8. Nh4 Qg5 9. Nf5 c6 10. g4 Nf6 11. Rg1! cxb5 12. h4 Qg6 13. h5 Qg5 14. Qf3 Ng8
15. Bxf4 Qf6 16. Nc3 Bc5 17. Nd5 Qxb2 18. Bd6!! Bxg1 19. e5 Qxa1+ 20. Ke2 Na6
21. Nxg7+ Kd8 22. Qf6+!! Nxf6 23. Be7# 1-0"#;

    #[test]
    fn test_immortal_game() {
        let record = analyze(IMMORTAL_START);
        assert!(!record.error);
        assert_eq!(record.moves.len(), 23);
        assert_eq!(record.opening.name, "King's Gambit");
        assert_eq!(record.evaluation.final_result, GameResult::WhiteWins);
        assert_eq!(record.metadata.white.as_deref(), Some("Adolf Anderssen"));

        let brilliant: Vec<u32> = record
            .tactical_highlights
            .iter()
            .filter(|h| h.kind == HighlightKind::Brilliant)
            .map(|h| h.move_number)
            .collect();
        assert_eq!(brilliant, vec![18, 22]);
        assert_eq!(record.evaluation.game_quality, GameQuality::Good);
        assert!(record.title.starts_with("White Strikes Decisively"));
        assert!(record.summary.starts_with("Adolf Anderssen faced Lionel Kieseritzky"));
    }

    #[test]
    fn test_error_records() {
        let record = analyze("");
        assert!(record.error);
        assert_eq!(record.error_reason.as_deref(), Some("Empty PGN string"));
        assert_eq!(record.title, "Invalid PGN");
        assert!(record.moves.is_empty());

        let record = analyze("[Event \"X\"]\n\n");
        assert_eq!(record.error_reason.as_deref(), Some("No moves found in PGN"));
        assert_eq!(record.evaluation, GameEvaluation::default());
    }

    #[test]
    fn test_strict_mode_rejects_malformed_tokens() {
        let lenient = AnalysisEngine::default().analyze_detailed("1. e4 e5 2. Nz9 Nc6");
        assert!(!lenient.record.error);
        assert_eq!(lenient.record.moves.len(), 2);
        assert!(lenient
            .diagnostics
            .iter()
            .any(|o| matches!(o, TokenOutcome::Malformed { token, .. } if token == "Nz9")));

        let strict = AnalysisEngine::new(AnalysisOptions::default().strict(true))
            .analyze("1. e4 e5 2. Nz9 Nc6");
        assert!(strict.error);
        assert!(strict.moves.is_empty());
        assert_eq!(
            strict.error_reason.as_deref(),
            Some("Malformed move token 'Nz9': no destination square")
        );
    }

    #[test]
    fn test_panic_message_extraction() {
        assert_eq!(panic_message(Box::new("boom")), "boom");
        assert_eq!(panic_message(Box::new("bang".to_string())), "bang");
        assert_eq!(panic_message(Box::new(7u8)), "unknown panic");
    }
}
