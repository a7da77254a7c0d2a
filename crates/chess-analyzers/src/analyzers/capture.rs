//! Capture highlights.

use crate::analyzer_trait::{HighlightAnalyzer, MoveContext};
use crate::analyzers::annotation::annotation_score;
use chess_core::game_data::{HighlightKind, TacticalHighlight};

/// Flags every capture as a tactical moment, whether or not it is annotated.
pub struct CaptureAnalyzer;

impl HighlightAnalyzer for CaptureAnalyzer {
    fn name(&self) -> &'static str {
        "capture"
    }

    fn process_move(&self, ctx: &MoveContext) -> Option<TacticalHighlight> {
        if !ctx.mv.is_capture {
            return None;
        }

        Some(TacticalHighlight {
            move_number: ctx.move_number,
            kind: HighlightKind::Tactical,
            description: format!("Tactical capture {} by {}", ctx.mv.san, ctx.side.name()),
            evaluation: annotation_score(ctx.mv.annotation),
            position: ctx.position.to_string(),
        })
    }
}
