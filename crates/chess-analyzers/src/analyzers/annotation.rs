//! Highlights driven by move-quality glyphs.

use crate::analyzer_trait::{HighlightAnalyzer, MoveContext};
use chess_core::game_data::{Annotation, HighlightKind, TacticalHighlight};

/// Ordered glyph rules: (glyph, highlight type, score, description prefix).
/// First match wins. A single `?` is scored as a blunder, not a milder
/// category.
pub const ANNOTATION_RULES: &[(Annotation, HighlightKind, i32, &str)] = &[
    (Annotation::Brilliant, HighlightKind::Brilliant, 200, "Brilliant"),
    (Annotation::Good, HighlightKind::Tactical, 100, "Strong tactical move"),
    (Annotation::Blunder, HighlightKind::Blunder, -200, "Blunder"),
    (Annotation::Mistake, HighlightKind::Blunder, -100, "Mistake"),
];

fn rule_for(annotation: Annotation) -> Option<&'static (Annotation, HighlightKind, i32, &'static str)> {
    ANNOTATION_RULES.iter().find(|(glyph, ..)| *glyph == annotation)
}

/// Score of a glyph; 0 for no glyph or an unscored one (`!?`, `?!`).
pub fn annotation_score(annotation: Option<Annotation>) -> i32 {
    annotation
        .and_then(rule_for)
        .map(|(_, _, score, _)| *score)
        .unwrap_or(0)
}

/// Emits a highlight for every move carrying a scored glyph.
pub struct AnnotationAnalyzer;

impl HighlightAnalyzer for AnnotationAnalyzer {
    fn name(&self) -> &'static str {
        "annotation"
    }

    fn process_move(&self, ctx: &MoveContext) -> Option<TacticalHighlight> {
        let (_, kind, score, label) = rule_for(ctx.mv.annotation?)?;

        Some(TacticalHighlight {
            move_number: ctx.move_number,
            kind: *kind,
            description: format!(
                "{label} {}{} by {}",
                ctx.mv.san,
                ctx.mv.annotation.map_or("", |a| a.glyph()),
                ctx.side.name()
            ),
            evaluation: *score,
            position: ctx.position.to_string(),
        })
    }
}
