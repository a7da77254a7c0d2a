//! Base trait and types for highlight analyzers.

use chess_core::game_data::{Move, Side, TacticalHighlight};

/// Context available to analyzers at each ply.
pub struct MoveContext<'a> {
    pub mv: &'a Move,
    pub move_number: u32,
    pub side: Side,
    /// FEN after the ply, or the starting-position placeholder.
    pub position: &'a str,
}

/// Trait that all highlight analyzers implement. Analyzers hold no per-game
/// state, so one instance can serve concurrent analyses.
pub trait HighlightAnalyzer: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Inspect a single ply and emit at most one highlight for it.
    fn process_move(&self, ctx: &MoveContext) -> Option<TacticalHighlight>;
}
