//! Per-engine analysis options.

/// How the move parser treats SAN-shaped tokens it cannot decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Record the token as malformed and keep going.
    #[default]
    Lenient,
    /// Fail the whole analysis on the first malformed token.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub strictness: Strictness,
    /// Replay moves on a board to attach real positions to highlights.
    pub replay_positions: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            strictness: Strictness::Lenient,
            replay_positions: true,
        }
    }
}

impl AnalysisOptions {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strictness = if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };
        self
    }

    pub fn replay_positions(mut self, enabled: bool) -> Self {
        self.replay_positions = enabled;
        self
    }
}
