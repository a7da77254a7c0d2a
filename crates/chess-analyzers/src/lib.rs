//! Game analysis on top of parsed notation.
//!
//! Opening classification, tactical highlights, game evaluation and the
//! generated narrative. The main entry point is [`analyze`], or
//! [`AnalysisEngine`] when options are needed.

pub mod analyzer_trait;
pub mod analyzers;
pub mod engine;
pub mod evaluation;
pub mod narrative;
pub mod opening;
pub mod unified;

pub use engine::{analyze, Analysis, AnalysisEngine};
