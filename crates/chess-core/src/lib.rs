//! Game-notation parsing: validation, tokenization, headers, moves.
//!
//! Each stage is a plain function over call-local data; nothing here keeps
//! state between games.

pub mod error;
pub mod game_data;
pub mod movetext;
pub mod options;
pub mod pgn;
pub mod replay;
pub mod san;
pub mod tokenizer;

pub use error::PgnError;
pub use options::{AnalysisOptions, Strictness};
