//! CLI configuration from arguments and environment variables.

use std::path::PathBuf;

use chess_core::AnalysisOptions;
use clap::Parser;

/// Analyze PGN games and print one JSON record per game.
#[derive(Parser, Debug, Clone)]
#[command(name = "analysis-cli")]
#[command(about = "Turns chess game transcripts into structured analysis records")]
#[command(version)]
pub struct Args {
    /// PGN files or glob patterns. Reads stdin when empty.
    pub inputs: Vec<String>,

    /// Fail a game on the first malformed move token
    #[arg(long, env = "PGN_STRICT")]
    pub strict: bool,

    /// Pretty-print each record
    #[arg(long, env = "PGN_PRETTY")]
    pub pretty: bool,

    /// Maximum games analyzed at once (defaults to the CPU count)
    #[arg(short, long, env = "PGN_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Skip board replay; highlights carry the starting position
    #[arg(long, env = "PGN_NO_POSITIONS")]
    pub no_positions: bool,
}

impl Args {
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions::default()
            .strict(self.strict)
            .replay_positions(!self.no_positions)
    }

    pub fn worker_count(&self) -> usize {
        self.concurrency.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Expand glob patterns; plain paths pass through unchanged.
    pub fn input_paths(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for input in &self.inputs {
            let matches: Vec<PathBuf> = glob::glob(input)?.filter_map(|p| p.ok()).collect();
            if matches.is_empty() {
                paths.push(PathBuf::from(input));
            } else {
                paths.extend(matches);
            }
        }
        Ok(paths)
    }
}
