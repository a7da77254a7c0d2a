//! Game notation analysis CLI
//!
//! Reads PGN files (or stdin), analyzes every game and prints one JSON
//! record per game to stdout in input order.

mod batch;
mod config;

use std::io::{self, Read, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use chess_analyzers::AnalysisEngine;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pure JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let engine = Arc::new(AnalysisEngine::new(args.analysis_options()));
    let workers = args.worker_count();

    let mut games = Vec::new();
    let paths = args.input_paths()?;
    if paths.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        games.extend(batch::split_games(&text));
    } else {
        for path in &paths {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let file_games = batch::split_games(&text);
            info!(path = %path.display(), games = file_games.len(), "Loaded PGN file");
            games.extend(file_games);
        }
    }

    info!(games = games.len(), workers, strict = args.strict, "Analyzing games");
    let records = batch::analyze_all(engine, games, workers).await?;

    let failed = records.iter().filter(|r| r.error).count();
    let mut out = io::stdout().lock();
    for record in &records {
        let json = if args.pretty {
            record.to_json_pretty()?
        } else {
            record.to_json()?
        };
        writeln!(out, "{json}")?;
    }
    out.flush()?;

    info!(total = records.len(), failed, "Analysis complete");
    Ok(())
}
