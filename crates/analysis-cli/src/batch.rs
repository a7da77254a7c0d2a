//! Multi-game input splitting and concurrent analysis.

use std::sync::Arc;

use anyhow::Result;
use chess_analyzers::AnalysisEngine;
use chess_core::game_data::GameRecord;
use chess_core::movetext::TokenOutcome;
use chess_core::pgn::extract_header;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Split a file holding several games. A header line that follows movetext
/// starts a new game, unless it sits inside an open `{...}` comment.
pub fn split_games(text: &str) -> Vec<String> {
    let mut games = Vec::new();
    let mut current = String::new();
    let mut in_movetext = false;
    let mut in_comment = false;

    for line in text.lines() {
        let trimmed = line.trim();
        let is_header = !in_comment && trimmed.starts_with('[') && trimmed.ends_with(']');
        if is_header && in_movetext {
            games.push(std::mem::take(&mut current));
            in_movetext = false;
        } else if !trimmed.is_empty() && !is_header {
            in_movetext = true;
        }
        if !is_header {
            in_comment = track_comment(line, in_comment);
        }
        current.push_str(line);
        current.push('\n');
    }

    if !current.trim().is_empty() || games.is_empty() {
        games.push(current);
    }
    games
}

/// Whether a brace comment is still open at the end of `line`.
fn track_comment(line: &str, mut open: bool) -> bool {
    for c in line.chars() {
        match c {
            '{' if !open => open = true,
            '}' if open => open = false,
            ';' if !open => break,
            _ => {}
        }
    }
    open
}

/// Analyze every game on the blocking pool, at most `workers` at a time.
/// Records come back in input order.
pub async fn analyze_all(
    engine: Arc<AnalysisEngine>,
    games: Vec<String>,
    workers: usize,
) -> Result<Vec<GameRecord>> {
    let semaphore = Arc::new(Semaphore::new(workers));
    let mut handles = Vec::with_capacity(games.len());

    for (index, game) in games.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let engine = engine.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit; // Hold until done
            let label = extract_header(&game, "Event")
                .unwrap_or_else(|| format!("game {}", index + 1));
            let analysis = engine.analyze_detailed(&game);

            let malformed = analysis
                .diagnostics
                .iter()
                .filter(|o| matches!(o, TokenOutcome::Malformed { .. }))
                .count();
            if malformed > 0 {
                warn!(game = %label, malformed, "Game contains malformed move tokens");
            }
            debug!(game = %label, error = analysis.record.error, "Game finished");

            analysis.record
        }));
    }

    let mut records = Vec::with_capacity(handles.len());
    for handle in handles {
        records.push(handle.await?);
    }
    Ok(records)
}
