//! PGN header extraction: a lightweight regex-based parser.

use std::sync::LazyLock;

use regex::Regex;

use crate::game_data::GameMetadata;

static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\[(\w+)\s+"((?:[^"\\]|\\.)*)"\]$"#).unwrap());

/// Build metadata from `[Key "Value"]` lines. Unknown keys and lines that
/// are not well-formed headers are ignored.
pub fn extract_metadata(header_lines: &[&str]) -> GameMetadata {
    let mut metadata = GameMetadata::default();

    for line in header_lines {
        let Some((key, value)) = parse_header_line(line) else {
            continue;
        };
        match key {
            "Event" => metadata.event = Some(value),
            "Site" => metadata.site = Some(value),
            "Date" => metadata.date = Some(value),
            "Round" => metadata.round = Some(value),
            "White" => metadata.white = Some(value),
            "Black" => metadata.black = Some(value),
            "Result" => metadata.result = Some(value),
            "WhiteElo" => metadata.white_elo = value.trim().parse().ok(),
            "BlackElo" => metadata.black_elo = value.trim().parse().ok(),
            "TimeControl" => metadata.time_control = Some(value),
            "ECO" => metadata.eco = Some(value),
            _ => {}
        }
    }

    metadata
}

/// Split one header line into key and unescaped value.
pub fn parse_header_line(line: &str) -> Option<(&str, String)> {
    let caps = HEADER_RE.captures(line.trim())?;
    let key = caps.get(1)?.as_str();
    let value = unescape(caps.get(2)?.as_str());
    Some((key, value))
}

/// Extract a header value from a full PGN text (e.g. `Event`).
pub fn extract_header(pgn: &str, header_name: &str) -> Option<String> {
    pgn.lines()
        .filter_map(parse_header_line)
        .find(|(key, _)| *key == header_name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
