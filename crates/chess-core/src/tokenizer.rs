//! Gross structure checks and movetext tokenization.
//!
//! Splits the raw text into header lines and movetext, then breaks the
//! movetext into atomic tokens. Brace comments and parenthesized variations
//! are kept whole regardless of the whitespace inside them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::PgnError;
use crate::game_data::Annotation;

pub const RESULT_TOKENS: &[&str] = &["1-0", "0-1", "1/2-1/2", "*"];

static MOVE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(\.+)(.*)$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `12.` or, with `continuation`, `12...`
    MoveNumber { number: u32, continuation: bool },
    /// Anything that starts like a SAN move. Not yet validated.
    San(String),
    Glyph(Annotation),
    /// Comment body without braces.
    Comment(String),
    /// Whole variation including the outer parentheses.
    Variation(String),
    /// A result marker that was not at the very end of the movetext.
    Result(String),
    Other(String),
}

/// Output of the validation stage.
#[derive(Debug, Clone)]
pub struct ScannedPgn<'a> {
    pub header_lines: Vec<&'a str>,
    pub tokens: Vec<Token>,
}

/// Validate the gross structure of `text` and tokenize its movetext.
pub fn scan(text: &str) -> Result<ScannedPgn<'_>, PgnError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(PgnError::EmptyInput);
    }

    let (header_lines, movetext) = split_sections(text);
    let tokens = tokenize(strip_result(&movetext));

    if !tokens
        .iter()
        .any(|t| matches!(t, Token::MoveNumber { .. }))
    {
        return Err(PgnError::NoMovesFound);
    }

    debug!(
        headers = header_lines.len(),
        tokens = tokens.len(),
        "Tokenized movetext"
    );

    Ok(ScannedPgn {
        header_lines,
        tokens,
    })
}

/// Separate the leading `[Key "Value"]` block from the movetext. Once the
/// first movetext line is seen, every later line is movetext.
pub fn split_sections(text: &str) -> (Vec<&str>, String) {
    let mut headers = Vec::new();
    let mut movetext = String::new();
    let mut in_movetext = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_movetext {
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                headers.push(trimmed);
                continue;
            }
            in_movetext = true;
        }
        movetext.push_str(line);
        movetext.push('\n');
    }

    (headers, movetext)
}

/// Drop a game-result token at the very end of the movetext.
fn strip_result(movetext: &str) -> &str {
    let trimmed = movetext.trim_end();
    for result in RESULT_TOKENS {
        if let Some(rest) = trimmed.strip_suffix(result) {
            if rest.is_empty() || rest.ends_with(char::is_whitespace) {
                return rest;
            }
        }
    }
    trimmed
}

/// Split movetext into tokens.
pub fn tokenize(movetext: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut chars = movetext.chars();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                flush_word(&mut word, &mut tokens);
                let body: String = chars.by_ref().take_while(|&c| c != '}').collect();
                tokens.push(Token::Comment(body.trim().to_string()));
            }
            ';' => {
                flush_word(&mut word, &mut tokens);
                let body: String = chars.by_ref().take_while(|&c| c != '\n').collect();
                tokens.push(Token::Comment(body.trim().to_string()));
            }
            '(' => {
                flush_word(&mut word, &mut tokens);
                let mut raw = String::from("(");
                let mut depth = 1;
                let mut in_comment = false;
                for c in chars.by_ref() {
                    raw.push(c);
                    match c {
                        '{' => in_comment = true,
                        '}' => in_comment = false,
                        '(' if !in_comment => depth += 1,
                        ')' if !in_comment => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                }
                tokens.push(Token::Variation(raw));
            }
            c if c.is_whitespace() => flush_word(&mut word, &mut tokens),
            _ => word.push(c),
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if !word.is_empty() {
        classify_word(word, tokens);
        word.clear();
    }
}

fn classify_word(word: &str, tokens: &mut Vec<Token>) {
    if let Some(caps) = MOVE_NUMBER_RE.captures(word) {
        if let Ok(number) = caps[1].parse::<u32>() {
            tokens.push(Token::MoveNumber {
                number,
                continuation: caps[2].len() > 1,
            });
            // "1.e4" carries the move glued to the number
            let rest = caps.get(3).map_or("", |m| m.as_str());
            if !rest.is_empty() {
                classify_word(rest, tokens);
            }
            return;
        }
    }

    if let Some(annotation) = Annotation::from_glyph(word) {
        tokens.push(Token::Glyph(annotation));
        return;
    }

    if let Some(nag) = word.strip_prefix('$') {
        match nag.parse::<u8>().ok().and_then(Annotation::from_nag) {
            Some(annotation) => tokens.push(Token::Glyph(annotation)),
            None => tokens.push(Token::Other(word.to_string())),
        }
        return;
    }

    if RESULT_TOKENS.contains(&word) {
        tokens.push(Token::Result(word.to_string()));
    } else if is_san_shaped(word) {
        tokens.push(Token::San(word.to_string()));
    } else {
        tokens.push(Token::Other(word.to_string()));
    }
}

/// Starts with a piece letter, a file letter, or a castling prefix.
pub fn is_san_shaped(word: &str) -> bool {
    word.starts_with(|c: char| matches!(c, 'K' | 'Q' | 'R' | 'B' | 'N' | 'O' | 'a'..='h'))
        || word.starts_with("0-0")
}
