//! Move parser: turns movetext tokens into numbered move entries.
//!
//! Every token that could carry a move is reported back as a
//! [`TokenOutcome`], so callers can see what was skipped or rejected
//! instead of losing it silently.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::PgnError;
use crate::game_data::{AnnotatedMove, Move, Side};
use crate::options::Strictness;
use crate::san::parse_san;
use crate::tokenizer::Token;

static COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[%(\w+)\s+([^\]]*)\]").unwrap());

/// Mate scores sit just below this value, as in engine output.
const MATE_SCORE: i32 = 10_000;

/// What happened to a single movetext token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    Matched(Move),
    /// Not move-shaped: variations, stray symbols, mid-text results.
    Skipped(String),
    /// Move-shaped but could not be decoded.
    Malformed { token: String, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMovetext {
    pub moves: Vec<AnnotatedMove>,
    pub diagnostics: Vec<TokenOutcome>,
}

impl ParsedMovetext {
    pub fn malformed_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|o| matches!(o, TokenOutcome::Malformed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|o| matches!(o, TokenOutcome::Skipped(_)))
            .count()
    }
}

#[derive(Debug, Default)]
struct PendingMove {
    source_number: Option<u32>,
    white: Option<Move>,
    black: Option<Move>,
    last_side: Option<Side>,
    comments: Vec<String>,
    evaluation: Option<i32>,
    clock: Option<String>,
}

impl PendingMove {
    fn numbered(number: u32) -> Self {
        Self {
            source_number: Some(number),
            ..Self::default()
        }
    }

    fn has_move(&self) -> bool {
        self.white.is_some() || self.black.is_some()
    }

    fn last_move_mut(&mut self) -> Option<&mut Move> {
        match self.last_side? {
            Side::White => self.white.as_mut(),
            Side::Black => self.black.as_mut(),
        }
    }
}

struct MoveParser {
    strictness: Strictness,
    moves: Vec<AnnotatedMove>,
    diagnostics: Vec<TokenOutcome>,
    current: Option<PendingMove>,
    /// Set by `N...`: the next move belongs to black.
    expect_black: bool,
    /// Comments seen before any move, given to the first entry.
    leading_comments: Vec<String>,
}

/// Parse tokens into move entries. Entries are numbered 1, 2, 3… in order of
/// appearance; source move numbers only delimit entries.
pub fn parse_movetext(tokens: &[Token], strictness: Strictness) -> Result<ParsedMovetext, PgnError> {
    let mut parser = MoveParser {
        strictness,
        moves: Vec::new(),
        diagnostics: Vec::new(),
        current: None,
        expect_black: false,
        leading_comments: Vec::new(),
    };

    for token in tokens {
        parser.consume(token)?;
    }
    parser.flush();

    let parsed = ParsedMovetext {
        moves: parser.moves,
        diagnostics: parser.diagnostics,
    };
    debug!(
        moves = parsed.moves.len(),
        skipped = parsed.skipped_count(),
        malformed = parsed.malformed_count(),
        "Parsed movetext"
    );
    Ok(parsed)
}

impl MoveParser {
    fn consume(&mut self, token: &Token) -> Result<(), PgnError> {
        match token {
            Token::MoveNumber {
                number,
                continuation,
            } => self.start_number(*number, *continuation),
            Token::San(raw) => match parse_san(raw) {
                Ok(mv) => {
                    self.diagnostics.push(TokenOutcome::Matched(mv.clone()));
                    self.place(mv);
                }
                Err(reason) => {
                    if self.strictness == Strictness::Strict {
                        return Err(PgnError::MalformedMove {
                            token: raw.clone(),
                            reason,
                        });
                    }
                    warn!(token = %raw, reason = %reason, "Skipping malformed move token");
                    self.diagnostics.push(TokenOutcome::Malformed {
                        token: raw.clone(),
                        reason,
                    });
                }
            },
            Token::Glyph(annotation) => {
                match self.current.as_mut().and_then(PendingMove::last_move_mut) {
                    Some(mv) => mv.annotation = Some(*annotation),
                    None => self.skip(annotation.glyph()),
                }
            }
            Token::Comment(body) => self.attach_comment(body),
            Token::Variation(raw) | Token::Result(raw) | Token::Other(raw) => self.skip(raw),
        }
        Ok(())
    }

    fn start_number(&mut self, number: u32, continuation: bool) {
        if let Some(pending) = self.current.as_mut() {
            if continuation && pending.source_number == Some(number) {
                self.expect_black = true;
                return;
            }
            if !pending.has_move() {
                // "3." after an empty "2." keeps the comments collected so far
                pending.source_number = Some(number);
                self.expect_black = continuation;
                return;
            }
        }
        self.flush();
        self.current = Some(PendingMove::numbered(number));
        self.expect_black = continuation;
    }

    fn place(&mut self, mv: Move) {
        if self.current.as_ref().is_some_and(|p| p.black.is_some()) {
            self.flush();
        }
        let expect_black = std::mem::take(&mut self.expect_black);
        let pending = self.current.get_or_insert_with(PendingMove::default);

        if pending.white.is_none() && !expect_black {
            pending.white = Some(mv);
            pending.last_side = Some(Side::White);
        } else {
            pending.black = Some(mv);
            pending.last_side = Some(Side::Black);
        }
    }

    fn attach_comment(&mut self, body: &str) {
        let mut evaluation = None;
        let mut clock = None;
        for caps in COMMAND_RE.captures_iter(body) {
            match &caps[1] {
                "eval" => evaluation = parse_eval(caps[2].trim()),
                "clk" => clock = Some(caps[2].trim().to_string()),
                _ => {}
            }
        }
        let text = COMMAND_RE.replace_all(body, "");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        let comments = match self.current.as_mut() {
            Some(pending) => {
                pending.evaluation = evaluation.or(pending.evaluation);
                pending.clock = clock.or(pending.clock.take());
                &mut pending.comments
            }
            None => &mut self.leading_comments,
        };
        if !text.is_empty() {
            comments.push(text);
        }
    }

    fn skip(&mut self, raw: &str) {
        debug!(token = %raw, "Skipping token");
        self.diagnostics.push(TokenOutcome::Skipped(raw.to_string()));
    }

    fn flush(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };

        if !pending.has_move() {
            // Trailing number with nothing after it; keep its comments
            if let Some(last) = self.moves.last_mut() {
                last.comments.extend(pending.comments);
            }
            return;
        }

        let mut comments = std::mem::take(&mut self.leading_comments);
        comments.extend(pending.comments);

        self.moves.push(AnnotatedMove {
            move_number: self.moves.len() as u32 + 1,
            white_move: pending.white,
            black_move: pending.black,
            comments,
            evaluation: pending.evaluation,
            clock: pending.clock,
        });
    }
}

/// `0.35` → 35, `-1.2` → -120, `#3` → 9997, `#-2` → -9998.
fn parse_eval(raw: &str) -> Option<i32> {
    if let Some(mate) = raw.strip_prefix('#') {
        let n: i32 = mate.parse().ok()?;
        let distance = MATE_SCORE.checked_sub(n.checked_abs()?)?;
        return Some(if n < 0 { -distance } else { distance });
    }
    let pawns: f64 = raw.parse().ok()?;
    Some((pawns * 100.0).round() as i32)
}
