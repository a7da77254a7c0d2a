//! Structured game record produced by the analysis pipeline.
//!
//! Field names serialize in camelCase; the JSON shape is the contract shared
//! with the replay, publishing and storage surfaces.

use serde::{Deserialize, Serialize};

/// Side to move for a single ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::White => "White",
            Side::Black => "Black",
        }
    }
}

/// Piece letter of a move. Pawns are implicit in SAN and serialize as `P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    #[serde(rename = "K")]
    King,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "R")]
    Rook,
    #[serde(rename = "B")]
    Bishop,
    #[serde(rename = "N")]
    Knight,
    #[serde(rename = "P")]
    Pawn,
}

impl Piece {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'K' => Some(Piece::King),
            'Q' => Some(Piece::Queen),
            'R' => Some(Piece::Rook),
            'B' => Some(Piece::Bishop),
            'N' => Some(Piece::Knight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastleKind {
    Kingside,
    Queenside,
}

/// Move-quality glyph. Serializes as the glyph itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Annotation {
    #[serde(rename = "!!")]
    Brilliant,
    #[serde(rename = "!")]
    Good,
    #[serde(rename = "!?")]
    Interesting,
    #[serde(rename = "?!")]
    Dubious,
    #[serde(rename = "?")]
    Mistake,
    #[serde(rename = "??")]
    Blunder,
}

impl Annotation {
    pub fn from_glyph(glyph: &str) -> Option<Self> {
        match glyph {
            "!!" => Some(Annotation::Brilliant),
            "!" => Some(Annotation::Good),
            "!?" => Some(Annotation::Interesting),
            "?!" => Some(Annotation::Dubious),
            "?" => Some(Annotation::Mistake),
            "??" => Some(Annotation::Blunder),
            _ => None,
        }
    }

    /// Numeric Annotation Glyphs `$1`..`$6`.
    pub fn from_nag(nag: u8) -> Option<Self> {
        match nag {
            1 => Some(Annotation::Good),
            2 => Some(Annotation::Mistake),
            3 => Some(Annotation::Brilliant),
            4 => Some(Annotation::Blunder),
            5 => Some(Annotation::Interesting),
            6 => Some(Annotation::Dubious),
            _ => None,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Annotation::Brilliant => "!!",
            Annotation::Good => "!",
            Annotation::Interesting => "!?",
            Annotation::Dubious => "?!",
            Annotation::Mistake => "?",
            Annotation::Blunder => "??",
        }
    }
}

/// A single decoded ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    /// SAN text including any check marker, without the quality glyph.
    pub san: String,
    /// Destination square such as `e4`. `None` for castling.
    pub destination: Option<String>,
    pub piece: Piece,
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub promotion: Option<Piece>,
    pub castle: Option<CastleKind>,
    pub annotation: Option<Annotation>,
}

/// One numbered move: a white ply, a black ply, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedMove {
    pub move_number: u32,
    pub white_move: Option<Move>,
    pub black_move: Option<Move>,
    pub comments: Vec<String>,
    /// Engine evaluation from a `[%eval]` comment, in centipawns.
    pub evaluation: Option<i32>,
    /// Clock reading from a `[%clk]` comment.
    pub clock: Option<String>,
}

impl AnnotatedMove {
    /// Plies of this move in playing order.
    pub fn plies(&self) -> impl Iterator<Item = (Side, &Move)> {
        self.white_move
            .iter()
            .map(|m| (Side::White, m))
            .chain(self.black_move.iter().map(|m| (Side::Black, m)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub round: Option<String>,
    pub white: Option<String>,
    pub black: Option<String>,
    pub result: Option<String>,
    pub white_elo: Option<u32>,
    pub black_elo: Option<u32>,
    pub time_control: Option<String>,
    pub eco: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningInfo {
    pub name: String,
    pub eco: String,
    pub variation: Option<String>,
    /// SAN of the plies the classification looked at.
    pub moves: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    Brilliant,
    Blunder,
    Tactical,
    Positional,
    Endgame,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticalHighlight {
    pub move_number: u32,
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    pub description: String,
    /// Centipawn-like score: one of -200, -100, 0, 100, 200.
    pub evaluation: i32,
    /// FEN after the highlighted ply, or the starting position when the
    /// game could not be replayed that far.
    pub position: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "1-0")]
    WhiteWins,
    #[serde(rename = "0-1")]
    BlackWins,
    #[serde(rename = "1/2-1/2")]
    Draw,
    #[default]
    #[serde(rename = "*")]
    Unknown,
}

impl GameResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Unknown => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameQuality {
    Excellent,
    Good,
    #[default]
    Average,
    Poor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEvaluation {
    pub final_result: GameResult,
    pub white_advantage: i32,
    pub critical_moments: Vec<u32>,
    pub game_quality: GameQuality,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub title: String,
    pub summary: String,
    pub metadata: GameMetadata,
    pub moves: Vec<AnnotatedMove>,
    pub opening: OpeningInfo,
    pub tactical_highlights: Vec<TacticalHighlight>,
    pub evaluation: GameEvaluation,
    pub error: bool,
    pub error_reason: Option<String>,
}

impl GameRecord {
    /// A record for input that could not be analyzed. Moves, highlights and
    /// evaluation are always empty/default here.
    pub fn failed(title: &str, reason: String) -> Self {
        Self {
            title: title.to_string(),
            summary: format!("The game could not be analyzed: {reason}"),
            metadata: GameMetadata::default(),
            moves: Vec::new(),
            opening: OpeningInfo::default(),
            tactical_highlights: Vec::new(),
            evaluation: GameEvaluation::default(),
            error: true,
            error_reason: Some(reason),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
