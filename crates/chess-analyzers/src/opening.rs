//! Opening classification against an ordered table of move patterns.

use chess_core::game_data::{AnnotatedMove, OpeningInfo};

/// Only the first ten plies are ever considered.
pub const OPENING_PLIES: usize = 10;

/// (pattern, name, ECO, variation, description). Order matters: the first
/// pattern found in the opening moves wins, so specific lines come before
/// the general ones they extend.
const OPENING_TABLE: &[(&str, &str, &str, Option<&str>, &str)] = &[
    (
        "e4 c5 nf3 d6 d4 cxd4 nxd4 nf6 nc3 a6",
        "Sicilian Defense",
        "B90",
        Some("Najdorf Variation"),
        "A sharp Sicilian where Black's a6 prepares queenside expansion.",
    ),
    (
        "e4 c5 nf3 d6 d4 cxd4 nxd4 nf6 nc3 g6",
        "Sicilian Defense",
        "B70",
        Some("Dragon Variation"),
        "Black fianchettoes the king's bishop onto the long diagonal.",
    ),
    (
        "e4 c5",
        "Sicilian Defense",
        "B20",
        None,
        "Black fights for d4 asymmetrically and plays for the initiative.",
    ),
    (
        "e4 e6",
        "French Defense",
        "C00",
        None,
        "A solid defense where Black prepares d5 behind a pawn chain.",
    ),
    (
        "e4 c6",
        "Caro-Kann Defense",
        "B10",
        None,
        "A resilient defense that supports d5 without blocking the light-squared bishop.",
    ),
    (
        "e4 d5",
        "Scandinavian Defense",
        "B01",
        None,
        "Black challenges the e4 pawn immediately.",
    ),
    (
        "e4 nf6",
        "Alekhine's Defense",
        "B02",
        None,
        "Black invites White's pawns forward to attack them later.",
    ),
    (
        "e4 d6",
        "Pirc Defense",
        "B07",
        None,
        "A hypermodern setup letting White build a center first.",
    ),
    (
        "e4 e5 nf3 nc6 bb5 a6",
        "Ruy Lopez",
        "C70",
        Some("Morphy Defense"),
        "Black questions the bishop at once in the most classical of openings.",
    ),
    (
        "e4 e5 nf3 nc6 bb5",
        "Ruy Lopez",
        "C60",
        None,
        "White pressures the knight defending e5 in one of the oldest openings.",
    ),
    (
        "e4 e5 nf3 nc6 bc4 bc5",
        "Italian Game",
        "C50",
        Some("Giuoco Piano"),
        "Both bishops aim at the weak f-pawns in a quiet classical struggle.",
    ),
    (
        "e4 e5 nf3 nc6 bc4 nf6",
        "Italian Game",
        "C55",
        Some("Two Knights Defense"),
        "Black counterattacks e4 instead of mirroring White's development.",
    ),
    (
        "e4 e5 nf3 nc6 bc4",
        "Italian Game",
        "C50",
        None,
        "White develops the bishop toward f7 and prepares to castle.",
    ),
    (
        "e4 e5 nf3 nc6 d4",
        "Scotch Game",
        "C45",
        None,
        "White opens the center immediately with d4.",
    ),
    (
        "e4 e5 nf3 nf6",
        "Petrov's Defense",
        "C42",
        None,
        "Black counterattacks e4 symmetrically for a solid game.",
    ),
    (
        "e4 e5 nf3 d6",
        "Philidor Defense",
        "C41",
        None,
        "Black defends e5 with a pawn, keeping a compact position.",
    ),
    (
        "e4 e5 f4",
        "King's Gambit",
        "C30",
        None,
        "White offers a pawn for rapid development and an open f-file.",
    ),
    (
        "e4 e5 nc3",
        "Vienna Game",
        "C25",
        None,
        "White develops the queen's knight and keeps f4 in reserve.",
    ),
    (
        "e4 e5",
        "Open Game",
        "C20",
        None,
        "Both sides stake a claim in the center with their king's pawns.",
    ),
    (
        "d4 d5 c4 dxc4",
        "Queen's Gambit Accepted",
        "D20",
        None,
        "Black takes the c4 pawn, planning to return it for free development.",
    ),
    (
        "d4 d5 c4 e6",
        "Queen's Gambit Declined",
        "D30",
        None,
        "Black keeps a firm grip on d5 at the cost of the light-squared bishop.",
    ),
    (
        "d4 d5 c4 c6",
        "Slav Defense",
        "D10",
        None,
        "Black supports d5 with the c-pawn and keeps the bishop free.",
    ),
    (
        "d4 d5 c4",
        "Queen's Gambit",
        "D06",
        None,
        "White offers the c-pawn to deflect Black's central pawn.",
    ),
    (
        "d4 d5 bf4",
        "London System",
        "D00",
        None,
        "White builds a solid setup around an early bishop on f4.",
    ),
    (
        "d4 nf6 c4 g6 nc3 d5",
        "Grünfeld Defense",
        "D80",
        None,
        "Black lets White build a big center and then strikes at it.",
    ),
    (
        "d4 nf6 c4 g6",
        "King's Indian Defense",
        "E60",
        None,
        "Black fianchettoes and prepares a kingside counterattack.",
    ),
    (
        "d4 nf6 c4 e6 nc3 bb4",
        "Nimzo-Indian Defense",
        "E20",
        None,
        "Black pins the knight to control e4 with pieces.",
    ),
    (
        "d4 nf6 c4 e6 nf3 b6",
        "Queen's Indian Defense",
        "E12",
        None,
        "Black fights for e4 by fianchettoing the queen's bishop.",
    ),
    (
        "d4 nf6 bf4",
        "London System",
        "A46",
        None,
        "White builds a solid setup around an early bishop on f4.",
    ),
    (
        "d4 nf6",
        "Indian Defense",
        "A45",
        None,
        "Black develops the knight first and keeps central options open.",
    ),
    (
        "d4 f5",
        "Dutch Defense",
        "A80",
        None,
        "Black claims e4 with the f-pawn for an unbalanced game.",
    ),
    (
        "d4 d5",
        "Closed Game",
        "D00",
        None,
        "Both sides advance their queen's pawns for a strategic struggle.",
    ),
    (
        "c4",
        "English Opening",
        "A10",
        None,
        "White controls d5 from the flank.",
    ),
    (
        "nf3",
        "Réti Opening",
        "A04",
        None,
        "A flexible hypermodern start that delays central pawn moves.",
    ),
    (
        "e4",
        "King's Pawn Opening",
        "B00",
        None,
        "White opens with the king's pawn and Black avoids the main replies.",
    ),
    (
        "d4",
        "Queen's Pawn Opening",
        "A40",
        None,
        "White opens with the queen's pawn and Black avoids the main replies.",
    ),
];

const FALLBACK_NAME: &str = "Irregular Opening";
const FALLBACK_ECO: &str = "A00";
const FALLBACK_DESCRIPTION: &str =
    "This opening does not follow a recognized classical pattern.";

struct OpeningEntry {
    /// Space-padded so matches only land on whole moves.
    pattern: String,
    info: OpeningInfo,
}

/// Opening lookup table, built once and never mutated.
pub struct OpeningClassifier {
    entries: Vec<OpeningEntry>,
}

impl Default for OpeningClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl OpeningClassifier {
    pub fn new() -> Self {
        let entries = OPENING_TABLE
            .iter()
            .map(|(pattern, name, eco, variation, description)| OpeningEntry {
                pattern: format!(" {pattern} "),
                info: OpeningInfo {
                    name: name.to_string(),
                    eco: eco.to_string(),
                    variation: variation.map(str::to_string),
                    moves: Vec::new(),
                    description: description.to_string(),
                },
            })
            .collect();
        Self { entries }
    }

    /// Classify a game by its first plies. Never fails: unknown openings get
    /// the irregular-opening entry.
    pub fn classify(&self, moves: &[AnnotatedMove]) -> OpeningInfo {
        let plies: Vec<String> = moves
            .iter()
            .flat_map(|entry| entry.plies())
            .take(OPENING_PLIES)
            .map(|(_, mv)| mv.san.clone())
            .collect();

        let key = format!(" {} ", normalize(&plies));

        let mut info = self
            .entries
            .iter()
            .find(|entry| key.contains(&entry.pattern))
            .map(|entry| entry.info.clone())
            .unwrap_or_else(|| OpeningInfo {
                name: FALLBACK_NAME.to_string(),
                eco: FALLBACK_ECO.to_string(),
                variation: None,
                moves: Vec::new(),
                description: FALLBACK_DESCRIPTION.to_string(),
            });
        info.moves = plies;
        info
    }
}

/// Lower-cased SAN joined by spaces, without check or mate markers.
fn normalize(plies: &[String]) -> String {
    plies
        .iter()
        .map(|san| san.trim_end_matches(['+', '#']).to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
