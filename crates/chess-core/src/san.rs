//! SAN token decoding.

use std::sync::LazyLock;

use regex::Regex;

use crate::game_data::{Annotation, CastleKind, Move, Piece};

static SAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([KQRBN])?([a-h])?([1-8])?(x)?([a-h][1-8])(?:=?([QRBN]))?([+#])?(!!|\?\?|!\?|\?!|!|\?)?$")
        .unwrap()
});

static CASTLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(O-O-O|O-O|0-0-0|0-0)([+#])?(!!|\?\?|!\?|\?!|!|\?)?$").unwrap()
});

static SQUARE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-h][1-8]").unwrap());

/// Decode one SAN token. A quality glyph glued to the end is attached as
/// the move's annotation. The error is a human-readable reason.
pub fn parse_san(token: &str) -> Result<Move, String> {
    if let Some(caps) = CASTLE_RE.captures(token) {
        let castle = if caps[1].len() > 3 {
            CastleKind::Queenside
        } else {
            CastleKind::Kingside
        };
        let marker = caps.get(2).map_or("", |m| m.as_str());
        let core = match castle {
            CastleKind::Kingside => "O-O",
            CastleKind::Queenside => "O-O-O",
        };
        return Ok(Move {
            san: format!("{core}{marker}"),
            destination: None,
            piece: Piece::King,
            is_capture: false,
            is_check: marker == "+",
            is_checkmate: marker == "#",
            promotion: None,
            castle: Some(castle),
            annotation: caps.get(3).and_then(|m| Annotation::from_glyph(m.as_str())),
        });
    }

    let Some(caps) = SAN_RE.captures(token) else {
        return Err(rejection_reason(token));
    };

    let piece = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Piece::from_letter)
        .unwrap_or(Piece::Pawn);
    let promotion = caps
        .get(6)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Piece::from_letter);
    if promotion.is_some() && piece != Piece::Pawn {
        return Err("only pawns can promote".to_string());
    }

    let marker = caps.get(7).map_or("", |m| m.as_str());
    let glyph = caps.get(8).map_or("", |m| m.as_str());
    let san = token[..token.len() - glyph.len()].to_string();

    Ok(Move {
        san,
        destination: Some(caps[5].to_string()),
        piece,
        is_capture: caps.get(4).is_some(),
        is_check: marker == "+",
        is_checkmate: marker == "#",
        promotion,
        castle: None,
        annotation: Annotation::from_glyph(glyph),
    })
}

fn rejection_reason(token: &str) -> String {
    if !SQUARE_RE.is_match(token) {
        "no destination square".to_string()
    } else if let Some((_, promo)) = token.split_once('=') {
        if promo.starts_with(['Q', 'R', 'B', 'N']) {
            "unrecognized SAN syntax".to_string()
        } else {
            "invalid promotion piece".to_string()
        }
    } else {
        "unrecognized SAN syntax".to_string()
    }
}
