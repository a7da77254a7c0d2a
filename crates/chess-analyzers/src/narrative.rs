//! Title and summary text, built only from already-computed record fields.

use chess_core::game_data::{
    GameEvaluation, GameMetadata, GameQuality, GameResult, HighlightKind, OpeningInfo,
    TacticalHighlight,
};

use crate::evaluation::count_kind;

pub fn title(evaluation: &GameEvaluation, opening: &OpeningInfo) -> String {
    match evaluation.final_result {
        GameResult::WhiteWins => format!("White Strikes Decisively in the {}", opening.name),
        GameResult::BlackWins => format!("Black Triumphs from the {}", opening.name),
        GameResult::Draw | GameResult::Unknown => {
            format!("A Hard-Fought Draw in the {}", opening.name)
        }
    }
}

pub fn summary(
    metadata: &GameMetadata,
    opening: &OpeningInfo,
    highlights: &[TacticalHighlight],
    evaluation: &GameEvaluation,
) -> String {
    let white = metadata.white.as_deref().unwrap_or("White");
    let black = metadata.black.as_deref().unwrap_or("Black");

    let mut sentences = vec![format!(
        "{white} faced {black} in a game that opened with the {}.",
        opening.name
    )];

    let brilliant = count_kind(highlights, HighlightKind::Brilliant);
    if brilliant > 0 {
        sentences.push(format!(
            "The game featured {brilliant} brilliant {}.",
            plural(brilliant, "move", "moves")
        ));
    }

    let tactical = count_kind(highlights, HighlightKind::Tactical);
    if tactical > 0 {
        sentences.push(format!(
            "There {} {tactical} tactical {} along the way.",
            plural(tactical, "was", "were"),
            plural(tactical, "moment", "moments")
        ));
    }

    sentences.push(
        match evaluation.game_quality {
            GameQuality::Excellent => "An exceptional display of chess, well worth studying move by move.",
            GameQuality::Good => "A well-played game with instructive moments for both sides.",
            GameQuality::Average | GameQuality::Poor => {
                "A hard-fought battle with lessons to take from both sides' mistakes."
            }
        }
        .to_string(),
    );

    sentences.join(" ")
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
