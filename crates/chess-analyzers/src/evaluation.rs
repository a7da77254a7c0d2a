//! Game-level evaluation built from highlights and the final position.

use chess_core::game_data::{
    AnnotatedMove, GameEvaluation, GameQuality, GameResult, HighlightKind, TacticalHighlight,
};

pub fn evaluate_game(moves: &[AnnotatedMove], highlights: &[TacticalHighlight]) -> GameEvaluation {
    let brilliant = count_kind(highlights, HighlightKind::Brilliant);
    let blunders = count_kind(highlights, HighlightKind::Blunder);

    GameEvaluation {
        final_result: final_result(moves),
        white_advantage: highlights.iter().map(|h| h.evaluation).sum(),
        critical_moments: highlights.iter().map(|h| h.move_number).collect(),
        game_quality: game_quality(brilliant, blunders),
    }
}

/// Decisive only when the last ply of the game is checkmate; everything else
/// is reported as a draw.
pub fn final_result(moves: &[AnnotatedMove]) -> GameResult {
    let Some(last) = moves.last() else {
        return GameResult::Draw;
    };

    match (&last.white_move, &last.black_move) {
        (_, Some(black)) if black.is_checkmate => GameResult::BlackWins,
        (Some(white), None) if white.is_checkmate => GameResult::WhiteWins,
        _ => GameResult::Draw,
    }
}

pub fn game_quality(brilliant: usize, blunders: usize) -> GameQuality {
    if brilliant > 2 && blunders == 0 {
        GameQuality::Excellent
    } else if brilliant > 0 && blunders <= 1 {
        GameQuality::Good
    } else if blunders <= 2 {
        GameQuality::Average
    } else {
        GameQuality::Poor
    }
}

pub fn count_kind(highlights: &[TacticalHighlight], kind: HighlightKind) -> usize {
    highlights.iter().filter(|h| h.kind == kind).count()
}
