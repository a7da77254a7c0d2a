//! Integration tests: run whole games through `analyze()` and check the
//! record contract.

use chess_analyzers::{analyze, AnalysisEngine};
use chess_core::game_data::{GameQuality, GameRecord, GameResult, HighlightKind};
use chess_core::AnalysisOptions;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const OPERA_GAME: &str = r#"[Event "Paris Opera"]
[Site "Paris FRA"]
[Date "1858.??.??"]
[Round "?"]
[White "Paul Morphy"]
[Black "Duke Karl / Count Isouard"]
[Result "1-0"]
[ECO "C41"]

1. e4 e5 2. Nf3 d6 3. d4 Bg4?! 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7
8. Nc3 c6 9. Bg5 b5? 10. Nxb5! cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8
13. Rxd7! Rxd7 14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+!! Nxb8 17. Rd8# 1-0"#;

/// Build `n` plies of knight shuffling, numbered normally.
fn shuffle_game(plies: usize) -> String {
    const CYCLE: [&str; 8] = ["Nf3", "Nf6", "Ng1", "Ng8", "Nc3", "Nc6", "Nb1", "Nb8"];
    let mut text = String::new();
    for ply in 0..plies {
        if ply % 2 == 0 {
            text.push_str(&format!("{}. ", ply / 2 + 1));
        }
        text.push_str(CYCLE[ply % CYCLE.len()]);
        text.push(' ');
    }
    text
}

fn count(record: &GameRecord, kind: HighlightKind) -> usize {
    record
        .tactical_highlights
        .iter()
        .filter(|h| h.kind == kind)
        .count()
}

// ---------------------------------------------------------------------------
// Error records
// ---------------------------------------------------------------------------

#[test]
fn test_empty_input_record() {
    let record = analyze("");
    assert!(record.error);
    assert_eq!(record.error_reason.as_deref(), Some("Empty PGN string"));
    assert!(record.moves.is_empty());
    assert!(record.tactical_highlights.is_empty());
    assert_eq!(record.evaluation.white_advantage, 0);
}

#[test]
fn test_headers_only_record() {
    let record = analyze("[Event \"X\"]\n\n");
    assert!(record.error);
    assert_eq!(record.error_reason.as_deref(), Some("No moves found in PGN"));
    assert!(record.moves.is_empty());
}

#[test]
fn test_strict_error_never_leaks_partial_moves() {
    let engine = AnalysisEngine::new(AnalysisOptions::default().strict(true));
    let record = engine.analyze("1. e4 e5 2. Nf3 Nc6 3. Bz9");
    assert!(record.error);
    assert!(record.moves.is_empty());
    assert!(record.tactical_highlights.is_empty());
}

#[test]
fn test_out_of_range_mate_eval_is_ignored() {
    let record = analyze("1. e4 {[%eval #-2147483648]} e5");
    assert!(!record.error);
    assert_eq!(record.moves.len(), 1);
    assert_eq!(record.moves[0].evaluation, None);
}

// ---------------------------------------------------------------------------
// Move list
// ---------------------------------------------------------------------------

#[test]
fn test_move_count_is_half_the_plies_rounded_up() {
    for plies in 1..=21 {
        let record = analyze(&shuffle_game(plies));
        assert!(!record.error, "plies={plies}");
        assert_eq!(record.moves.len(), (plies + 1) / 2, "plies={plies}");

        let numbers: Vec<u32> = record.moves.iter().map(|m| m.move_number).collect();
        let expected: Vec<u32> = (1..=record.moves.len() as u32).collect();
        assert_eq!(numbers, expected);

        for entry in &record.moves {
            assert!(entry.white_move.is_some() || entry.black_move.is_some());
        }
    }
}

#[test]
fn test_opera_game() {
    let record = analyze(OPERA_GAME);
    assert!(!record.error);
    assert_eq!(record.moves.len(), 17);
    assert_eq!(record.metadata.eco.as_deref(), Some("C41"));
    assert_eq!(record.opening.name, "Philidor Defense");
    assert_eq!(record.evaluation.final_result, GameResult::WhiteWins);

    let castle = record.moves[11].white_move.as_ref().unwrap();
    assert_eq!(castle.san, "O-O-O");
    assert_eq!(castle.destination, None);

    // 16. Qb8+!! is the only brilliant move; 9... b5? is scored as a blunder
    assert_eq!(count(&record, HighlightKind::Brilliant), 1);
    assert_eq!(count(&record, HighlightKind::Blunder), 1);
    assert_eq!(record.evaluation.game_quality, GameQuality::Good);
    assert!(record.summary.contains("Paul Morphy"));
    assert!(record.summary.contains("1 brilliant move."));
}

// ---------------------------------------------------------------------------
// Opening, highlights, evaluation
// ---------------------------------------------------------------------------

#[test]
fn test_open_game_classification() {
    let record = analyze("1. e4 e5");
    assert_eq!(record.opening.name, "Open Game");
    assert_eq!(record.opening.eco, "C20");
}

#[test]
fn test_double_exclam_is_one_brilliant_highlight() {
    let record = analyze("1. e4 e5 2. Nf3 Nc6 3. Bc4!! Nf6");
    let brilliant: Vec<_> = record
        .tactical_highlights
        .iter()
        .filter(|h| h.kind == HighlightKind::Brilliant)
        .collect();
    assert_eq!(brilliant.len(), 1);
    assert_eq!(brilliant[0].evaluation, 200);
    assert_eq!(brilliant[0].move_number, 3);
}

#[test]
fn test_double_question_is_one_blunder_highlight() {
    let record = analyze("1. f3 e5 2. g4?? Qh4#");
    let blunders: Vec<_> = record
        .tactical_highlights
        .iter()
        .filter(|h| h.kind == HighlightKind::Blunder)
        .collect();
    assert_eq!(blunders.len(), 1);
    assert_eq!(blunders[0].evaluation, -200);
    assert_eq!(blunders[0].move_number, 2);
    assert_eq!(record.evaluation.final_result, GameResult::BlackWins);
    assert_eq!(record.evaluation.white_advantage, -200);
}

#[test]
fn test_excellent_quality_boundary() {
    let two_brilliant = analyze("1. e4!! e5 2. Nf3!! Nc6 3. Bb5 a6");
    assert_eq!(count(&two_brilliant, HighlightKind::Brilliant), 2);
    assert_ne!(two_brilliant.evaluation.game_quality, GameQuality::Excellent);

    let three_and_blunder = analyze("1. e4!! e5 2. Nf3!! Nc6 3. Bb5!! a6?");
    assert_eq!(count(&three_and_blunder, HighlightKind::Brilliant), 3);
    assert_eq!(count(&three_and_blunder, HighlightKind::Blunder), 1);
    assert_ne!(three_and_blunder.evaluation.game_quality, GameQuality::Excellent);

    let excellent = analyze("1. e4!! e5 2. Nf3!! Nc6 3. Bb5!! a6");
    assert_eq!(excellent.evaluation.game_quality, GameQuality::Excellent);
    assert_eq!(excellent.evaluation.white_advantage, 600);
    assert_eq!(excellent.evaluation.critical_moments, vec![1, 2, 3]);
}

#[test]
fn test_highlight_values_come_from_fixed_set() {
    let record = analyze(OPERA_GAME);
    for highlight in &record.tactical_highlights {
        assert!([-200, -100, 0, 100, 200].contains(&highlight.evaluation));
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn test_serialization_round_trip() {
    for record in [analyze(OPERA_GAME), analyze(""), analyze("[Event \"X\"]\n\n")] {
        let json = record.to_json().unwrap();
        assert_eq!(GameRecord::from_json(&json).unwrap(), record);
    }
}

#[test]
fn test_serialized_shape() {
    let record = analyze("1. e4 e5 2. Nf3 Nc6 3. Bb5 a6");
    let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

    assert_eq!(value["error"], false);
    assert!(value["errorReason"].is_null());
    assert_eq!(value["opening"]["eco"], "C70");
    assert_eq!(value["moves"][0]["whiteMove"]["san"], "e4");
    assert_eq!(value["evaluation"]["finalResult"], "1/2-1/2");
    assert!(value["tacticalHighlights"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_analysis_matches_sequential() {
    let inputs: Vec<String> = vec![
        OPERA_GAME.to_string(),
        "1. e4 e5".to_string(),
        "1. f3 e5 2. g4?? Qh4#".to_string(),
        shuffle_game(15),
        String::new(),
        "[Event \"X\"]\n\n".to_string(),
        "1. d4 Nf6 2. c4 g6 3. Nc3 d5 4. cxd5 Nxd5".to_string(),
    ];

    let engine = AnalysisEngine::default();
    let sequential: Vec<GameRecord> = inputs.iter().map(|text| engine.analyze(text)).collect();

    let engine = &engine;
    let concurrent: Vec<GameRecord> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|text| scope.spawn(move || engine.analyze(text)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}
