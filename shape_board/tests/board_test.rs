use std::{env, fs};

use shape_board::{load_leaderboard_from_path, load_leaderboard_from_str, mock_leaderboard};
use shape_schema::ShapeKind;

#[test]
fn mock_board_is_seeded() {
    let a = mock_leaderboard(42, 10);
    let b = mock_leaderboard(42, 10);
    let c = mock_leaderboard(43, 10);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn mock_board_is_sorted_and_ranked() {
    let board = mock_leaderboard(7, 25);

    for shape in ShapeKind::ALL {
        let entries = board.entries(shape);
        assert_eq!(entries.len(), 25);

        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.rank, i as u32 + 1);
            assert!((40.0..=99.9).contains(&e.score), "{shape}: {}", e.score);
            // One decimal place.
            assert!(((e.score * 10.0).round() - e.score * 10.0).abs() < 1e-9);
            assert!(!e.name.is_empty());
        }
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    }
}

#[test]
fn load_from_str_reports_parse_failures() {
    let board = load_leaderboard_from_str(
        r#"{ "boards": { "circle": [ { "rank": 1, "name": "A", "score": 91.0 } ] } }"#,
    )
    .unwrap();
    assert_eq!(board.entries(ShapeKind::Circle).len(), 1);

    let err = load_leaderboard_from_str("[1, 2]").unwrap_err();
    assert!(err.to_string().contains("failed to parse leaderboard json"));
}

#[test]
fn load_from_path_roundtrips_mock_board() {
    let path = env::temp_dir().join(format!("shape_board_roundtrip_{}.json", std::process::id()));
    let board = mock_leaderboard(1, 5);
    fs::write(&path, serde_json::to_string(&board).unwrap()).unwrap();

    let loaded = load_leaderboard_from_path(&path).unwrap();
    assert_eq!(loaded, board);

    let _ = fs::remove_file(&path);
}

#[test]
fn load_from_missing_path_has_context() {
    let missing = env::temp_dir().join(format!("shape_board_missing_{}.json", std::process::id()));
    let _ = fs::remove_file(&missing);

    let err = load_leaderboard_from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("failed to read leaderboard:"));
}
