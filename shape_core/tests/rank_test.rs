use std::sync::Arc;

use shape_core::gameplay::rank::{resolve_rank, LeaderboardProvider};
use shape_core::ShapeKind;
use shape_schema::{Leaderboard, LeaderboardEntry};

fn board(scores: &[f64]) -> Vec<LeaderboardEntry> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| LeaderboardEntry {
            rank: i as u32 + 1,
            name: format!("player{i}"),
            score,
            avatar: String::new(),
        })
        .collect()
}

#[test]
fn test_rank_counts_strictly_better_entries() {
    let entries = board(&[90.0, 80.0, 70.0]);
    assert_eq!(resolve_rank(85.0, &entries), 2);
    assert_eq!(resolve_rank(99.9, &entries), 1);
    assert_eq!(resolve_rank(10.0, &entries), 4);
}

#[test]
fn test_tie_shares_the_best_equal_rank() {
    let entries = board(&[90.0, 90.0, 70.0]);
    assert_eq!(resolve_rank(90.0, &entries), 1);
    assert_eq!(resolve_rank(70.0, &entries), 3);
}

#[test]
fn test_empty_board_ranks_first() {
    assert_eq!(resolve_rank(0.0, &[]), 1);
}

#[test]
fn test_unsorted_board_gives_same_rank() {
    let sorted = board(&[95.0, 88.0, 60.0, 42.0]);
    let shuffled = board(&[60.0, 95.0, 42.0, 88.0]);
    for score in [99.0, 90.0, 88.0, 50.0, 1.0] {
        assert_eq!(resolve_rank(score, &sorted), resolve_rank(score, &shuffled));
    }
}

#[test]
fn test_rank_is_monotonic_in_score() {
    let entries = board(&[97.1, 93.4, 93.4, 81.0, 65.2, 40.0]);
    let mut previous = u32::MAX;
    for tenth in 0..=999 {
        let rank = resolve_rank(tenth as f64 / 10.0, &entries);
        assert!(rank <= previous);
        previous = rank;
    }
}

#[test]
fn test_provider_impls_share_the_board() {
    let mut leaderboard = Leaderboard::default();
    leaderboard.insert(ShapeKind::Star, board(&[90.0, 50.0]));

    let shared = Arc::new(leaderboard);
    let by_arc = resolve_rank(60.0, LeaderboardProvider::entries(&shared, ShapeKind::Star));
    let by_ref = resolve_rank(60.0, LeaderboardProvider::entries(&&*shared, ShapeKind::Star));
    assert_eq!(by_arc, 2);
    assert_eq!(by_ref, 2);

    assert!(LeaderboardProvider::entries(&shared, ShapeKind::Circle).is_empty());
}
