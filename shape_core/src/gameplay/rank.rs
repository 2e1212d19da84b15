use std::sync::Arc;

use shape_schema::{Leaderboard, LeaderboardEntry, ShapeKind};

/// Read-only source of the reference population for each shape.
pub trait LeaderboardProvider {
    fn entries(&self, shape: ShapeKind) -> &[LeaderboardEntry];
}

impl LeaderboardProvider for Leaderboard {
    fn entries(&self, shape: ShapeKind) -> &[LeaderboardEntry] {
        Leaderboard::entries(self, shape)
    }
}

impl<T: LeaderboardProvider + ?Sized> LeaderboardProvider for &T {
    fn entries(&self, shape: ShapeKind) -> &[LeaderboardEntry] {
        (**self).entries(shape)
    }
}

impl<T: LeaderboardProvider + ?Sized> LeaderboardProvider for Arc<T> {
    fn entries(&self, shape: ShapeKind) -> &[LeaderboardEntry] {
        (**self).entries(shape)
    }
}

/// Number of entries strictly better than `score`, plus one.
pub fn resolve_rank(score: f64, entries: &[LeaderboardEntry]) -> u32 {
    let better = entries.iter().filter(|e| e.score > score).count();
    better as u32 + 1
}
