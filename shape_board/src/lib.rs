use std::{fs, path::Path};

use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shape_schema::{Leaderboard, LeaderboardEntry, ShapeKind};

const NAMES: &[&str] = &[
    "Mina", "Jun", "Hana", "Leo", "Sora", "Yuna", "Theo", "Ari", "Nico", "Eun", "Kai", "Rin",
    "Maya", "Ollie", "Dae", "Iris", "Jin", "Lumi", "Seo", "Toby",
];

const AVATARS: &[&str] = &["🦊", "🐼", "🐯", "🐸", "🐧", "🦄", "🐙", "🐨", "🐰", "🦉"];

pub const MOCK_MIN_SCORE: f64 = 40.0;
pub const MOCK_MAX_SCORE: f64 = 99.9;

pub fn load_leaderboard_from_path(path: impl AsRef<Path>) -> anyhow::Result<Leaderboard> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read leaderboard: {}", path.display()))?;
    let board: Leaderboard = serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse leaderboard json: {}", path.display()))?;
    Ok(board)
}

pub fn load_leaderboard_from_str(json: &str) -> anyhow::Result<Leaderboard> {
    let board: Leaderboard = serde_json::from_str(json).context("failed to parse leaderboard json")?;
    Ok(board)
}

/// Seeded stand-in population, `per_shape` entries for every shape, best first.
pub fn mock_leaderboard(seed: u64, per_shape: usize) -> Leaderboard {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Leaderboard::default();

    for shape in ShapeKind::ALL {
        let mut entries: Vec<LeaderboardEntry> = (0..per_shape)
            .map(|_| {
                let raw: f64 = rng.gen_range(MOCK_MIN_SCORE..=MOCK_MAX_SCORE);
                LeaderboardEntry {
                    rank: 0,
                    name: NAMES.choose(&mut rng).copied().unwrap_or("Guest").to_string(),
                    score: (raw * 10.0).round() / 10.0,
                    avatar: AVATARS.choose(&mut rng).copied().unwrap_or_default().to_string(),
                }
            })
            .collect();

        entries.sort_by(|a, b| b.score.total_cmp(&a.score));
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.rank = i as u32 + 1;
        }
        board.insert(shape, entries);
    }
    board
}
