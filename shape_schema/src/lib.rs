use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};
use thiserror::Error;

pub type Milliseconds = f64;

/// Canvas pixel coordinate, y grows downwards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
    Umbrella,
    Star,
    Diamond,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Umbrella,
        ShapeKind::Star,
        ShapeKind::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
            ShapeKind::Umbrella => "umbrella",
            ShapeKind::Star => "star",
            ShapeKind::Diamond => "diamond",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown shape '{name}' (expected one of: circle, triangle, square, umbrella, star, diamond)")]
pub struct ParseShapeError {
    pub name: String,
}

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == name)
            .ok_or(ParseShapeError { name: s.to_string() })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub score: f64,
    #[serde(default)]
    pub avatar: String,
}

/// Reference population per shape. Entries are expected sorted by score, best first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Leaderboard {
    #[serde(default)]
    pub boards: HashMap<ShapeKind, Vec<LeaderboardEntry>>,
}

impl Leaderboard {
    pub fn entries(&self, shape: ShapeKind) -> &[LeaderboardEntry] {
        self.boards.get(&shape).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, shape: ShapeKind, entries: Vec<LeaderboardEntry>) {
        self.boards.insert(shape, entries);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerSampleKind {
    Down,
    Move,
    Up,
    Leave,
}

/// One recorded pointer event, `t_ms` measured from the moment the round was started.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PointerSample {
    pub t_ms: Milliseconds,
    pub kind: PointerSampleKind,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl PointerSample {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DrawingTape {
    pub shape: ShapeKind,
    pub events: Vec<PointerSample>,
}

/// Finished round, as handed to sharing/export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub shape: ShapeKind,
    pub score: f64,
    pub rank: u32,
    pub tier: String,
    pub completeness: f64,
    pub average_deviation: f64,
    pub elapsed_ms: Milliseconds,
    pub point_count: usize,
}
