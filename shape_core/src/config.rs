use std::{collections::HashMap, fs, path::Path};

use serde::{Deserialize, Serialize};
use shape_schema::{Milliseconds, Point, ShapeKind};
use thiserror::Error;

use crate::shapes::ShapeModel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub canvas_center: Point,
    pub min_path_len: usize,
    pub completeness_threshold: f64,
    pub circle_threshold_scale: f64,
    pub star_threshold_extra: f64,
    pub low_completeness_cutoff: f64,
    pub low_completeness_factor: f64,
    pub accuracy_weight: f64,
    pub bonus_window_secs: f64,
    pub max_time_bonus: f64,
    pub penalty_after_secs: f64,
    pub penalty_per_sec: f64,
    pub max_score: f64,
    /// Overrides the built-in per-shape difficulty.
    pub difficulty: HashMap<ShapeKind, u32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            canvas_center: Point::new(150.0, 150.0),
            min_path_len: 20,
            completeness_threshold: 45.0,
            circle_threshold_scale: 1.2,
            star_threshold_extra: 10.0,
            low_completeness_cutoff: 0.7,
            low_completeness_factor: 0.6,
            accuracy_weight: 0.9,
            bonus_window_secs: 10.0,
            max_time_bonus: 15.0,
            penalty_after_secs: 15.0,
            penalty_per_sec: 0.5,
            max_score: 99.9,
            difficulty: HashMap::new(),
        }
    }
}

impl ScoringConfig {
    pub fn completeness_threshold_for(&self, kind: ShapeKind) -> f64 {
        match kind {
            ShapeKind::Circle => self.completeness_threshold * self.circle_threshold_scale,
            ShapeKind::Star => self.completeness_threshold + self.star_threshold_extra,
            _ => self.completeness_threshold,
        }
    }

    pub fn model(&self, kind: ShapeKind) -> ShapeModel {
        let model = ShapeModel::new(kind, self.canvas_center);
        match self.difficulty.get(&kind) {
            Some(&d) => model.with_difficulty(d),
            None => model,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_path_len == 0 {
            return Err(ConfigError::Invalid("scoring.min_path_len must be >= 1".into()));
        }
        if !(self.completeness_threshold > 0.0) {
            return Err(ConfigError::Invalid(
                "scoring.completeness_threshold must be > 0".into(),
            ));
        }
        if !(self.bonus_window_secs > 0.0) {
            return Err(ConfigError::Invalid("scoring.bonus_window_secs must be > 0".into()));
        }
        if !(self.max_score > 0.0) {
            return Err(ConfigError::Invalid("scoring.max_score must be > 0".into()));
        }
        let non_negative = [
            ("low_completeness_factor", self.low_completeness_factor),
            ("accuracy_weight", self.accuracy_weight),
            ("max_time_bonus", self.max_time_bonus),
            ("penalty_per_sec", self.penalty_per_sec),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("scoring.{name} must be >= 0")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoundConfig {
    pub countdown_ticks: u32,
    pub countdown_tick_ms: Milliseconds,
    pub elapsed_poll_ms: Milliseconds,
    pub default_draw_budget_ms: Milliseconds,
    pub draw_budget_ms: HashMap<ShapeKind, Milliseconds>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            countdown_ticks: 3,
            countdown_tick_ms: 1000.0,
            elapsed_poll_ms: 100.0,
            default_draw_budget_ms: 30_000.0,
            draw_budget_ms: HashMap::new(),
        }
    }
}

impl RoundConfig {
    pub fn draw_budget_for(&self, kind: ShapeKind) -> Milliseconds {
        self.draw_budget_ms
            .get(&kind)
            .copied()
            .unwrap_or(self.default_draw_budget_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.countdown_tick_ms > 0.0) {
            return Err(ConfigError::Invalid("round.countdown_tick_ms must be > 0".into()));
        }
        if !(self.elapsed_poll_ms > 0.0) {
            return Err(ConfigError::Invalid("round.elapsed_poll_ms must be > 0".into()));
        }
        let budgets = std::iter::once(&self.default_draw_budget_ms).chain(self.draw_budget_ms.values());
        for budget in budgets {
            if !(*budget > 0.0) {
                return Err(ConfigError::Invalid("round draw budgets must be > 0".into()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub scoring: ScoringConfig,
    pub round: RoundConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.scoring.validate()?;
        config.round.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&src)
    }
}
