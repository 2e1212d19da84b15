use serde::{Deserialize, Serialize};
use shape_schema::{Milliseconds, Point, ShapeKind};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::gameplay::metrics::{compute_metrics_with, Metrics};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScoreTier {
    Perfect,
    Excellent,
    Great,
    Good,
    Fair,
    Poor,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            ScoreTier::Perfect
        } else if score >= 85.0 {
            ScoreTier::Excellent
        } else if score >= 70.0 {
            ScoreTier::Great
        } else if score >= 50.0 {
            ScoreTier::Good
        } else if score >= 25.0 {
            ScoreTier::Fair
        } else {
            ScoreTier::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Perfect => "perfect",
            ScoreTier::Excellent => "excellent",
            ScoreTier::Great => "great",
            ScoreTier::Good => "good",
            ScoreTier::Fair => "fair",
            ScoreTier::Poor => "poor",
        }
    }
}

/// Score plus the intermediate values it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub score: f64,
    /// `None` when the path was too short to measure.
    pub metrics: Option<Metrics>,
    pub average_deviation: f64,
}

pub fn compose_score(path: &[Point], kind: ShapeKind, elapsed_ms: Milliseconds) -> f64 {
    compose_score_with(path, kind, elapsed_ms, &ScoringConfig::default())
}

pub fn compose_score_with(
    path: &[Point],
    kind: ShapeKind,
    elapsed_ms: Milliseconds,
    config: &ScoringConfig,
) -> f64 {
    evaluate(path, kind, elapsed_ms, config).score
}

pub fn evaluate(
    path: &[Point],
    kind: ShapeKind,
    elapsed_ms: Milliseconds,
    config: &ScoringConfig,
) -> Evaluation {
    if path.len() < config.min_path_len {
        debug!(shape = %kind, points = path.len(), "path too short, scoring 0");
        return Evaluation {
            score: 0.0,
            metrics: None,
            average_deviation: 0.0,
        };
    }

    let model = config.model(kind);
    let metrics = compute_metrics_with(path, &model, config);

    let average_deviation = metrics.deviation / path.len() as f64;
    let max_deviation = 15.0 + model.difficulty as f64 * 10.0;
    let mut accuracy = (100.0 - (average_deviation / max_deviation) * 100.0).max(0.0);

    accuracy *= metrics.completeness * metrics.completeness;
    if metrics.completeness < config.low_completeness_cutoff {
        accuracy *= config.low_completeness_factor;
    }

    let seconds = elapsed_ms / 1000.0;
    let time_bonus = (1.0 - seconds / config.bonus_window_secs).max(0.0) * config.max_time_bonus;
    let final_score = accuracy * config.accuracy_weight + time_bonus;
    let time_penalty = (seconds - config.penalty_after_secs).max(0.0) * config.penalty_per_sec;

    let score = (final_score - time_penalty).clamp(0.0, config.max_score);
    debug!(
        shape = %kind,
        points = path.len(),
        average_deviation,
        completeness = metrics.completeness,
        score,
        "scored path"
    );

    Evaluation {
        score,
        metrics: Some(metrics),
        average_deviation,
    }
}
