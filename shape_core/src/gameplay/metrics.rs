use shape_schema::{Point, ShapeKind};

use crate::config::ScoringConfig;
use crate::geometry::distance;
use crate::shapes::{Coverage, ShapeModel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Sum over the path of each point's distance to the nearest stroke.
    pub deviation: f64,
    /// In `[0, 1]`.
    pub completeness: f64,
}

pub fn compute_metrics(path: &[Point], kind: ShapeKind) -> Metrics {
    let config = ScoringConfig::default();
    compute_metrics_with(path, &config.model(kind), &config)
}

pub fn compute_metrics_with(path: &[Point], model: &ShapeModel, config: &ScoringConfig) -> Metrics {
    let deviation = path.iter().map(|p| model.boundary_distance(*p)).sum();

    let completeness = match &model.coverage {
        Coverage::KeyPoints => {
            let threshold = config.completeness_threshold_for(model.kind);
            visited_fraction(path, &model.key_points, threshold)
        }
        Coverage::Presence(regions) => regions.score(path),
    };

    Metrics {
        deviation,
        completeness,
    }
}

fn visited_fraction(path: &[Point], key_points: &[Point], threshold: f64) -> f64 {
    if key_points.is_empty() {
        return 0.0;
    }
    let visited = key_points
        .iter()
        .filter(|k| path.iter().any(|p| distance(*p, **k) <= threshold))
        .count();
    visited as f64 / key_points.len() as f64
}
