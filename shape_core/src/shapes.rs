use std::f64::consts::{FRAC_PI_2, PI, TAU};

use shape_schema::{Point, ShapeKind};

use crate::geometry::{polygon, Arc, Primitive};

pub const CIRCLE_RADIUS: f64 = 85.0;
pub const TRIANGLE_HALF_BASE: f64 = 85.0;
pub const TRIANGLE_APEX_RISE: f64 = 85.0;
pub const TRIANGLE_BASE_DROP: f64 = 55.0;
pub const SQUARE_HALF_EXTENT: f64 = 55.0;
pub const STAR_OUTER_RADIUS: f64 = 85.0;
pub const STAR_INNER_RADIUS: f64 = 40.0;
pub const DIAMOND_SIZE: f64 = 85.0;
pub const DIAMOND_GIRDLE_RATIO: f64 = 0.2;
pub const DIAMOND_TABLE_RATIO: f64 = 0.6;
pub const UMBRELLA_CANOPY_RADIUS: f64 = 85.0;
pub const UMBRELLA_CANOPY_LIFT: f64 = 10.0;
pub const UMBRELLA_HANDLE_LENGTH: f64 = 80.0;
pub const UMBRELLA_HOOK_RADIUS: f64 = 15.0;

/// Tolerance weight used by the score composer. Star and diamond have no
/// established value and sit between square and umbrella.
pub fn default_difficulty(kind: ShapeKind) -> u32 {
    match kind {
        ShapeKind::Circle => 1,
        ShapeKind::Triangle | ShapeKind::Square => 2,
        ShapeKind::Star | ShapeKind::Diamond => 3,
        ShapeKind::Umbrella => 4,
    }
}

/// How a shape decides whether the whole figure was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage {
    /// Fraction of `ShapeModel::key_points` that a path came near.
    KeyPoints,
    /// Weighted top/middle/bottom presence.
    Presence(PresenceRegions),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceRegions {
    /// A point above this y counts as the top part.
    pub top_below: f64,
    pub middle_x: f64,
    pub middle_half_width: f64,
    pub middle_top: f64,
    pub middle_bottom: f64,
    /// A point below this y counts as the bottom part.
    pub bottom_above: f64,
}

impl PresenceRegions {
    pub const TOP_WEIGHT: f64 = 0.5;
    pub const MIDDLE_WEIGHT: f64 = 0.3;
    pub const BOTTOM_WEIGHT: f64 = 0.2;

    pub fn score(&self, path: &[Point]) -> f64 {
        let has_top = path.iter().any(|p| p.y < self.top_below);
        let has_middle = path.iter().any(|p| {
            (p.x - self.middle_x).abs() <= self.middle_half_width
                && p.y >= self.middle_top
                && p.y <= self.middle_bottom
        });
        let has_bottom = path.iter().any(|p| p.y > self.bottom_above);

        let mut score = 0.0;
        if has_top {
            score += Self::TOP_WEIGHT;
        }
        if has_middle {
            score += Self::MIDDLE_WEIGHT;
        }
        if has_bottom {
            score += Self::BOTTOM_WEIGHT;
        }
        score
    }
}

/// Reference geometry for one shape, anchored at a canvas center.
/// Scoring and guide rendering both read from this.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeModel {
    pub kind: ShapeKind,
    pub center: Point,
    pub primitives: Vec<Primitive>,
    pub key_points: Vec<Point>,
    pub coverage: Coverage,
    pub difficulty: u32,
}

impl ShapeModel {
    pub fn new(kind: ShapeKind, center: Point) -> Self {
        let (primitives, key_points, coverage) = match kind {
            ShapeKind::Circle => circle(center),
            ShapeKind::Triangle => closed(triangle_vertices(center)),
            ShapeKind::Square => closed(square_vertices(center)),
            ShapeKind::Umbrella => umbrella(center),
            ShapeKind::Star => star(center),
            ShapeKind::Diamond => closed(diamond_vertices(center)),
        };

        Self {
            kind,
            center,
            primitives,
            key_points,
            coverage,
            difficulty: default_difficulty(kind),
        }
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Minimum distance from `point` to any stroke of the shape.
    pub fn boundary_distance(&self, point: Point) -> f64 {
        self.primitives
            .iter()
            .map(|p| p.distance(point))
            .fold(f64::INFINITY, f64::min)
    }

    /// Polyline for the guide and "perfect shape" overlays, piece by piece.
    pub fn outline(&self, samples_per_piece: usize) -> Vec<Point> {
        let mut out: Vec<Point> = Vec::new();
        for primitive in &self.primitives {
            let pts = primitive.sample(samples_per_piece);
            // Skip the shared joint between consecutive pieces.
            let skip = usize::from(out.last() == pts.first());
            out.extend(pts.into_iter().skip(skip));
        }
        out
    }
}

fn circle(center: Point) -> (Vec<Primitive>, Vec<Point>, Coverage) {
    let arc = Arc::circle(center, CIRCLE_RADIUS);
    let key_points = (0..4)
        .map(|i| arc.point_at(i as f64 * FRAC_PI_2))
        .collect();
    (vec![Primitive::Arc(arc)], key_points, Coverage::KeyPoints)
}

fn closed(vertices: Vec<Point>) -> (Vec<Primitive>, Vec<Point>, Coverage) {
    (polygon(&vertices), vertices, Coverage::KeyPoints)
}

pub fn triangle_vertices(c: Point) -> Vec<Point> {
    vec![
        Point::new(c.x, c.y - TRIANGLE_APEX_RISE),
        Point::new(c.x + TRIANGLE_HALF_BASE, c.y + TRIANGLE_BASE_DROP),
        Point::new(c.x - TRIANGLE_HALF_BASE, c.y + TRIANGLE_BASE_DROP),
    ]
}

pub fn square_vertices(c: Point) -> Vec<Point> {
    let h = SQUARE_HALF_EXTENT;
    vec![
        Point::new(c.x - h, c.y - h),
        Point::new(c.x + h, c.y - h),
        Point::new(c.x + h, c.y + h),
        Point::new(c.x - h, c.y + h),
    ]
}

/// Ten vertices alternating outer tip / inner notch, starting at the top tip.
pub fn star_vertices(c: Point) -> Vec<Point> {
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 {
                STAR_OUTER_RADIUS
            } else {
                STAR_INNER_RADIUS
            };
            let angle = -FRAC_PI_2 + i as f64 * (TAU / 10.0);
            Point::new(c.x + radius * angle.cos(), c.y + radius * angle.sin())
        })
        .collect()
}

fn star(center: Point) -> (Vec<Primitive>, Vec<Point>, Coverage) {
    let vertices = star_vertices(center);
    let tips = vertices.iter().step_by(2).copied().collect();
    (polygon(&vertices), tips, Coverage::KeyPoints)
}

/// Table-left, table-right, girdle-right, bottom tip, girdle-left.
pub fn diamond_vertices(c: Point) -> Vec<Point> {
    let table_y = c.y - DIAMOND_SIZE / 2.0;
    let girdle_y = table_y + DIAMOND_SIZE * DIAMOND_GIRDLE_RATIO;
    let table_half = DIAMOND_SIZE * DIAMOND_TABLE_RATIO;
    vec![
        Point::new(c.x - table_half, table_y),
        Point::new(c.x + table_half, table_y),
        Point::new(c.x + DIAMOND_SIZE, girdle_y),
        Point::new(c.x, c.y + DIAMOND_SIZE),
        Point::new(c.x - DIAMOND_SIZE, girdle_y),
    ]
}

fn umbrella(c: Point) -> (Vec<Primitive>, Vec<Point>, Coverage) {
    let canopy_center = Point::new(c.x, c.y - UMBRELLA_CANOPY_LIFT);
    let handle_end = Point::new(c.x, canopy_center.y + UMBRELLA_HANDLE_LENGTH);

    // Upper half: angles from -PI to 0 with y pointing down.
    let canopy = Arc {
        center: canopy_center,
        radius: UMBRELLA_CANOPY_RADIUS,
        start_angle: -PI,
        sweep: PI,
    };
    // Lower half, curling left from the handle end.
    let hook = Arc {
        center: Point::new(handle_end.x - UMBRELLA_HOOK_RADIUS, handle_end.y),
        radius: UMBRELLA_HOOK_RADIUS,
        start_angle: 0.0,
        sweep: PI,
    };

    let regions = PresenceRegions {
        top_below: canopy_center.y - UMBRELLA_CANOPY_RADIUS / 2.0,
        middle_x: c.x,
        middle_half_width: 45.0,
        middle_top: canopy_center.y,
        middle_bottom: handle_end.y,
        bottom_above: handle_end.y - 10.0,
    };

    (
        vec![
            Primitive::Arc(canopy),
            Primitive::Segment {
                start: canopy_center,
                end: handle_end,
            },
            Primitive::Arc(hook),
        ],
        Vec::new(),
        Coverage::Presence(regions),
    )
}
