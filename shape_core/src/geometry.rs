use std::f64::consts::TAU;

use glam::DVec2;
use shape_schema::Point;

pub(crate) fn to_vec(p: Point) -> DVec2 {
    DVec2::new(p.x, p.y)
}

pub(crate) fn to_point(v: DVec2) -> Point {
    Point::new(v.x, v.y)
}

pub fn distance(p1: Point, p2: Point) -> f64 {
    to_vec(p1).distance(to_vec(p2))
}

/// Distance from `point` to the closed segment `[seg_start, seg_end]`.
/// A zero-length segment is treated as the single point `seg_start`.
pub fn distance_to_line_segment(point: Point, seg_start: Point, seg_end: Point) -> f64 {
    let p = to_vec(point);
    let a = to_vec(seg_start);
    let ab = to_vec(seg_end) - a;

    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Circular arc swept clockwise on screen (increasing angle, y down) from
/// `start_angle` by `sweep` radians. A sweep of `TAU` is a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl Arc {
    pub fn circle(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            start_angle: 0.0,
            sweep: TAU,
        }
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> Point {
        self.point_at(self.start_angle + self.sweep)
    }

    fn covers(&self, angle: f64) -> bool {
        if self.sweep >= TAU {
            return true;
        }
        (angle - self.start_angle).rem_euclid(TAU) <= self.sweep
    }
}

pub fn distance_to_arc(point: Point, arc: &Arc) -> f64 {
    let offset = to_vec(point) - to_vec(arc.center);
    let angle = offset.y.atan2(offset.x);

    if arc.covers(angle) {
        (offset.length() - arc.radius).abs()
    } else {
        distance(point, arc.start()).min(distance(point, arc.end()))
    }
}

/// One stroke of a reference shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Segment { start: Point, end: Point },
    Arc(Arc),
}

impl Primitive {
    pub fn distance(&self, point: Point) -> f64 {
        match self {
            Primitive::Segment { start, end } => distance_to_line_segment(point, *start, *end),
            Primitive::Arc(arc) => distance_to_arc(point, arc),
        }
    }

    /// `samples + 1` points from start to end inclusive.
    pub fn sample(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(1);
        (0..=samples)
            .map(|i| {
                let t = i as f64 / samples as f64;
                match self {
                    Primitive::Segment { start, end } => {
                        to_point(to_vec(*start).lerp(to_vec(*end), t))
                    }
                    Primitive::Arc(arc) => arc.point_at(arc.start_angle + arc.sweep * t),
                }
            })
            .collect()
    }
}

/// Closed polygon through `vertices` as a list of segments.
pub fn polygon(vertices: &[Point]) -> Vec<Primitive> {
    let n = vertices.len();
    (0..n)
        .map(|i| Primitive::Segment {
            start: vertices[i],
            end: vertices[(i + 1) % n],
        })
        .collect()
}
