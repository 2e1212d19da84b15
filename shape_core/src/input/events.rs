use shape_schema::{Point, PointerSample, PointerSampleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Pointer sample already translated into canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Down, position: Point::new(x, y) }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self { kind: PointerKind::Move, position: Point::new(x, y) }
    }

    pub fn up() -> Self {
        Self { kind: PointerKind::Up, position: Point::default() }
    }

    pub fn leave() -> Self {
        Self { kind: PointerKind::Leave, position: Point::default() }
    }
}

impl From<PointerSample> for PointerEvent {
    fn from(sample: PointerSample) -> Self {
        let kind = match sample.kind {
            PointerSampleKind::Down => PointerKind::Down,
            PointerSampleKind::Move => PointerKind::Move,
            PointerSampleKind::Up => PointerKind::Up,
            PointerSampleKind::Leave => PointerKind::Leave,
        };
        Self { kind, position: sample.position() }
    }
}
