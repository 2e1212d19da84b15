pub mod config;
pub mod gameplay;
pub mod geometry;
pub mod input;
pub mod shapes;
pub mod time;

pub use shape_schema::{Point, ShapeKind};
