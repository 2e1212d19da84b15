pub mod metrics;
pub mod rank;
pub mod round;
pub mod score;
