//! Core data models for the score tracker.

mod ids;
mod player;
mod score;
mod stats;

pub use ids::*;
pub use player::*;
pub use score::*;
pub use stats::*;
