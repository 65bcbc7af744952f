pub mod centroid;
pub mod providers;
pub mod recommendations;
pub mod swipes;

pub use recommendations::{RecommendationEngine, RecommendationSettings};
