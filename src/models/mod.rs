use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod embedding;
pub mod movie;
pub mod swipe;

pub use embedding::{Embedding, EmbeddingError};
pub use movie::{parse_genres, Movie, MovieId, MovieRecord};
pub use swipe::{LikedEmbedding, Swipe, SwipeOutcome};

// ============================================================================
// Recommendation Types
// ============================================================================

/// Which path produced a recommendation list
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// The user has no likes yet; movies are a non-personalized sample
    ColdStart,
    /// Movies came from a nearest-neighbor search around the user's centroid
    Similarity,
    /// The user has likes, but none carried a usable embedding
    NoSignal,
}

/// Response body for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub source: RecommendationSource,
    pub movies: Vec<Movie>,
}

impl Recommendations {
    pub fn cold_start(movies: Vec<Movie>) -> Self {
        Self {
            source: RecommendationSource::ColdStart,
            movies,
        }
    }

    pub fn similarity(movies: Vec<Movie>) -> Self {
        Self {
            source: RecommendationSource::Similarity,
            movies,
        }
    }

    pub fn no_signal() -> Self {
        Self {
            source: RecommendationSource::NoSignal,
            movies: Vec::new(),
        }
    }
}

/// Parameters for a nearest-neighbor lookup
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborQuery {
    pub embedding: Embedding,
    /// Minimum similarity a candidate must reach
    pub threshold: f32,
    pub limit: usize,
    /// Movies this user has swiped on are never returned
    pub exclude_user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_source_serialization() {
        assert_eq!(
            serde_json::to_string(&RecommendationSource::ColdStart).unwrap(),
            "\"cold_start\""
        );
        assert_eq!(
            serde_json::to_string(&RecommendationSource::NoSignal).unwrap(),
            "\"no_signal\""
        );
    }

    #[test]
    fn test_no_signal_is_empty() {
        let recommendations = Recommendations::no_signal();
        assert_eq!(recommendations.source, RecommendationSource::NoSignal);
        assert!(recommendations.movies.is_empty());
    }

    #[test]
    fn test_recommendations_body_shape() {
        let body = serde_json::to_value(Recommendations::similarity(vec![
            Movie::new(1, "Alien").with_similarity(0.91),
        ]))
        .unwrap();

        assert_eq!(body["source"], "similarity");
        assert_eq!(body["movies"][0]["title"], "Alien");
        assert_eq!(body["movies"][0]["similarity"], 0.91);
    }
}
