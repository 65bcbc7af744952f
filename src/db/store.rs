use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{LikedEmbedding, Movie, Swipe, SwipeOutcome},
};

/// Append-only log of like/dislike decisions
///
/// Implementations enforce one swipe per (user, movie) pair and report a
/// repeat as [`SwipeOutcome::Duplicate`] instead of an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Stores a swipe unless the pair already exists
    async fn record_swipe(&self, swipe: Swipe) -> AppResult<SwipeOutcome>;

    /// Up to `limit` of the user's likes, most recent first, with the
    /// liked movie's raw embedding column
    async fn liked_embeddings(&self, user_id: Uuid, limit: usize)
        -> AppResult<Vec<LikedEmbedding>>;
}

/// Read access to the movie catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieCatalog: Send + Sync {
    /// A non-personalized selection of up to `limit` movies
    async fn sample(&self, limit: usize) -> AppResult<Vec<Movie>>;
}
