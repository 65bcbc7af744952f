/// Nearest-neighbor search providers
///
/// The search service owns the similarity metric and the index. Callers hand
/// it a query vector and get back movies ordered most-similar first, with the
/// user's already-swiped movies filtered out.
use crate::{
    error::AppResult,
    models::{Movie, NeighborQuery},
};

pub mod postgres;
pub mod supabase;

/// Name of the SQL/RPC function both providers call
pub const MATCH_FUNCTION: &str = "match_movies";

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SimilaritySearch: Send + Sync {
    /// Movies whose similarity to `query.embedding` is at least the threshold,
    /// most similar first, at most `query.limit` of them
    async fn search(&self, query: NeighborQuery) -> AppResult<Vec<Movie>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
