use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::{
    db::{FeedbackStore, MovieCatalog},
    error::{AppError, AppResult},
    models::{Embedding, LikedEmbedding, Movie, NeighborQuery, Recommendations},
    services::{
        centroid::{compute_centroid, DimensionPolicy},
        providers::SimilaritySearch,
    },
};

/// Tunables for a recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationSettings {
    /// How many of the most recent likes feed the preference vector
    pub history_limit: usize,
    pub match_threshold: f32,
    pub match_count: usize,
    pub cold_start_count: usize,
    pub search_timeout: Duration,
    pub dimension_policy: DimensionPolicy,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            history_limit: 50,
            match_threshold: 0.3,
            match_count: 5,
            cold_start_count: 10,
            search_timeout: Duration::from_secs(5),
            dimension_policy: DimensionPolicy::Skip,
        }
    }
}

/// Content-based recommender over movie embeddings
///
/// A user's taste is the mean of the embeddings of their recent likes. The
/// engine asks the similarity search for unseen movies close to that mean.
/// Users with no likes get a plain catalog sample instead.
pub struct RecommendationEngine {
    feedback: Arc<dyn FeedbackStore>,
    catalog: Arc<dyn MovieCatalog>,
    search: Arc<dyn SimilaritySearch>,
    settings: RecommendationSettings,
}

impl RecommendationEngine {
    pub fn new(
        feedback: Arc<dyn FeedbackStore>,
        catalog: Arc<dyn MovieCatalog>,
        search: Arc<dyn SimilaritySearch>,
        settings: RecommendationSettings,
    ) -> Self {
        Self {
            feedback,
            catalog,
            search,
            settings,
        }
    }

    /// Generates recommendations for one user
    pub async fn get_recommendations(&self, user_id: Uuid) -> AppResult<Recommendations> {
        let start = Instant::now();

        let history = self
            .feedback
            .liked_embeddings(user_id, self.settings.history_limit)
            .await?;

        if history.is_empty() {
            let mut movies = self.catalog.sample(self.settings.cold_start_count).await?;
            movies.truncate(self.settings.cold_start_count);

            tracing::info!(
                user_id = %user_id,
                movies = movies.len(),
                "Cold start, returning catalog sample"
            );

            return Ok(Recommendations::cold_start(movies));
        }

        let embeddings = extract_embeddings(&history);

        let Some(centroid) = compute_centroid(&embeddings, self.settings.dimension_policy)? else {
            tracing::warn!(
                user_id = %user_id,
                likes = history.len(),
                "No usable embeddings in like history"
            );
            return Ok(Recommendations::no_signal());
        };

        let query = NeighborQuery {
            embedding: centroid,
            threshold: self.settings.match_threshold,
            limit: self.settings.match_count,
            exclude_user_id: user_id,
        };

        let mut movies = find_neighbors(self.search.as_ref(), query, self.settings.search_timeout)
            .await?;
        movies.truncate(self.settings.match_count);

        tracing::info!(
            user_id = %user_id,
            likes = history.len(),
            vectors = embeddings.len(),
            results = movies.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recommendations computed"
        );

        Ok(Recommendations::similarity(movies))
    }
}

/// Parses each liked movie's embedding, dropping missing or malformed ones
pub fn extract_embeddings(history: &[LikedEmbedding]) -> Vec<Embedding> {
    history
        .iter()
        .filter_map(|liked| match Embedding::from_column(liked.embedding.as_deref()) {
            Ok(embedding) => Some(embedding),
            Err(e) => {
                tracing::debug!(
                    movie_id = liked.movie_id,
                    error = %e,
                    "Skipping liked movie without usable embedding"
                );
                None
            }
        })
        .collect()
}

/// Runs a nearest-neighbor query, failing with `Timeout` once `timeout` elapses
pub async fn find_neighbors(
    search: &dyn SimilaritySearch,
    query: NeighborQuery,
    timeout: Duration,
) -> AppResult<Vec<Movie>> {
    let provider = search.name();

    match tokio::time::timeout(timeout, search.search(query)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                provider,
                timeout_ms = timeout.as_millis() as u64,
                "Similarity search timed out"
            );
            Err(AppError::Timeout(format!(
                "similarity search ({}) exceeded {:?}",
                provider, timeout
            )))
        }
    }
}
