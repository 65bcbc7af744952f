use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::store::{FeedbackStore, MovieCatalog},
    error::{AppError, AppResult},
    models::{
        Embedding, LikedEmbedding, Movie, MovieId, MovieRecord, NeighborQuery, Swipe,
        SwipeOutcome,
    },
    services::providers::SimilaritySearch,
};

/// In-process store implementing every collaborator the engine needs
///
/// Movies keep their embedding text exactly as a database column would, so
/// the engine's parse step runs unchanged against this backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Catalog in insertion order
    movies: Vec<MovieRecord>,
    /// Swipe log in arrival order
    swipes: Vec<Swipe>,
    swiped: HashSet<(Uuid, MovieId)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<MovieRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner {
                movies,
                ..Default::default()
            })),
        }
    }

    /// Loads a JSON array of movie records
    pub fn from_seed_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let movies: Vec<MovieRecord> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path, movies = movies.len(), "Loaded movie seed file");
        Ok(Self::with_movies(movies))
    }

    /// Number of stored swipes for one user
    pub async fn swipe_count(&self, user_id: Uuid) -> usize {
        let inner = self.inner.read().await;
        inner.swipes.iter().filter(|s| s.user_id == user_id).count()
    }
}

#[async_trait::async_trait]
impl FeedbackStore for MemoryStore {
    async fn record_swipe(&self, swipe: Swipe) -> AppResult<SwipeOutcome> {
        let mut inner = self.inner.write().await;

        if !inner.movies.iter().any(|m| m.movie.id == swipe.movie_id) {
            return Err(AppError::NotFound(format!("movie {}", swipe.movie_id)));
        }

        if !inner.swiped.insert((swipe.user_id, swipe.movie_id)) {
            return Ok(SwipeOutcome::Duplicate);
        }

        inner.swipes.push(swipe);
        Ok(SwipeOutcome::Recorded)
    }

    async fn liked_embeddings(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<LikedEmbedding>> {
        let inner = self.inner.read().await;
        let embeddings: HashMap<MovieId, Option<&str>> = inner
            .movies
            .iter()
            .map(|m| (m.movie.id, m.embedding.as_deref()))
            .collect();

        let liked = inner
            .swipes
            .iter()
            .rev()
            .filter(|s| s.user_id == user_id && s.is_like)
            .take(limit)
            .map(|s| {
                LikedEmbedding::new(s.movie_id, embeddings.get(&s.movie_id).copied().flatten())
            })
            .collect();

        Ok(liked)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for MemoryStore {
    async fn sample(&self, limit: usize) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;
        Ok(inner
            .movies
            .iter()
            .take(limit)
            .map(|m| m.movie.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl SimilaritySearch for MemoryStore {
    async fn search(&self, query: NeighborQuery) -> AppResult<Vec<Movie>> {
        let inner = self.inner.read().await;

        let mut scored: Vec<(f32, &MovieRecord)> = inner
            .movies
            .iter()
            .filter(|m| !inner.swiped.contains(&(query.exclude_user_id, m.movie.id)))
            .filter_map(|m| {
                let embedding = Embedding::from_column(m.embedding.as_deref()).ok()?;
                Some((query.embedding.cosine_similarity(&embedding), m))
            })
            .filter(|(similarity, _)| *similarity >= query.threshold)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(query.limit)
            .map(|(similarity, m)| m.movie.clone().with_similarity(f64::from(similarity)))
            .collect())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
