use std::sync::Arc;

use crate::{
    cached,
    db::{store::MovieCatalog, Cache, CacheKey},
    error::AppResult,
    models::Movie,
};

const SAMPLE_CACHE_TTL: u64 = 600; // 10 minutes

/// Catalog decorator that serves the cold-start sample from Redis
///
/// The sample is the same for every new user, so one query per TTL window
/// is enough.
pub struct CachedCatalog {
    inner: Arc<dyn MovieCatalog>,
    cache: Cache,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn MovieCatalog>, cache: Cache) -> Self {
        Self { inner, cache }
    }
}

#[async_trait::async_trait]
impl MovieCatalog for CachedCatalog {
    async fn sample(&self, limit: usize) -> AppResult<Vec<Movie>> {
        cached!(
            self.cache,
            CacheKey::ColdStartSample(limit),
            SAMPLE_CACHE_TTL,
            async move {
                let movies = self.inner.sample(limit).await?;
                tracing::debug!(movies = movies.len(), "Cold-start sample loaded from catalog");
                AppResult::Ok(movies)
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_redis_client, store::MockMovieCatalog};

    #[tokio::test]
    async fn test_sample_survives_unreachable_redis() {
        // nothing listens on port 1, so every cache read fails
        let client = create_redis_client("redis://127.0.0.1:1").unwrap();
        let (cache, _handle) = Cache::new(client);

        let mut inner = MockMovieCatalog::new();
        inner
            .expect_sample()
            .withf(|limit| *limit == 2)
            .times(1)
            .returning(|_| Ok(vec![Movie::new(1, "Heat"), Movie::new(2, "Ronin")]));

        let catalog = CachedCatalog::new(Arc::new(inner), cache);
        let movies = catalog.sample(2).await.unwrap();

        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
