/// Similarity search through the `match_movies` SQL function
///
/// The function lives next to the pgvector index and is expected to return
/// `id, title, genres, poster_path, similarity` ordered by similarity, skipping
/// every movie the given user has swiped on.
use sqlx::PgPool;

use crate::{
    db::postgres::{sql_limit, MovieRow},
    error::AppResult,
    models::{Movie, NeighborQuery},
    services::providers::SimilaritySearch,
};

#[derive(Clone)]
pub struct PgMatchProvider {
    pool: PgPool,
}

impl PgMatchProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl SimilaritySearch for PgMatchProvider {
    async fn search(&self, query: NeighborQuery) -> AppResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, genres::text AS genres, poster_path,
                   similarity::float8 AS similarity
            FROM match_movies($1::text::vector, $2::float, $3::int, $4)
            "#,
        )
        .bind(query.embedding.to_literal())
        .bind(f64::from(query.threshold))
        .bind(sql_limit::<i32>(query.limit)?)
        .bind(query.exclude_user_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            results = rows.len(),
            provider = self.name(),
            "match_movies returned"
        );

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
