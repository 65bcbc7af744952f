use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    db::store::{FeedbackStore, MovieCatalog},
    error::{AppError, AppResult},
    models::{parse_genres, LikedEmbedding, Movie, MovieId, Swipe, SwipeOutcome},
};

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Movie columns as selected from `movies` or `match_movies(...)`
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MovieRow {
    pub id: MovieId,
    pub title: String,
    pub genres: Option<String>,
    pub poster_path: Option<String>,
    #[sqlx(default)]
    pub similarity: Option<f64>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            title: row.title,
            genres: parse_genres(row.genres.as_deref()),
            poster_path: row.poster_path,
            similarity: row.similarity,
        }
    }
}

/// Swipe log and movie catalog backed by Postgres
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FeedbackStore for PgStore {
    async fn record_swipe(&self, swipe: Swipe) -> AppResult<SwipeOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO swipes (user_id, movie_id, is_like, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(swipe.user_id)
        .bind(swipe.movie_id)
        .bind(swipe.is_like)
        .bind(swipe.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                AppError::NotFound(format!("movie {}", swipe.movie_id))
            }
            other => AppError::Database(other),
        })?;

        if result.rows_affected() == 0 {
            return Ok(SwipeOutcome::Duplicate);
        }

        Ok(SwipeOutcome::Recorded)
    }

    async fn liked_embeddings(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<LikedEmbedding>> {
        let rows = sqlx::query_as::<_, LikedEmbedding>(
            r#"
            SELECT s.movie_id, m.embedding::text AS embedding
            FROM swipes s
            JOIN movies m ON m.id = s.movie_id
            WHERE s.user_id = $1 AND s.is_like = true
            ORDER BY s.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(sql_limit::<i64>(limit)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[async_trait::async_trait]
impl MovieCatalog for PgStore {
    async fn sample(&self, limit: usize) -> AppResult<Vec<Movie>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, title, genres::text AS genres, poster_path
            FROM movies
            ORDER BY id
            LIMIT $1
            "#,
        )
        .bind(sql_limit::<i64>(limit)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }
}

/// Converts a row limit into the integer type a query binds
pub(crate) fn sql_limit<T: TryFrom<usize>>(limit: usize) -> AppResult<T> {
    T::try_from(limit)
        .map_err(|_| AppError::InvalidInput(format!("limit {} is out of range", limit)))
}
