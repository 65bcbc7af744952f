use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MovieId;

/// A single like/dislike decision; immutable once stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Swipe {
    pub user_id: Uuid,
    pub movie_id: MovieId,
    pub is_like: bool,
    pub created_at: DateTime<Utc>,
}

impl Swipe {
    pub fn new(user_id: Uuid, movie_id: MovieId, is_like: bool) -> Self {
        Self {
            user_id,
            movie_id,
            is_like,
            created_at: Utc::now(),
        }
    }
}

/// Result of storing a swipe
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwipeOutcome {
    Recorded,
    /// The (user, movie) pair was already swiped; nothing was written
    Duplicate,
}

/// A liked movie joined with its raw embedding column
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LikedEmbedding {
    pub movie_id: MovieId,
    pub embedding: Option<String>,
}

impl LikedEmbedding {
    pub fn new(movie_id: MovieId, embedding: Option<&str>) -> Self {
        Self {
            movie_id,
            embedding: embedding.map(str::to_string),
        }
    }
}
