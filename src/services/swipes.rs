use uuid::Uuid;

use crate::{
    db::FeedbackStore,
    error::AppResult,
    models::{MovieId, Swipe, SwipeOutcome},
};

/// Records a like or dislike
///
/// A repeat swipe on the same movie is reported as `Duplicate` and leaves the
/// original decision in place.
pub async fn record_swipe(
    feedback: &dyn FeedbackStore,
    user_id: Uuid,
    movie_id: MovieId,
    is_like: bool,
) -> AppResult<SwipeOutcome> {
    let outcome = feedback
        .record_swipe(Swipe::new(user_id, movie_id, is_like))
        .await?;

    match outcome {
        SwipeOutcome::Recorded => {
            tracing::info!(user_id = %user_id, movie_id, is_like, "Swipe recorded");
        }
        SwipeOutcome::Duplicate => {
            tracing::debug!(user_id = %user_id, movie_id, "Ignoring repeat swipe");
        }
    }

    Ok(outcome)
}
