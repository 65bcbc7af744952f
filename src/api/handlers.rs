use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieId, Recommendations, SwipeOutcome},
    services::swipes,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwipeRequest {
    pub user_id: Uuid,
    pub movie_id: MovieId,
    pub is_like: bool,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SwipeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub duplicate: bool,
}

impl From<SwipeOutcome> for SwipeResponse {
    fn from(outcome: SwipeOutcome) -> Self {
        match outcome {
            SwipeOutcome::Recorded => Self {
                success: true,
                duplicate: false,
            },
            SwipeOutcome::Duplicate => Self {
                success: false,
                duplicate: true,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub user_id: Uuid,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Stores one like/dislike
///
/// A repeat swipe is a soft rejection: still 200, with `success: false`.
pub async fn swipe(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SwipeRequest>,
) -> AppResult<Json<SwipeResponse>> {
    tracing::debug!(
        request_id = %request_id,
        user_id = %request.user_id,
        movie_id = request.movie_id,
        "Processing swipe"
    );

    let outcome = swipes::record_swipe(
        state.feedback.as_ref(),
        request.user_id,
        request.movie_id,
        request.is_like,
    )
    .await?;

    Ok(Json(SwipeResponse::from(outcome)))
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<Recommendations>> {
    tracing::info!(
        request_id = %request_id,
        user_id = %request.user_id,
        "Processing recommendation request"
    );

    let recommendations = state.engine.get_recommendations(request.user_id).await?;

    Ok(Json(recommendations))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swipe_request_uses_camel_case() {
        let request: SwipeRequest = serde_json::from_str(
            r#"{"userId": "6f1c1c4e-3b9a-4c44-9a59-0b8f8f0e2c11", "movieId": 550, "isLike": true}"#,
        )
        .unwrap();

        assert_eq!(request.movie_id, 550);
        assert!(request.is_like);
    }

    #[test]
    fn test_swipe_response_bodies() {
        assert_eq!(
            serde_json::to_value(SwipeResponse::from(SwipeOutcome::Recorded)).unwrap(),
            json!({ "success": true })
        );
        assert_eq!(
            serde_json::to_value(SwipeResponse::from(SwipeOutcome::Duplicate)).unwrap(),
            json!({ "success": false, "duplicate": true })
        );
    }
}
