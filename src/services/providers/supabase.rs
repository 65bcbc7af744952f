/// Supabase RPC provider
///
/// Calls the same `match_movies` function as the Postgres provider, but through
/// PostgREST: `POST {project_url}/rest/v1/rpc/match_movies` with the parameters
/// as a JSON object. Useful when the service has no direct database access.
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{parse_genres, Movie, MovieId, NeighborQuery},
    services::providers::{SimilaritySearch, MATCH_FUNCTION},
};

#[derive(Clone)]
pub struct SupabaseProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

/// A row as PostgREST serializes it
#[derive(Debug, Clone, Deserialize)]
struct RpcMovie {
    id: MovieId,
    title: String,
    /// jsonb arrives as an array, text columns as an encoded string
    #[serde(default)]
    genres: Value,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    similarity: Option<f64>,
}

impl From<RpcMovie> for Movie {
    fn from(row: RpcMovie) -> Self {
        let genres = match row.genres {
            Value::String(raw) => parse_genres(Some(&raw)),
            Value::Array(items) => items
                .into_iter()
                .filter_map(|g| g.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };

        Movie {
            id: row.id,
            title: row.title,
            genres,
            poster_path: row.poster_path,
            similarity: row.similarity,
        }
    }
}

impl SupabaseProvider {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn rpc_url(&self) -> String {
        format!("{}/rest/v1/rpc/{}", self.api_url, MATCH_FUNCTION)
    }

    fn rpc_body(query: &NeighborQuery) -> Value {
        json!({
            "query_embedding": query.embedding,
            "match_threshold": query.threshold,
            "match_count": query.limit,
            "user_id_input": query.exclude_user_id,
        })
    }
}

#[async_trait::async_trait]
impl SimilaritySearch for SupabaseProvider {
    async fn search(&self, query: NeighborQuery) -> AppResult<Vec<Movie>> {
        let response = self
            .http_client
            .post(self.rpc_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&Self::rpc_body(&query))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body,
                provider = self.name(),
                "Supabase RPC request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "Supabase RPC returned status {}: {}",
                status, body
            )));
        }

        let rows: Vec<RpcMovie> = response.json().await?;

        tracing::debug!(
            results = rows.len(),
            provider = self.name(),
            "match_movies returned"
        );

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Embedding;
    use uuid::Uuid;

    #[test]
    fn test_rpc_url_strips_trailing_slash() {
        let provider = SupabaseProvider::new(
            "https://demo.supabase.co/".to_string(),
            "anon".to_string(),
        );
        assert_eq!(
            provider.rpc_url(),
            "https://demo.supabase.co/rest/v1/rpc/match_movies"
        );
    }

    #[test]
    fn test_rpc_body_uses_function_parameter_names() {
        let user_id = Uuid::new_v4();
        let query = NeighborQuery {
            embedding: Embedding::new(vec![1.0, 2.0]),
            threshold: 0.5,
            limit: 5,
            exclude_user_id: user_id,
        };

        let body = SupabaseProvider::rpc_body(&query);
        assert_eq!(body["query_embedding"], json!([1.0, 2.0]));
        assert_eq!(body["match_threshold"], 0.5);
        assert_eq!(body["match_count"], 5);
        assert_eq!(body["user_id_input"], user_id.to_string());
    }

    #[test]
    fn test_rpc_movie_deserialization() {
        let json = r#"[
            {"id": 1, "title": "Heat", "genres": ["Crime", "Thriller"], "similarity": 0.71},
            {"id": 2, "title": "Ronin", "genres": "[\"Action\"]", "poster_path": "/r.jpg"},
            {"id": 3, "title": "Collateral", "genres": null}
        ]"#;

        let rows: Vec<RpcMovie> = serde_json::from_str(json).unwrap();
        let movies: Vec<Movie> = rows.into_iter().map(Movie::from).collect();

        assert_eq!(movies[0].genres, vec!["Crime".to_string(), "Thriller".to_string()]);
        assert_eq!(movies[0].similarity, Some(0.71));
        assert_eq!(movies[1].genres, vec!["Action".to_string()]);
        assert_eq!(movies[1].poster_path.as_deref(), Some("/r.jpg"));
        assert!(movies[2].genres.is_empty());
    }
}
