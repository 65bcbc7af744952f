use serde::{Deserialize, Serialize};

/// Catalog identifier for a movie
pub type MovieId = i64;

/// A movie as returned to the client
///
/// Display attributes are passed through untouched. `similarity` is only
/// present on rows produced by a nearest-neighbor search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: Vec::new(),
            poster_path: None,
            similarity: None,
        }
    }

    pub fn with_similarity(mut self, similarity: f64) -> Self {
        self.similarity = Some(similarity);
        self
    }
}

/// Decodes a genres column stored as a JSON array of strings
///
/// Anything else (null, a bare string, mixed element types) yields no genres;
/// genres are display-only and never fail a request.
pub fn parse_genres(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(genres) => genres,
        Err(e) => {
            tracing::debug!(error = %e, raw = %raw, "Ignoring unparseable genres column");
            Vec::new()
        }
    }
}

/// A catalog row including its stored embedding text
///
/// Used to seed the in-memory backend; the Postgres backend never loads
/// embeddings into this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub embedding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_omitted_when_absent() {
        let json = serde_json::to_value(Movie::new(603, "The Matrix")).unwrap();
        assert_eq!(json["title"], "The Matrix");
        assert!(json.get("similarity").is_none());
    }

    #[test]
    fn test_parse_genres() {
        assert_eq!(
            parse_genres(Some(r#"["Drama","Crime"]"#)),
            vec!["Drama".to_string(), "Crime".to_string()]
        );
        assert!(parse_genres(Some("Drama")).is_empty());
        assert!(parse_genres(Some("[1, 2]")).is_empty());
        assert!(parse_genres(None).is_empty());
    }

    #[test]
    fn test_movie_record_flattens_movie_fields() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "genres": ["Action", "Science Fiction"],
            "poster_path": "/inception.jpg",
            "embedding": "[0.1, 0.2]"
        }"#;

        let record: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.movie.id, 27205);
        assert_eq!(record.movie.genres.len(), 2);
        assert_eq!(record.movie.similarity, None);
        assert_eq!(record.embedding.as_deref(), Some("[0.1, 0.2]"));
    }
}
