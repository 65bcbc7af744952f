use serde::{Deserialize, Serialize};

/// Reasons an item's stored embedding cannot take part in a centroid
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum EmbeddingError {
    #[error("embedding is missing")]
    Missing,

    #[error("malformed embedding: {0}")]
    Malformed(String),

    #[error("embedding has no components")]
    Empty,
}

/// A dense feature vector describing a movie
///
/// Embeddings are stored as text (`"[0.12, -0.4, ...]"`), the same literal
/// format pgvector accepts on input, so reading one always goes through
/// [`Embedding::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Embedding(Vec<f32>);

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    /// Parses a stored embedding, rejecting empty or non-numeric input
    pub fn parse(raw: &str) -> Result<Self, EmbeddingError> {
        let values: Vec<f32> = serde_json::from_str(raw.trim())
            .map_err(|e| EmbeddingError::Malformed(e.to_string()))?;

        if values.is_empty() {
            return Err(EmbeddingError::Empty);
        }

        // f32 narrowing turns out-of-range components into infinities
        if let Some(bad) = values.iter().position(|v| !v.is_finite()) {
            return Err(EmbeddingError::Malformed(format!(
                "component {} is not a finite f32",
                bad
            )));
        }

        Ok(Self(values))
    }

    /// Parses a nullable embedding column
    pub fn from_column(raw: Option<&str>) -> Result<Self, EmbeddingError> {
        match raw {
            Some(raw) => Self::parse(raw),
            None => Err(EmbeddingError::Missing),
        }
    }

    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Renders the vector as a pgvector text literal
    pub fn to_literal(&self) -> String {
        let parts: Vec<String> = self.0.iter().map(|v| v.to_string()).collect();
        format!("[{}]", parts.join(","))
    }

    /// Cosine similarity in `[-1, 1]`; zero for mismatched or zero-length vectors
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.dimension() != other.dimension() {
            return 0.0;
        }

        let dot: f32 = self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum();
        let norm_a = self.0.iter().map(|v| v * v).sum::<f32>().sqrt();
        let norm_b = other.0.iter().map(|v| v * v).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_vector() {
        let embedding = Embedding::parse("[0.5, -1.25, 3]").unwrap();
        assert_eq!(embedding.as_slice(), &[0.5, -1.25, 3.0]);
        assert_eq!(embedding.dimension(), 3);
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        let embedding = Embedding::parse("  [1,2]\n").unwrap();
        assert_eq!(embedding.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            Embedding::parse("not a vector"),
            Err(EmbeddingError::Malformed(_))
        ));
        assert!(matches!(
            Embedding::parse("[1, \"two\"]"),
            Err(EmbeddingError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_rejects_out_of_range_components() {
        assert!(matches!(
            Embedding::parse("[1e40, 0]"),
            Err(EmbeddingError::Malformed(_))
        ));
        assert!(matches!(
            Embedding::parse("[0.5, -1e39]"),
            Err(EmbeddingError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_empty_vector() {
        assert_eq!(Embedding::parse("[]"), Err(EmbeddingError::Empty));
    }

    #[test]
    fn test_from_column_missing() {
        assert_eq!(Embedding::from_column(None), Err(EmbeddingError::Missing));
    }

    #[test]
    fn test_to_literal() {
        let embedding = Embedding::new(vec![1.0, 2.5, -0.25]);
        assert_eq!(embedding.to_literal(), "[1,2.5,-0.25]");
    }

    #[test]
    fn test_cosine_similarity() {
        let a = Embedding::new(vec![1.0, 0.0]);
        let b = Embedding::new(vec![0.0, 1.0]);
        let c = Embedding::new(vec![2.0, 0.0]);

        assert!(a.cosine_similarity(&b).abs() < 1e-6);
        assert!((a.cosine_similarity(&c) - 1.0).abs() < 1e-6);
        assert_eq!(a.cosine_similarity(&Embedding::new(vec![1.0])), 0.0);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_string(&Embedding::new(vec![1.0, 2.0])).unwrap();
        assert_eq!(json, "[1.0,2.0]");
    }
}
