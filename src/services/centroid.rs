use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Embedding,
};

/// What to do with a vector whose length differs from the first one seen
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DimensionPolicy {
    /// Leave the vector out of the average and log a warning
    #[default]
    Skip,
    /// Fail the whole computation
    Reject,
}

/// Computes the element-wise mean of a set of embeddings
///
/// The dimension is fixed by the first vector. Returns `Ok(None)` when no
/// vector survives, which callers treat as "no usable signal".
pub fn compute_centroid(
    embeddings: &[Embedding],
    policy: DimensionPolicy,
) -> AppResult<Option<Embedding>> {
    let Some(first) = embeddings.first() else {
        return Ok(None);
    };

    let dimension = first.dimension();
    // f64 accumulator keeps the mean stable across input orderings
    let mut sums = vec![0.0_f64; dimension];
    let mut count = 0usize;

    for embedding in embeddings {
        if embedding.dimension() != dimension {
            match policy {
                DimensionPolicy::Skip => {
                    tracing::warn!(
                        expected = dimension,
                        got = embedding.dimension(),
                        "Skipping embedding with mismatched dimension"
                    );
                    continue;
                }
                DimensionPolicy::Reject => {
                    return Err(AppError::DimensionMismatch {
                        expected: dimension,
                        got: embedding.dimension(),
                    });
                }
            }
        }

        for (sum, value) in sums.iter_mut().zip(embedding.as_slice()) {
            *sum += f64::from(*value);
        }
        count += 1;
    }

    let mean = sums
        .into_iter()
        .map(|sum| (sum / count as f64) as f32)
        .collect::<Vec<f32>>();

    Ok(Some(Embedding::new(mean)))
}
