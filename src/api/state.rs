use std::sync::Arc;

use crate::{
    db::{FeedbackStore, MemoryStore, MovieCatalog},
    services::{providers::SimilaritySearch, RecommendationEngine, RecommendationSettings},
};

/// Shared application state
///
/// Built once at startup; every handle inside is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub feedback: Arc<dyn FeedbackStore>,
    pub engine: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(
        feedback: Arc<dyn FeedbackStore>,
        catalog: Arc<dyn MovieCatalog>,
        search: Arc<dyn SimilaritySearch>,
        settings: RecommendationSettings,
    ) -> Self {
        let engine = RecommendationEngine::new(feedback.clone(), catalog, search, settings);
        Self {
            feedback,
            engine: Arc::new(engine),
        }
    }

    /// State where one in-memory store plays every collaborator
    pub fn in_memory(store: MemoryStore, settings: RecommendationSettings) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store.clone(), store, settings)
    }
}
