//! Wires the Google collaborators into the recommendation service.

use axum::Router;
use domain_outfits::{
    FirestoreItemRepository, RecommendationService, RecommendationSettings, VertexTextEmbedder,
    VertexVectorIndex, VisionLabelDetector, handlers,
};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> eyre::Result<Router> {
    let outfit = &state.config.outfit;

    let detector = Arc::new(VisionLabelDetector::new(
        state.auth.clone(),
        outfit.vision_max_labels,
    ));
    let repository = FirestoreItemRepository::new(state.auth.clone(), outfit.firestore.clone());

    let mut service =
        RecommendationService::new(repository, detector, RecommendationSettings::from(outfit));

    if let Some(ref vector) = outfit.vector {
        info!(
            endpoint = %vector.index_endpoint_id,
            deployed_index = %vector.deployed_index_id,
            dimensions = vector.dimensions,
            "Similarity search enabled"
        );
        service = service.with_similarity(
            Arc::new(VertexVectorIndex::new(state.auth.clone(), vector.clone())),
            Arc::new(VertexTextEmbedder::new(state.auth.clone(), vector)),
        );
    }

    service.check_collaborators()?;
    info!(strategy = %service.strategy(), "Recommendation service ready");

    Ok(handlers::router(service))
}
