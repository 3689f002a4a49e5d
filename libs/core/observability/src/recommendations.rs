//! Metrics for the outfit recommendation flow.

use metrics::{counter, histogram};
use std::time::Duration;

/// Recommendation metrics recorder
pub struct RecommendationMetrics;

impl RecommendationMetrics {
    /// Record the final outcome of one recommendation request.
    ///
    /// `outcome` is one of `success`, `invalid_argument`, `not_found`, `internal`.
    pub fn record_outcome(strategy: &str, outcome: &str) {
        counter!(
            "outfit_recommendations_total",
            "strategy" => strategy.to_string(),
            "outcome" => outcome.to_string()
        )
        .increment(1);
    }

    /// Record one call to an external collaborator (vision, firestore, vector index, embedder).
    pub fn record_collaborator_call(collaborator: &'static str, elapsed: Duration, ok: bool) {
        histogram!(
            "outfit_collaborator_duration_seconds",
            "collaborator" => collaborator
        )
        .record(elapsed.as_secs_f64());

        if !ok {
            counter!(
                "outfit_collaborator_errors_total",
                "collaborator" => collaborator
            )
            .increment(1);
        }

        tracing::debug!(
            collaborator,
            elapsed_ms = elapsed.as_millis() as u64,
            ok,
            "Collaborator call finished"
        );
    }

    /// Record how many labels the detector returned for an image.
    pub fn record_labels_detected(count: usize) {
        histogram!("outfit_labels_detected").record(count as f64);
    }

    /// Record how many neighbor ids were dropped because the store had no record for them.
    pub fn record_missing_neighbors(count: usize) {
        if count > 0 {
            counter!("outfit_missing_neighbor_items_total").increment(count as u64);
        }
    }
}
