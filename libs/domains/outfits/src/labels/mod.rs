//! Label detection: image URI in, descriptive labels out.

mod vision;

use async_trait::async_trait;

use crate::error::OutfitResult;
use crate::models::Label;

pub use vision::VisionLabelDetector;

/// Trait for image label detectors
///
/// Implementations return labels ordered by descending confidence.
/// An image with nothing recognizable yields an empty list, not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels for the image at a `gs://bucket/path` URI
    async fn detect_labels(&self, image_uri: &str) -> OutfitResult<Vec<Label>>;
}
