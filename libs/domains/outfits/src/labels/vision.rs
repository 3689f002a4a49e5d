use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LabelDetector;
use crate::error::{OutfitError, OutfitResult};
use crate::google::{GoogleAuth, describe_failure};
use crate::models::Label;

const ANNOTATE_URL: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Cloud Vision `LABEL_DETECTION` client
pub struct VisionLabelDetector {
    auth: GoogleAuth,
    max_results: u32,
}

impl VisionLabelDetector {
    pub fn new(auth: GoogleAuth, max_results: u32) -> Self {
        Self { auth, max_results }
    }

    fn build_request(&self, image_uri: &str) -> AnnotateRequest {
        AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: Image {
                    source: ImageSource {
                        image_uri: image_uri.to_string(),
                    },
                },
                features: vec![Feature {
                    feature_type: "LABEL_DETECTION",
                    max_results: self.max_results,
                }],
            }],
        }
    }
}

// Vision request/response types

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
struct AnnotateImageRequest {
    image: Image,
    features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
struct Image {
    source: ImageSource,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageSource {
    image_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    #[serde(default)]
    label_annotations: Vec<EntityAnnotation>,
    #[serde(default)]
    error: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct EntityAnnotation {
    #[serde(default)]
    description: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    code: i32,
    #[serde(default)]
    message: String,
}

/// Pull labels out of a batch response, highest score first.
///
/// Vision reports per-image failures inside a 200 response, so the
/// embedded status has to be checked separately from the HTTP one.
fn labels_from_response(response: AnnotateResponse) -> OutfitResult<Vec<Label>> {
    let image = response.responses.into_iter().next().unwrap_or_default();

    if let Some(status) = image.error {
        return Err(OutfitError::LabelDetection(format!(
            "Vision error {}: {}",
            status.code, status.message
        )));
    }

    let mut labels: Vec<Label> = image
        .label_annotations
        .into_iter()
        .filter(|a| !a.description.is_empty())
        .map(|a| Label::new(a.description, a.score))
        .collect();
    labels.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(labels)
}

#[async_trait]
impl LabelDetector for VisionLabelDetector {
    async fn detect_labels(&self, image_uri: &str) -> OutfitResult<Vec<Label>> {
        let access_token = self.auth.access_token().await?;
        let request = self.build_request(image_uri);

        let response = self
            .auth
            .client()
            .post(ANNOTATE_URL)
            .bearer_auth(access_token)
            .header("x-goog-user-project", self.auth.project_id())
            .json(&request)
            .send()
            .await
            .map_err(|e| OutfitError::LabelDetection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OutfitError::LabelDetection(format!(
                "Vision API error ({})",
                describe_failure(response).await
            )));
        }

        let body: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| OutfitError::LabelDetection(format!("Invalid Vision response: {}", e)))?;

        let labels = labels_from_response(body)?;
        debug!(image_uri, count = labels.len(), "Vision labels received");
        Ok(labels)
    }
}
