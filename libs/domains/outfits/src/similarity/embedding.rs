//! Vertex AI text embeddings for similarity queries

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::QueryEmbedder;
use crate::config::VectorSearchConfig;
use crate::error::{OutfitError, OutfitResult};
use crate::google::{GoogleAuth, describe_failure};

/// Embeds the joined label descriptions with a Vertex AI text embedding model.
///
/// `outputDimensionality` is pinned to the index dimensionality so the model
/// and the index agree; the service still checks the returned length.
pub struct VertexTextEmbedder {
    auth: GoogleAuth,
    model: String,
    dimensions: usize,
}

impl VertexTextEmbedder {
    pub fn new(auth: GoogleAuth, config: &VectorSearchConfig) -> Self {
        Self {
            auth,
            model: config.embedding_model.clone(),
            dimensions: config.dimensions,
        }
    }

    /// Get the Vertex AI endpoint URL for the configured model
    fn endpoint_url(&self) -> String {
        let google = self.auth.config();
        format!(
            "https://{}-aiplatform.googleapis.com/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            google.location, google.project_id, google.location, self.model
        )
    }

    fn build_request(&self, labels: &[String]) -> PredictRequest {
        PredictRequest {
            instances: vec![TextInstance {
                content: labels.join(", "),
                task_type: "RETRIEVAL_QUERY",
            }],
            parameters: EmbeddingParameters {
                output_dimensionality: self.dimensions,
            },
        }
    }
}

// Vertex AI request/response types

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<TextInstance>,
    parameters: EmbeddingParameters,
}

#[derive(Debug, Serialize)]
struct TextInstance {
    content: String,
    task_type: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbeddingParameters {
    output_dimensionality: usize,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<EmbeddingPrediction>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingPrediction {
    embeddings: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[async_trait]
impl QueryEmbedder for VertexTextEmbedder {
    async fn embed(&self, labels: &[String]) -> OutfitResult<Vec<f32>> {
        let access_token = self.auth.access_token().await?;
        let request = self.build_request(labels);

        let response = self
            .auth
            .client()
            .post(self.endpoint_url())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| OutfitError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OutfitError::Embedding(format!(
                "Vertex AI API error ({})",
                describe_failure(response).await
            )));
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| OutfitError::Embedding(format!("Invalid predict response: {}", e)))?;

        body.predictions
            .into_iter()
            .next()
            .map(|p| p.embeddings.values)
            .ok_or_else(|| OutfitError::Embedding("No embedding returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoogleCloudConfig;
    use serde_json::json;

    fn embedder() -> VertexTextEmbedder {
        let auth = GoogleAuth::new(
            GoogleCloudConfig::new("my-project", "us-central1").with_access_token("token"),
        )
        .unwrap();
        let config = VectorSearchConfig {
            public_domain: "d".to_string(),
            index_endpoint_id: "e".to_string(),
            deployed_index_id: "i".to_string(),
            neighbor_count: 3,
            dimensions: 768,
            restrict_namespace: "label".to_string(),
            embedding_model: "text-embedding-004".to_string(),
        };
        VertexTextEmbedder::new(auth, &config)
    }

    #[test]
    fn test_endpoint_url() {
        let expected = "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/publishers/google/models/text-embedding-004:predict";
        assert_eq!(embedder().endpoint_url(), expected);
    }

    #[test]
    fn test_request_joins_labels() {
        let labels = vec!["Jeans".to_string(), "Denim".to_string()];
        let value = serde_json::to_value(embedder().build_request(&labels)).unwrap();
        assert_eq!(
            value,
            json!({
                "instances": [{ "content": "Jeans, Denim", "task_type": "RETRIEVAL_QUERY" }],
                "parameters": { "outputDimensionality": 768 }
            })
        );
    }
}
