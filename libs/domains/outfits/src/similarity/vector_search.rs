use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SimilarityIndex;
use crate::config::VectorSearchConfig;
use crate::error::{OutfitError, OutfitResult};
use crate::google::{GoogleAuth, describe_failure};
use crate::models::{Neighbor, SimilarityQuery};

/// Vertex AI Vector Search client for a deployed index on a public endpoint
pub struct VertexVectorIndex {
    auth: GoogleAuth,
    config: VectorSearchConfig,
}

impl VertexVectorIndex {
    pub fn new(auth: GoogleAuth, config: VectorSearchConfig) -> Self {
        Self { auth, config }
    }

    fn endpoint_url(&self) -> String {
        format!(
            "https://{}/v1/projects/{}/locations/{}/indexEndpoints/{}:findNeighbors",
            self.config.public_domain,
            self.auth.project_id(),
            self.auth.config().location,
            self.config.index_endpoint_id
        )
    }

    fn build_request(&self, query: &SimilarityQuery) -> FindNeighborsRequest {
        let restricts = if query.allowed_labels.is_empty() {
            Vec::new()
        } else {
            vec![Restrict {
                namespace: query.namespace.clone(),
                allow_list: query.allowed_labels.clone(),
            }]
        };

        FindNeighborsRequest {
            deployed_index_id: self.config.deployed_index_id.clone(),
            queries: vec![Query {
                datapoint: QueryDatapoint {
                    datapoint_id: "query".to_string(),
                    feature_vector: query.embedding.clone(),
                    restricts,
                },
                neighbor_count: query.neighbor_count,
            }],
            return_full_datapoint: false,
        }
    }
}

// Vector Search request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindNeighborsRequest {
    deployed_index_id: String,
    queries: Vec<Query>,
    return_full_datapoint: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Query {
    datapoint: QueryDatapoint,
    neighbor_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryDatapoint {
    datapoint_id: String,
    feature_vector: Vec<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    restricts: Vec<Restrict>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Restrict {
    namespace: String,
    allow_list: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindNeighborsResponse {
    #[serde(default)]
    nearest_neighbors: Vec<NearestNeighbors>,
}

#[derive(Debug, Deserialize)]
struct NearestNeighbors {
    #[serde(default)]
    neighbors: Vec<NeighborHit>,
}

#[derive(Debug, Deserialize)]
struct NeighborHit {
    datapoint: NeighborDatapoint,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NeighborDatapoint {
    datapoint_id: String,
}

fn neighbors_from_response(response: FindNeighborsResponse) -> Vec<Neighbor> {
    response
        .nearest_neighbors
        .into_iter()
        .next()
        .map(|n| {
            n.neighbors
                .into_iter()
                .map(|hit| Neighbor {
                    id: hit.datapoint.datapoint_id,
                    distance: hit.distance,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl SimilarityIndex for VertexVectorIndex {
    async fn find_neighbors(&self, query: &SimilarityQuery) -> OutfitResult<Vec<Neighbor>> {
        let access_token = self.auth.access_token().await?;
        let request = self.build_request(query);

        let response = self
            .auth
            .client()
            .post(self.endpoint_url())
            .bearer_auth(access_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| OutfitError::SimilarityIndex(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OutfitError::SimilarityIndex(format!(
                "Vector Search error ({})",
                describe_failure(response).await
            )));
        }

        let body: FindNeighborsResponse = response.json().await.map_err(|e| {
            OutfitError::SimilarityIndex(format!("Invalid findNeighbors response: {}", e))
        })?;

        let neighbors = neighbors_from_response(body);
        debug!(count = neighbors.len(), "Vector Search neighbors received");
        Ok(neighbors)
    }
}
