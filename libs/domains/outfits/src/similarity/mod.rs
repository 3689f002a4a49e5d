//! Similarity search: label embeddings and the nearest-neighbor index.

mod embedding;
mod vector_search;

use async_trait::async_trait;

use crate::error::OutfitResult;
use crate::models::{Neighbor, SimilarityQuery};

pub use embedding::VertexTextEmbedder;
pub use vector_search::VertexVectorIndex;

/// Trait for nearest-neighbor indexes over item embeddings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Find up to `query.neighbor_count` neighbors, closest first
    async fn find_neighbors(&self, query: &SimilarityQuery) -> OutfitResult<Vec<Neighbor>>;
}

/// Trait for turning detected labels into a query vector
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryEmbedder: Send + Sync {
    /// Embed the label descriptions as one query
    async fn embed(&self, labels: &[String]) -> OutfitResult<Vec<f32>>;
}
