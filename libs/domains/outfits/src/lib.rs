//! Outfit recommendation domain
//!
//! Turns an uploaded clothing photo into a recommendation:
//!
//! 1. the photo's storage path becomes a `gs://` URI,
//! 2. a [`LabelDetector`] describes the image,
//! 3. the configured [`LookupStrategy`] resolves the labels into an item,
//!    a list of similar items, or the labels themselves.
//!
//! ```text
//! handlers ──> RecommendationService ──┬──> LabelDetector   (Cloud Vision)
//!                                      ├──> ItemRepository  (Firestore)
//!                                      ├──> QueryEmbedder   (Vertex AI embeddings)
//!                                      └──> SimilarityIndex (Vertex AI Vector Search)
//! ```
//!
//! Collaborators are built once per process and injected, so tests can
//! substitute fakes.

pub mod classifier;
pub mod config;
pub mod error;
pub mod firestore;
pub mod google;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod repository;
pub mod service;
pub mod similarity;
pub mod strategy;

pub use classifier::classify;
pub use config::{FirestoreConfig, GoogleCloudConfig, OutfitConfig, VectorSearchConfig};
pub use error::{ErrorKind, OutfitError, OutfitResult};
pub use firestore::FirestoreItemRepository;
pub use google::GoogleAuth;
pub use handlers::ApiDoc;
pub use labels::{LabelDetector, VisionLabelDetector};
pub use models::*;
pub use repository::ItemRepository;
pub use service::{RecommendationService, RecommendationSettings};
pub use similarity::{QueryEmbedder, SimilarityIndex, VertexTextEmbedder, VertexVectorIndex};
pub use strategy::LookupStrategy;
