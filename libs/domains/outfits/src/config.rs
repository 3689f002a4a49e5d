//! Environment-driven configuration for the outfit domain.

use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

use crate::strategy::LookupStrategy;

/// Google Cloud project settings shared by every Google REST client
#[derive(Debug, Clone)]
pub struct GoogleCloudConfig {
    pub project_id: String,
    /// Vertex AI region (e.g. "us-central1")
    pub location: String,
    /// Static bearer token for local development; the metadata server is used when unset
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl GoogleCloudConfig {
    pub fn new(project_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            access_token: None,
            timeout_secs: 30,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

impl FromEnv for GoogleCloudConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let project_id = env_required("GOOGLE_CLOUD_PROJECT")
            .or_else(|_| env_required("GCP_PROJECT_ID"))
            .map_err(|_| {
                ConfigError::MissingEnvVar("GOOGLE_CLOUD_PROJECT or GCP_PROJECT_ID".to_string())
            })?;

        Ok(Self {
            project_id,
            location: env_or_default("GOOGLE_CLOUD_LOCATION", "us-central1"),
            access_token: std::env::var("GOOGLE_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs: env_parse_or("GOOGLE_API_TIMEOUT_SECS", 30u64)?,
        })
    }
}

/// Firestore database and collection holding clothing items
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub database: String,
    pub collection: String,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            database: "(default)".to_string(),
            collection: "clothes".to_string(),
        }
    }
}

impl FromEnv for FirestoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: env_or_default("FIRESTORE_DATABASE", "(default)"),
            collection: env_or_default("FIRESTORE_COLLECTION", "clothes"),
        })
    }
}

/// Vertex AI Vector Search deployment and query embedding settings
#[derive(Debug, Clone)]
pub struct VectorSearchConfig {
    /// Public endpoint domain, e.g. "1234.us-central1-5678.vdb.vertexai.goog"
    pub public_domain: String,
    pub index_endpoint_id: String,
    pub deployed_index_id: String,
    pub neighbor_count: u32,
    /// Dimensionality the index was built with; query embeddings must match
    pub dimensions: usize,
    pub restrict_namespace: String,
    pub embedding_model: String,
}

impl VectorSearchConfig {
    pub const DEFAULT_DIMENSIONS: usize = 768;
    pub const DEFAULT_NEIGHBOR_COUNT: u32 = 3;
    pub const DEFAULT_RESTRICT_NAMESPACE: &'static str = "label";
}

impl FromEnv for VectorSearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let neighbor_count = env_parse_or("VECTOR_NEIGHBOR_COUNT", Self::DEFAULT_NEIGHBOR_COUNT)?;
        if neighbor_count == 0 {
            return Err(ConfigError::ParseError {
                key: "VECTOR_NEIGHBOR_COUNT".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            public_domain: env_required("VECTOR_PUBLIC_DOMAIN")?,
            index_endpoint_id: env_required("VECTOR_INDEX_ENDPOINT")?,
            deployed_index_id: env_required("VECTOR_DEPLOYED_INDEX_ID")?,
            neighbor_count,
            dimensions: env_parse_or("VECTOR_INDEX_DIMENSIONS", Self::DEFAULT_DIMENSIONS)?,
            restrict_namespace: env_or_default(
                "VECTOR_RESTRICT_NAMESPACE",
                Self::DEFAULT_RESTRICT_NAMESPACE,
            ),
            embedding_model: env_or_default("EMBEDDING_MODEL", "text-embedding-004"),
        })
    }
}

/// Everything the recommendation service needs besides its collaborators
#[derive(Debug, Clone)]
pub struct OutfitConfig {
    pub storage_bucket: String,
    pub strategy: LookupStrategy,
    pub vision_max_labels: u32,
    pub firestore: FirestoreConfig,
    /// Present only when the strategy needs similarity search
    pub vector: Option<VectorSearchConfig>,
}

impl FromEnv for OutfitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let strategy = env_parse_or("RECOMMENDATION_STRATEGY", LookupStrategy::default())?;
        let vector = if strategy.needs_similarity() {
            Some(VectorSearchConfig::from_env()?)
        } else {
            None
        };

        Ok(Self {
            storage_bucket: env_required("STORAGE_BUCKET")?,
            strategy,
            vision_max_labels: env_parse_or("VISION_MAX_LABELS", 10u32)?,
            firestore: FirestoreConfig::from_env()?,
            vector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outfit_config_defaults_to_category_rule() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", Some("closet-uploads")),
                ("RECOMMENDATION_STRATEGY", None),
                ("VISION_MAX_LABELS", None),
                ("FIRESTORE_COLLECTION", None),
            ],
            || {
                let config = OutfitConfig::from_env().unwrap();
                assert_eq!(config.storage_bucket, "closet-uploads");
                assert_eq!(config.strategy, LookupStrategy::CategoryRule);
                assert_eq!(config.vision_max_labels, 10);
                assert_eq!(config.firestore.collection, "clothes");
                assert!(config.vector.is_none());
            },
        );
    }

    #[test]
    fn test_outfit_config_requires_bucket() {
        temp_env::with_var_unset("STORAGE_BUCKET", || {
            let err = OutfitConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("STORAGE_BUCKET"));
        });
    }

    #[test]
    fn test_similarity_strategy_loads_vector_config() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", Some("closet-uploads")),
                ("RECOMMENDATION_STRATEGY", Some("similarity_search")),
                ("VECTOR_PUBLIC_DOMAIN", Some("123.us-central1-456.vdb.vertexai.goog")),
                ("VECTOR_INDEX_ENDPOINT", Some("987")),
                ("VECTOR_DEPLOYED_INDEX_ID", Some("clothes_deployed")),
                ("VECTOR_NEIGHBOR_COUNT", None),
                ("VECTOR_INDEX_DIMENSIONS", None),
            ],
            || {
                let config = OutfitConfig::from_env().unwrap();
                let vector = config.vector.unwrap();
                assert_eq!(vector.neighbor_count, 3);
                assert_eq!(vector.dimensions, 768);
                assert_eq!(vector.restrict_namespace, "label");
            },
        );
    }

    #[test]
    fn test_similarity_strategy_without_endpoint_fails() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", Some("closet-uploads")),
                ("RECOMMENDATION_STRATEGY", Some("similarity_search")),
                ("VECTOR_PUBLIC_DOMAIN", None),
            ],
            || {
                let err = OutfitConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("VECTOR_PUBLIC_DOMAIN"));
            },
        );
    }

    #[test]
    fn test_zero_neighbor_count_rejected() {
        temp_env::with_var("VECTOR_NEIGHBOR_COUNT", Some("0"), || {
            let err = VectorSearchConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("VECTOR_NEIGHBOR_COUNT"));
        });
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        temp_env::with_vars(
            [
                ("STORAGE_BUCKET", Some("closet-uploads")),
                ("RECOMMENDATION_STRATEGY", Some("dummy_echo")),
            ],
            || {
                let err = OutfitConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("RECOMMENDATION_STRATEGY"));
            },
        );
    }

    #[test]
    fn test_google_config_falls_back_to_gcp_project_id() {
        temp_env::with_vars(
            [
                ("GOOGLE_CLOUD_PROJECT", None),
                ("GCP_PROJECT_ID", Some("closet-prod")),
                ("GOOGLE_ACCESS_TOKEN", Some("  ")),
            ],
            || {
                let config = GoogleCloudConfig::from_env().unwrap();
                assert_eq!(config.project_id, "closet-prod");
                assert_eq!(config.location, "us-central1");
                assert!(config.access_token.is_none());
            },
        );
    }
}
