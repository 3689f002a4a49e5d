use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::GoogleCloudConfig;
use crate::error::{OutfitError, OutfitResult};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// Refresh a cached token this long before the metadata server says it expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self, now: Instant) -> bool {
        now + EXPIRY_MARGIN < self.expires_at
    }
}

/// Bearer-token source and HTTP client shared by the Vision, Firestore and Vertex clients.
///
/// A configured `GOOGLE_ACCESS_TOKEN` wins. Otherwise the token comes from the
/// GCP metadata server, which works on Cloud Run, GCE and GKE workload identity,
/// and is reused by every clone until shortly before it expires.
#[derive(Clone)]
pub struct GoogleAuth {
    client: Client,
    config: GoogleCloudConfig,
    cached: Arc<Mutex<Option<CachedToken>>>,
}

impl GoogleAuth {
    pub fn new(config: GoogleCloudConfig) -> OutfitResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OutfitError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            cached: Arc::new(Mutex::new(None)),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &GoogleCloudConfig {
        &self.config
    }

    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Get an access token for the `cloud-platform` scope.
    pub async fn access_token(&self) -> OutfitResult<String> {
        if let Some(ref token) = self.config.access_token {
            return Ok(token.clone());
        }

        // Held across the refresh so concurrent callers wait for one fetch.
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Instant::now())) {
            return Ok(token.value.clone());
        }

        let token = self.metadata_token().await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn metadata_token(&self) -> OutfitResult<CachedToken> {
        let response = self
            .client
            .get(METADATA_TOKEN_URL)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                OutfitError::Auth(format!(
                    "Failed to get access token from metadata server: {}. \
                     Set GOOGLE_ACCESS_TOKEN for local development.",
                    e
                ))
            })?;

        if !response.status().is_success() {
            return Err(OutfitError::Auth(format!(
                "Metadata server returned {}. Set GOOGLE_ACCESS_TOKEN for local development.",
                response.status()
            )));
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: u64,
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OutfitError::Auth(format!("Failed to parse token response: {}", e)))?;

        debug!(expires_in = token.expires_in, "Fetched metadata server token");
        Ok(CachedToken {
            value: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
