//! Application state management.

use domain_outfits::GoogleAuth;

/// Shared application state.
///
/// Cloned into handlers; the Google auth handle shares one HTTP client pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Token source and HTTP client shared by every Google collaborator
    pub auth: GoogleAuth,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> eyre::Result<Self> {
        let auth = GoogleAuth::new(config.google.clone())?;
        Ok(Self { config, auth })
    }
}
