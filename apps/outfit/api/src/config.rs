use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_outfits::{GoogleCloudConfig, OutfitConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components with the outfit domain's settings
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub google: GoogleCloudConfig,
    pub outfit: OutfitConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let google = GoogleCloudConfig::from_env()?; // Required - will fail if not set
        let outfit = OutfitConfig::from_env()?; // STORAGE_BUCKET required

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            google,
            outfit,
        })
    }
}
