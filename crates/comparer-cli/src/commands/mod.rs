pub mod browse;
pub mod compare;
pub mod config;
pub mod genres;
pub mod prompts;
pub mod show;

use color_eyre::Result;
use media_catalog_config::{Config, CredentialStore, PathManager};
use media_catalog_core::CatalogLoader;
use media_catalog_sources::SourceRegistry;
use tracing::debug;

/// Loaded configuration plus the sources built from it
pub struct AppContext {
    pub config: Config,
    pub loader: CatalogLoader,
}

/// Read config and credentials, apply environment overrides and build the
/// catalog sources. Fails with setup instructions when a service URL is missing.
pub fn load_context() -> Result<AppContext> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    let config = Config::load_with_env(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials_file = path_manager.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    let registry = SourceRegistry::from_config(&config, &credentials).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    debug!(services = ?config.get_configured_services(), "Catalog sources ready");

    Ok(AppContext {
        loader: CatalogLoader::from_registry(&registry),
        config,
    })
}
