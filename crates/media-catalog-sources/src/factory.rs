//! Builds the catalog sources from configuration.
//!
//! Both clients share one HTTP connection pool; API keys are resolved from
//! the config/environment first and the credential store second.

use anyhow::Result;
use media_catalog_config::{Config, CredentialStore};
use media_catalog_models::MediaType;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::http::create_client;
use crate::movies::MovieClient;
use crate::traits::CatalogSource;
use crate::tv::TvClient;

#[derive(Clone)]
pub struct SourceRegistry {
    movies: Arc<MovieClient>,
    tv: Arc<TvClient>,
}

impl SourceRegistry {
    pub fn from_config(config: &Config, credentials: &CredentialStore) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(create_client(&config.http));

        let movie_key = credentials.resolve_movie_api_key(&config.movies);
        if movie_key.is_none() {
            warn!("No movie API key configured; requests may be rejected");
        }
        let tv_key = credentials.resolve_tv_api_key(&config.tv);
        if tv_key.is_none() {
            warn!("No TV API key configured; requests may be rejected");
        }

        debug!(movies = %config.movies.base_url, tv = %config.tv.base_url, "Creating catalog sources");
        Ok(Self {
            movies: Arc::new(MovieClient::new(client.clone(), config.movies.base_url.trim(), movie_key)),
            tv: Arc::new(TvClient::new(client, config.tv.base_url.trim(), tv_key)),
        })
    }

    pub fn for_type(&self, media_type: MediaType) -> Arc<dyn CatalogSource> {
        match media_type {
            MediaType::Movie => self.movies.clone(),
            MediaType::Tv => self.tv.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use media_catalog_config::default_config;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_requires_valid_config() {
        let dir = TempDir::new().unwrap();
        let credentials = CredentialStore::new(dir.path().join("credentials.toml"));
        assert!(SourceRegistry::from_config(&default_config(), &credentials).is_err());
    }

    #[test]
    fn test_for_type_routes_by_media_type() {
        let dir = TempDir::new().unwrap();
        let credentials = CredentialStore::new(dir.path().join("credentials.toml"));
        let mut config = default_config();
        config.movies.base_url = "http://movies.test".to_string();
        config.tv.base_url = "http://tv.test".to_string();

        let registry = SourceRegistry::from_config(&config, &credentials).unwrap();
        assert_eq!(registry.for_type(MediaType::Movie).source_name(), "movies");
        assert_eq!(registry.for_type(MediaType::Tv).media_type(), MediaType::Tv);
        assert!(registry.for_type(MediaType::Tv).supports_server_genre_filter());
    }
}
