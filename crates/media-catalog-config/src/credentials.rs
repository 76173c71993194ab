use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::ServiceConfig;

const MOVIE_API_KEY: &str = "movie_api_key";
const TV_API_KEY: &str = "tv_api_key";

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key)
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_movie_api_key(&self) -> Option<&String> {
        self.get(MOVIE_API_KEY)
    }

    pub fn set_movie_api_key(&mut self, key: String) {
        self.set(MOVIE_API_KEY.to_string(), key);
    }

    pub fn get_tv_api_key(&self) -> Option<&String> {
        self.get(TV_API_KEY)
    }

    pub fn set_tv_api_key(&mut self, key: String) {
        self.set(TV_API_KEY.to_string(), key);
    }

    /// Key from the service config (file or environment) if set, else the stored one
    pub fn resolve_movie_api_key(&self, service: &ServiceConfig) -> Option<String> {
        resolve(service, self.get_movie_api_key())
    }

    pub fn resolve_tv_api_key(&self, service: &ServiceConfig) -> Option<String> {
        resolve(service, self.get_tv_api_key())
    }
}

fn resolve(service: &ServiceConfig, stored: Option<&String>) -> Option<String> {
    service
        .api_key
        .as_ref()
        .or(stored)
        .filter(|key| !key.trim().is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_credential_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_movie_api_key("movie-key".to_string());
        store.set_tv_api_key("tv-key".to_string());
        store.save().unwrap();

        let mut loaded = CredentialStore::new(path);
        loaded.load().unwrap();
        assert_eq!(loaded.get_movie_api_key().map(String::as_str), Some("movie-key"));
        assert_eq!(loaded.get_tv_api_key().map(String::as_str), Some("tv-key"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("missing.toml"));
        store.load().unwrap();
        assert!(store.get_movie_api_key().is_none());
    }

    #[test]
    fn test_resolve_prefers_service_config() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_tv_api_key("stored".to_string());

        let mut service = ServiceConfig {
            base_url: "https://tv.example.com".to_string(),
            api_key: None,
        };
        assert_eq!(store.resolve_tv_api_key(&service).as_deref(), Some("stored"));

        service.api_key = Some("from-env".to_string());
        assert_eq!(store.resolve_tv_api_key(&service).as_deref(), Some("from-env"));

        store.remove("tv_api_key");
        service.api_key = None;
        assert_eq!(store.resolve_tv_api_key(&service), None);
    }
}
