use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Environment overrides, matching the variable names the hosted services document
const MOVIE_API_URL_ENV: &str = "MOVIE_API_URL";
const MOVIE_API_KEY_ENV: &str = "MOVIE_API_KEY";
const TV_API_URL_ENV: &str = "TV_API_URL";
const TV_API_KEY_ENV: &str = "TV_API_KEY";

/// Both sources cap a single page at 100 records
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub movies: ServiceConfig,
    pub tv: ServiceConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// One upstream REST service. API keys normally live in the credential
/// store; a key here (or in the environment) takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub default_sort: SortSetting,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortSetting {
    #[default]
    Popularity,
    Rating,
    Title,
    Year,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("media-comparer/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            default_sort: SortSetting::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Config with empty service URLs, to be filled in by `config init` or the environment
pub fn default_config() -> Config {
    Config {
        movies: ServiceConfig {
            base_url: String::new(),
            api_key: None,
        },
        tv: ServiceConfig {
            base_url: String::new(),
            api_key: None,
        },
        catalog: CatalogConfig::default(),
        http: HttpConfig::default(),
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file if present, otherwise start from defaults, then
    /// apply environment overrides. A missing file is fine as long as the
    /// environment provides the service URLs; `validate` reports otherwise.
    pub fn load_with_env(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            debug!("No config file at {}, using defaults", path.display());
            default_config()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(MOVIE_API_URL_ENV) {
            self.movies.base_url = url;
        }
        if let Some(key) = non_empty(MOVIE_API_KEY_ENV) {
            self.movies.api_key = Some(key);
        }
        if let Some(url) = non_empty(TV_API_URL_ENV) {
            self.tv.base_url = url;
        }
        if let Some(key) = non_empty(TV_API_KEY_ENV) {
            self.tv.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        validate_base_url("movies", &self.movies.base_url, MOVIE_API_URL_ENV)?;
        validate_base_url("tv", &self.tv.base_url, TV_API_URL_ENV)?;

        if self.catalog.page_size == 0 || self.catalog.page_size > MAX_PAGE_SIZE {
            return Err(anyhow::anyhow!(
                "catalog.page_size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE,
                self.catalog.page_size
            ));
        }

        if self.http.timeout_secs == 0 {
            return Err(anyhow::anyhow!("http.timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Get list of services with a usable base URL
    pub fn get_configured_services(&self) -> Vec<String> {
        let mut services = Vec::new();
        if !self.movies.base_url.trim().is_empty() {
            services.push("movies".to_string());
        }
        if !self.tv.base_url.trim().is_empty() {
            services.push("tv".to_string());
        }
        services
    }
}

fn validate_base_url(service: &str, url: &str, env_name: &str) -> anyhow::Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(anyhow::anyhow!(
            "{}.base_url is not set. Run 'media-comparer config init' or set {} (e.g. {}=http://localhost:8000)",
            service,
            env_name,
            env_name
        ));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(anyhow::anyhow!(
            "{}.base_url must start with http:// or https:// (got {})",
            service,
            url
        ));
    }
    Ok(())
}
