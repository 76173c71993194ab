pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{default_config, CatalogConfig, Config, HttpConfig, ServiceConfig, SortSetting, MAX_PAGE_SIZE};
pub use credentials::CredentialStore;
pub use paths::{base_path_override, PathManager, BASE_PATH_ENV};
