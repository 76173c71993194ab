use anyhow::Result;
use std::path::{Path, PathBuf};

pub const BASE_PATH_ENV: &str = "MEDIA_COMPARER_BASE_PATH";

/// Base directory override from `MEDIA_COMPARER_BASE_PATH`, if set and non-empty
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("media-comparer");

        Ok(Self {
            config_dir: base_dir.clone(),
            log_dir: base_dir.join("logs"),
        })
    }

    /// Rooted at `base` when it names an existing directory
    pub fn from_override(base: Option<PathBuf>) -> Option<Self> {
        base.filter(|dir| dir.is_dir()).map(Self::with_base)
    }

    /// Rooted at an explicit directory
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("media-comparer.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(paths) = Self::from_override(base_path_override()) {
            return paths;
        }

        // Platform config dir (e.g., ~/.config/media-comparer on Linux)
        Self::new().unwrap_or_else(|_| Self::with_base(std::env::temp_dir().join("media-comparer")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_layout() {
        let paths = PathManager::with_base("/tmp/mc");
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/mc/config.toml"));
        assert_eq!(paths.credentials_file(), PathBuf::from("/tmp/mc/credentials.toml"));
        assert_eq!(paths.default_log_file(), PathBuf::from("/tmp/mc/logs/media-comparer.log"));
    }

    #[test]
    fn test_override_requires_existing_directory() {
        assert!(PathManager::from_override(None).is_none());
        assert!(PathManager::from_override(Some(PathBuf::from("/nonexistent/media-comparer"))).is_none());

        let dir = tempfile::TempDir::new().unwrap();
        let paths = PathManager::from_override(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.config_file(), dir.path().join("config.toml"));
    }

    #[test]
    fn test_default_without_override_uses_platform_dir() {
        std::env::remove_var(BASE_PATH_ENV);
        assert!(base_path_override().is_none());

        let paths = PathManager::default();
        if let Some(config_dir) = dirs::config_dir() {
            assert_eq!(paths.config_dir(), config_dir.join("media-comparer"));
        }
    }
}
