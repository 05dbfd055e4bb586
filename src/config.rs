use crate::cli::Cli;
use crate::model::query::snap_page_size;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the backend origin
pub const BACKEND_URL_ENV: &str = "LUDOTECA_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the REST backend
    pub backend_url: String,
    pub request_timeout_secs: u64,
    /// Initial page size for paginated views (snapped to 5, 10 or 25)
    pub default_page_size: u32,
    /// How long a notification stays on screen
    pub notification_secs: u64,
    /// How long an unsubscribed cache entry is kept
    pub cache_keep_unused_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8080".to_string(),
            request_timeout_secs: 10,
            default_page_size: 5,
            notification_secs: 4,
            cache_keep_unused_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".ludoteca-tui"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config at `path`. A missing file yields `Ok(None)`.
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(Some(config))
    }

    /// Save the config to disk
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| env::var(name).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.backend_url = url;
        }
    }

    /// Command line flags win over both the file and the environment
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.backend_url {
            self.backend_url = url.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    pub fn cache_keep_unused(&self) -> Duration {
        Duration::from_secs(self.cache_keep_unused_secs)
    }

    pub fn page_size(&self) -> u32 {
        snap_page_size(self.default_page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("ludoteca-tui-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = temp_path("missing");
        assert!(Config::load_from(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let config = Config {
            backend_url: "http://ludoteca.local:9000".to_string(),
            default_page_size: 10,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"backend_url": "http://otro:8080"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.backend_url, "http://otro:8080");
        assert_eq!(loaded.request_timeout_secs, 10);
        assert_eq!(loaded.cache_keep_unused_secs, 60);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        assert!(Config::load_from(&path).is_err());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_override_order() {
        let mut config = Config::default();
        config.apply_env_from(|name| {
            (name == BACKEND_URL_ENV).then(|| "http://from-env:8080".to_string())
        });
        assert_eq!(config.backend_url, "http://from-env:8080");

        let cli = Cli::parse_from([
            "ludoteca-tui",
            "--backend-url",
            "http://from-flag:8080",
            "--log-level",
            "debug",
        ]);
        config.apply_cli(&cli);
        assert_eq!(config.backend_url, "http://from-flag:8080");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_page_size_is_snapped() {
        let config = Config {
            default_page_size: 12,
            ..Config::default()
        };
        assert_eq!(config.page_size(), 10);
    }
}
