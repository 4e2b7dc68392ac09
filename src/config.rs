use std::path::PathBuf;

use album_api::ApiConfig;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// App configuration, loaded from `family-album/config.toml` in the
/// platform config directory. Missing file means defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("family-album/config.toml")
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        let path = config_path();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("read {}: {}", path.display(), e)))?;
            toml::from_str(&raw)
                .map_err(|e| AppError::Config(format!("parse {}: {}", path.display(), e)))?
        } else {
            log::info!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        // Env override wins, handy for development against a local backend.
        if let Ok(url) = std::env::var("FAMILY_ALBUM_API_URL") {
            if !url.is_empty() {
                config.api.base_url = url;
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[api]\nbase_url = \"http://backend:5000\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://backend:5000");
        assert_eq!(config.api.timeout_secs, 10);
    }
}
