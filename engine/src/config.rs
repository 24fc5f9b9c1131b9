//! Configuration loading: TOML file with environment overrides.
//!
//! All sections are optional; a missing file yields defaults. The base URL
//! is a single configuration value — `TLDQ_API_URL` wins over the file,
//! which wins over the local development default.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

/// Local development endpoint; deployments point the config elsewhere.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const BASE_URL_ENV_VAR: &str = "TLDQ_API_URL";

#[derive(Debug, Default, Deserialize)]
pub struct TldqConfig {
    pub api: Option<ApiSection>,
    pub game: Option<GameSection>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GameSection {
    #[serde(default)]
    pub category_input: CategoryInputMode,
}

/// How the prediction screen sources its category hint: a free-text field,
/// or a selector fed from the service's category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryInputMode {
    Freeform,
    #[default]
    Enumerated,
}

impl TldqConfig {
    /// Load from the per-user config path, or defaults when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config_dir>/tldq/config.toml`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tldq").join("config.toml"))
    }

    /// Resolved base URL: env override, then file, then the local default.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url_with(env::var(BASE_URL_ENV_VAR).ok())
    }

    /// Resolution against an explicit override, so it can be exercised
    /// without touching process-wide environment state. A blank override
    /// counts as unset.
    fn base_url_with(&self, env_override: Option<String>) -> String {
        if let Some(url) = env_override.filter(|url| !url.trim().is_empty()) {
            return url;
        }
        self.api
            .as_ref()
            .and_then(|api| api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.api
            .as_ref()
            .and_then(|api| api.timeout_secs)
            .map_or(tldq_api::DEFAULT_REQUEST_TIMEOUT, Duration::from_secs)
    }

    #[must_use]
    pub fn category_input(&self) -> CategoryInputMode {
        self.game
            .as_ref()
            .map_or_else(CategoryInputMode::default, |game| game.category_input)
    }
}
