use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Where and how to reach the inference API
#[derive(Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: String::new(),
        }
    }
}

impl ApiConfig {
    /// Load the config file (if any), then apply environment overrides
    ///
    /// The file lives in the user's config directory:
    /// - Linux: ~/.config/food-calorie-estimator/config.toml
    /// - macOS: ~/Library/Application Support/food-calorie-estimator/config.toml
    /// - Windows: %APPDATA%\food-calorie-estimator\config.toml
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                warn!("{e}, using defaults");
                Self::default()
            }),
            _ => Self::default(),
        };

        config.apply_overrides(|key| env::var(key).ok());

        if config.api_key.is_empty() {
            warn!("No API key configured; set GEMINI_API_KEY or api_key in the config file");
        }
        info!("Using model {} at {}", config.model, config.endpoint);

        config
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("food-calorie-estimator");
        path.push("config.toml");
        Some(path)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("📁 Loaded config from {}", path.display());
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Override fields from `GEMINI_API_KEY`, `CALORIE_ESTIMATOR_MODEL`
    /// and `CALORIE_ESTIMATOR_ENDPOINT`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY") {
            self.api_key = key;
        }
        if let Some(model) = non_empty("CALORIE_ESTIMATOR_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = non_empty("CALORIE_ESTIMATOR_ENDPOINT") {
            self.endpoint = endpoint;
        }
    }

    /// Full `generateContent` URL including the key parameter
    pub fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

// Keep the key out of logs
impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}
