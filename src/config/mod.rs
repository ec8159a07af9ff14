use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::{Catalog, CropProfile, SoilProfile};

fn default_verbose() -> bool {
    false
}

/// Settings read from `agriflow.toml`. CLI flags win over every field here.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Crop id selected at startup
    #[serde(default)]
    pub crop: Option<String>,
    /// Soil id selected at startup
    #[serde(default)]
    pub soil: Option<String>,
    /// Boundary file with one `lat,lng` per line
    #[serde(default)]
    pub boundary: Option<PathBuf>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub advisor: Option<AdvisorConfig>,
    /// Replaces the built-in crop list when present
    #[serde(default)]
    pub crops: Option<Vec<CropProfile>>,
    /// Replaces the built-in soil list when present
    #[serde(default)]
    pub soils: Option<Vec<SoilProfile>>,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AdvisorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl AdvisorConfig {
    /// API key from the configured environment variable, if set and non-blank
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl FileConfig {
    /// First parseable config file from the search path, if any
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::debug!("Loaded config from {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }

    /// Read an explicitly requested config file. Unlike [`FileConfig::load`],
    /// a missing or malformed file is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Reference data for this session: configured lists where given,
    /// built-in lists otherwise.
    pub fn catalog(&self) -> Result<Catalog> {
        let builtin = Catalog::builtin();
        let crops = self
            .crops
            .clone()
            .unwrap_or_else(|| builtin.crops().to_vec());
        let soils = self
            .soils
            .clone()
            .unwrap_or_else(|| builtin.soils().to_vec());

        Catalog::new(crops, soils).context("Invalid crop/soil catalog in config")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("agriflow.toml"));
    paths.push(PathBuf::from(".agriflow.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("agriflow").join("config.toml"));
        paths.push(config_dir.join("agriflow.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".agriflow.toml"));
        paths.push(home.join(".config").join("agriflow").join("config.toml"));
    }

    paths
}
