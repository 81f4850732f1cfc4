use crate::error::{CheckerError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_AUR_URL: &str = "https://aur.archlinux.org";
pub const DEFAULT_BUILD_DIR: &str = "build";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the AUR web interface
    pub aur_url: String,

    /// Staging directory for downloaded tarballs, relative to the working directory
    pub build_dir: PathBuf,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Whether to use colors in output
    pub use_color: bool,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self {
            aur_url: DEFAULT_AUR_URL.to_string(),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            timeout_secs: 30,
            use_color: true,
        }
    }

    /// Get the config file path
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CheckerError::Config("Could not determine config directory".to_string()))?
            .join("aurcheck");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the default location, or defaults if it does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)
            .map_err(|e| CheckerError::Config(format!("Failed to parse config: {}", e)))?;

        config.aur_url = config.aur_url.trim_end_matches('/').to_string();
        if config.aur_url.is_empty() {
            return Err(CheckerError::Config("aur_url must not be empty".to_string()));
        }

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
