//! Config file handling

use std::path::{Path, PathBuf};

use crate::errors::StreamconvError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "STREAMCONV_CONFIG_DIR";

/// Name of the config file inside the config directory
pub const CONFIG_FILE: &str = "config.toml";

/// streamconv configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub config_dir: PathBuf,
    /// Flags prepended to every command line
    pub default_options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
            default_options: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (TOML format)
    pub fn load() -> Result<Self, StreamconvError> {
        Self::load_from(&Self::default_config_dir())
    }

    /// Load `config.toml` from `config_dir`. A missing file yields defaults.
    pub fn load_from(config_dir: &Path) -> Result<Self, StreamconvError> {
        let config_file = config_dir.join(CONFIG_FILE);

        if !config_file.exists() {
            return Ok(Self {
                config_dir: config_dir.to_path_buf(),
                default_options: Vec::new(),
            });
        }

        let content = std::fs::read_to_string(&config_file).map_err(|e| {
            StreamconvError::Config(format!("Failed to read {}: {}", config_file.display(), e))
        })?;

        Self::parse(config_dir, &content)
    }

    fn parse(config_dir: &Path, content: &str) -> Result<Self, StreamconvError> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| StreamconvError::Config(format!("Invalid config TOML: {}", e)))?;

        let default_options = toml_value
            .get("defaults")
            .and_then(|d| d.get("options"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            default_options,
        })
    }

    /// Get the default config directory
    fn default_config_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::config_dir()
            .map(|p| p.join("streamconv"))
            .unwrap_or_else(|| PathBuf::from(".streamconv"))
    }

    /// Path of the config file
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }
}
