//! Configuration management module.
//!
//! Handles loading converter defaults from a JSON file. Command line flags
//! override whatever is loaded here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::pipeline::DEFAULT_CHUNK_SIZE;
use crate::error::{ConvError, Result};
use crate::utils::encoding::EncodingSelector;

pub const CONFIG_FILE_NAME: &str = "jpconv_config.json";

/// Converter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_encoding")]
    pub encoding: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_encoding() -> String {
    "SHIFT_JIS".to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            encoding: default_encoding(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Config {
    /// Resolve the configured encoding label.
    pub fn selector(&self) -> Result<EncodingSelector> {
        EncodingSelector::from_label(&self.encoding)
    }
}

/// Configuration manager for locating and loading the config file.
pub struct ConfigManager {
    config_path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Manager for `jpconv_config.json` next to the executable.
    pub fn new() -> Self {
        let config_path = Self::get_exe_directory().join(CONFIG_FILE_NAME);
        Self {
            config_path,
            explicit: false,
        }
    }

    /// Manager for a file the user named; it must exist and parse.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            explicit: true,
        }
    }

    /// Get the directory containing the executable.
    fn get_exe_directory() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the config file path.
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file.
    ///
    /// The implicit file next to the executable is optional: when it is
    /// missing or unreadable the defaults apply. A file given through
    /// [`ConfigManager::with_path`] must load.
    pub fn load(&self) -> Result<Config> {
        if !self.explicit {
            return Ok(self.try_load().unwrap_or_default());
        }

        let content = fs::read_to_string(&self.config_path).map_err(|e| {
            ConvError::Config(format!("{}: {}", self.config_path.display(), e))
        })?;
        Self::parse(&content)
            .map_err(|e| ConvError::Config(format!("{}: {}", self.config_path.display(), e)))
    }

    fn try_load(&self) -> Option<Config> {
        if !self.config_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&self.config_path).ok()?;
        Self::parse(&content).ok()
    }

    fn parse(content: &str) -> std::result::Result<Config, serde_json::Error> {
        let mut config: Config = serde_json::from_str(content)?;

        if config.encoding.trim().is_empty() {
            config.encoding = default_encoding();
        }

        Ok(config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
