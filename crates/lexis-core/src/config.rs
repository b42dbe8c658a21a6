//! Configuration management for Lexis.
//!
//! This module provides configuration loading, saving, and defaults.
//! Configuration is stored in TOML format in a platform-appropriate location.

use crate::error::{LexisError, Result};
use crate::speech::Voice;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the store inside the data directory
pub const STORE_FILE_NAME: &str = "dictionary.csv";

/// Main configuration structure for Lexis.
///
/// ## Example Configuration File (lexis.toml)
///
/// ```toml
/// [general]
/// log_level = "warn"
///
/// [store]
/// path = "/home/me/words/dictionary.csv"
/// delimiter = ";"
/// quote_style = "always"
/// backup = true
///
/// [dictionary]
/// parts_of_speech = ["noun", "verb", "adjective", "adverb", "other"]
/// strict_part_of_speech = true
///
/// [speech]
/// engine = "auto"
/// primary_voice = "en-us"
/// secondary_voice = "en-gb"
/// default_voice = "primary"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Where and how records are persisted
    pub store: StoreConfig,

    /// Entry validation rules
    pub dictionary: DictionaryConfig,

    /// Text-to-speech settings
    pub speech: SpeechConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "warn".to_string(),
        }
    }
}

/// How fields are quoted when rows are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Quote every field
    #[default]
    Always,
    /// Quote only fields holding the delimiter, a quote, or a line break
    Necessary,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file location (None = default location)
    pub path: Option<PathBuf>,

    /// Field separator
    pub delimiter: char,

    /// Quoting applied on write
    pub quote_style: QuoteStyle,

    /// Keep a copy of the previous contents on every rewrite
    pub backup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            delimiter: ';',
            quote_style: QuoteStyle::Always,
            backup: true,
        }
    }
}

/// Entry validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Options offered by the part-of-speech selector
    pub parts_of_speech: Vec<String>,

    /// Reject a part of speech that is not in `parts_of_speech`
    pub strict_part_of_speech: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            parts_of_speech: ["noun", "verb", "adjective", "adverb", "other"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            strict_part_of_speech: true,
        }
    }
}

/// Which system speech program to drive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechEngine {
    /// Pick by platform
    #[default]
    Auto,
    /// macOS `say`
    Say,
    /// `espeak-ng` / `espeak`
    Espeak,
    /// Windows SAPI through PowerShell
    Sapi,
}

/// Speech configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speech program family
    pub engine: SpeechEngine,

    /// Program to run instead of the engine's default binary
    pub program: Option<String>,

    /// System voice name used for `Voice::Primary` (None = program default)
    pub primary_voice: Option<String>,

    /// System voice name used for `Voice::Secondary`
    pub secondary_voice: Option<String>,

    /// Voice selected before the first `set_voice`
    pub default_voice: Voice,

    /// Speaking rate in words per minute (None = program default)
    pub rate: Option<u32>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| LexisError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self)
            .map_err(|e| LexisError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let delimiter = self.store.delimiter;
        if !delimiter.is_ascii() || matches!(delimiter, '"' | '\r' | '\n') {
            return Err(LexisError::config(format!(
                "store.delimiter must be a single ASCII character other than a quote or line break, got {:?}",
                delimiter
            )));
        }

        if self.dictionary.strict_part_of_speech
            && self
                .dictionary
                .parts_of_speech
                .iter()
                .all(|p| p.trim().is_empty())
        {
            return Err(LexisError::config(
                "dictionary.parts_of_speech is empty while strict_part_of_speech is set",
            ));
        }

        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("lexis.toml"))
    }

    /// Get the default data directory path.
    pub fn default_data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Get the store file path (from config or default).
    pub fn store_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.store.path {
            Ok(path.clone())
        } else {
            Ok(Self::default_data_dir()?.join(STORE_FILE_NAME))
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "lexis")
            .ok_or_else(|| LexisError::config("Could not determine home directory"))
    }
}
