//! Configuration for the splice pipeline
//!
//! The host owns a single `SpliceConfig` per install pass. There is no
//! ambient global state: configuration is built explicitly (or loaded from a
//! TOML file) and handed to the [`Installer`](crate::install::Installer).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Options for math splicing
#[derive(Debug, Clone, PartialEq)]
pub struct SpliceConfig {
    /// Scale factor applied per pixel of effective font size
    pub scale: f64,

    /// Remove `clip-path` from a spliced element's parent.
    ///
    /// Some host layouts clip text regions tightly enough that the larger
    /// rendered glyph would be cut off.
    pub escape_clip: bool,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            scale: 0.09,
            escape_clip: false,
        }
    }
}

/// TOML structure for deserializing configuration files
#[derive(Deserialize)]
struct TomlConfig {
    splice: Option<TomlSplice>,
}

#[derive(Deserialize)]
struct TomlSplice {
    scale: Option<f64>,
    escape_clip: Option<bool>,
}

impl SpliceConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set whether spliced elements escape their parent's clip path
    pub fn with_escape_clip(mut self, escape_clip: bool) -> Self {
        self.escape_clip = escape_clip;
        self
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Missing keys keep their defaults:
    ///
    /// ```toml
    /// [splice]
    /// scale = 0.12
    /// escape_clip = true
    /// ```
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        let splice = parsed.splice;

        Ok(Self {
            scale: splice
                .as_ref()
                .and_then(|s| s.scale)
                .unwrap_or(defaults.scale),
            escape_clip: splice
                .as_ref()
                .and_then(|s| s.escape_clip)
                .unwrap_or(defaults.escape_clip),
        })
    }
}
