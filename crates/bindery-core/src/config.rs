//! Bridge configuration (bindery.toml)

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Unknown traversal order name
    #[error("Unknown traversal order: {0} (expected newest-first or oldest-first)")]
    UnknownTraversal(String),
}

/// Order in which the initializer walks the registry.
///
/// When two descriptors share a name, the one visited last owns the binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Registry order: most recently registered first. The earliest
    /// registration wins a name collision.
    #[default]
    NewestFirst,
    /// Registration order. The latest registration wins a name collision.
    OldestFirst,
}

impl Traversal {
    /// Config spelling of this order
    pub fn as_str(&self) -> &'static str {
        match self {
            Traversal::NewestFirst => "newest-first",
            Traversal::OldestFirst => "oldest-first",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Traversal {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest-first" => Ok(Traversal::NewestFirst),
            "oldest-first" => Ok(Traversal::OldestFirst),
            other => Err(ConfigError::UnknownTraversal(other.to_string())),
        }
    }
}

/// Options for one initialization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InitOptions {
    /// Registry walk order
    #[serde(default)]
    pub traversal: Traversal,

    /// Log a warning when a later descriptor replaces an earlier one
    #[serde(default = "default_warn_on_collision")]
    pub warn_on_collision: bool,
}

fn default_warn_on_collision() -> bool {
    true
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            traversal: Traversal::default(),
            warn_on_collision: default_warn_on_collision(),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Initialization settings
    #[serde(default)]
    pub init: InitOptions,
}

impl BridgeConfig {
    /// Default config file name
    pub const FILE_NAME: &'static str = "bindery.toml";

    /// Parse a config from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a config from a string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
