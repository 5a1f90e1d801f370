//! Configuration - Package Identity and Naming
//!
//! Every field has a default, so `{}` is a complete config file and the
//! defaults reproduce the standard package byte for byte.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::naming::DEFAULT_SYMBOL_SUFFIX;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    #[serde(default = "default_symbol_suffix")]
    pub symbol_suffix: String,
    #[serde(default)]
    pub package: PackageConfig,
}

fn default_symbol_suffix() -> String { DEFAULT_SYMBOL_SUFFIX.to_string() }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            symbol_suffix: default_symbol_suffix(),
            package: PackageConfig::default(),
        }
    }
}

/// Fixed package identity written into `package.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    #[serde(default = "default_package_name")]
    pub name: String,
    #[serde(default = "default_peer_dependencies")]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default = "default_main")]
    pub main: String,
    #[serde(default = "default_types")]
    pub types: String,
    #[serde(default)]
    pub publish_config: PublishConfig,
}

fn default_package_name() -> String { "@artsy/icons".to_string() }
fn default_main() -> String { "index.js".to_string() }
fn default_types() -> String { "index.d.ts".to_string() }

fn default_peer_dependencies() -> BTreeMap<String, String> {
    [
        ("react", ">=16.2.0"),
        ("styled-components", "^4"),
        ("styled-system", "^5"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: default_package_name(),
            peer_dependencies: default_peer_dependencies(),
            main: default_main(),
            types: default_types(),
            publish_config: PublishConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_access")]
    pub access: String,
    #[serde(default = "default_registry")]
    pub registry: String,
}

fn default_access() -> String { "public".to_string() }
fn default_registry() -> String { "https://registry.npmjs.org".to_string() }

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            access: default_access(),
            registry: default_registry(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
