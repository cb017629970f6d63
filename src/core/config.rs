//! Configuration management for nodeindex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{IndexerError, Result};
use crate::core::expression::{NODE_VARIABLE, PROPERTY_NAME_VARIABLE, VALUE_VARIABLE};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Largest asset read for attachment indexing unless configured otherwise
pub const DEFAULT_MAX_ASSET_SIZE_MB: usize = 50;

/// Config file looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "nodeindex.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub indexing: IndexingConfig,

    #[serde(default)]
    pub node_types: NodeTypesConfig,

    /// Variables shared by every expression, mapped to the helper
    /// namespace they expose
    #[serde(default = "default_context")]
    pub default_context: BTreeMap<String, String>,

    /// Indexing rules applied by value type when a property has none
    #[serde(default = "default_configuration_per_type")]
    pub default_configuration_per_type: BTreeMap<String, TypeConfiguration>,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Maximum asset size in MB (larger assets fail to encode)
    #[serde(default = "default_max_asset_size")]
    pub max_asset_size_mb: usize,
}

/// Node-type definitions location
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NodeTypesConfig {
    /// TOML file with `[node_types."Name"]` tables
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Defaults for one value type
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypeConfiguration {
    /// Indexing expression; empty means "do not index"
    #[serde(default)]
    pub indexing: Option<String>,
}

impl TypeConfiguration {
    fn indexing(expression: &str) -> Self {
        Self {
            indexing: Some(expression.to_string()),
        }
    }
}

// Default value functions
fn default_max_asset_size() -> usize {
    DEFAULT_MAX_ASSET_SIZE_MB
}

fn default_context() -> BTreeMap<String, String> {
    ["Indexing", "String", "Date"]
        .into_iter()
        .map(|helper| (helper.to_string(), helper.to_string()))
        .collect()
}

fn default_configuration_per_type() -> BTreeMap<String, TypeConfiguration> {
    [
        ("string", "${value}"),
        ("boolean", "${value}"),
        ("integer", "${value}"),
        ("float", "${value}"),
        ("array", "${value}"),
        ("reference", "${value}"),
        (
            "references",
            "${Indexing.convertArrayOfNodesToArrayOfNodeIdentifiers(value)}",
        ),
        (
            "DateTime",
            "${value ? Date.format(value, '%Y-%m-%dT%H:%M:%S%:z') : null}",
        ),
        ("ImageInterface", ""),
    ]
    .into_iter()
    .map(|(value_type, expression)| {
        (value_type.to_string(), TypeConfiguration::indexing(expression))
    })
    .collect()
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            max_asset_size_mb: default_max_asset_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indexing: IndexingConfig::default(),
            node_types: NodeTypesConfig::default(),
            default_context: default_context(),
            default_configuration_per_type: default_configuration_per_type(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| IndexerError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// Tables given in the file are merged over the built-in defaults, so
    /// a file only needs to list the entries it changes.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        for (name, helper) in default_context() {
            config.default_context.entry(name).or_insert(helper);
        }
        for (value_type, defaults) in default_configuration_per_type() {
            config
                .default_configuration_per_type
                .entry(value_type)
                .or_insert(defaults);
        }
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. NODEINDEX_CONFIG env var
    /// 2. XDG config file (~/.config/nodeindex/config.toml)
    /// 3. ./nodeindex.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("NODEINDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new(LOCAL_CONFIG_FILE).exists() {
                Self::from_file(LOCAL_CONFIG_FILE)?
            } else {
                Self::default()
            }
        };

        // Fall back to node types next to the XDG config
        if config.node_types.path.is_none() {
            let xdg_node_types = xdg.node_types_file();
            if xdg_node_types.exists() {
                config.node_types.path = Some(xdg_node_types);
            }
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(max_size) = env::var("NODEINDEX_MAX_ASSET_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.indexing.max_asset_size_mb = size;
            }
        }
        if let Ok(path) = env::var("NODEINDEX_NODE_TYPES") {
            self.node_types.path = Some(PathBuf::from(path));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.max_asset_size_mb == 0 {
            return Err(IndexerError::ConfigError(
                "Max asset size must be non-zero".to_string(),
            ));
        }

        for reserved in [NODE_VARIABLE, PROPERTY_NAME_VARIABLE, VALUE_VARIABLE] {
            if self.default_context.contains_key(reserved) {
                return Err(IndexerError::ConfigError(format!(
                    "Default context variable '{reserved}' is reserved"
                )));
            }
        }

        for (name, helper) in &self.default_context {
            if helper.is_empty() {
                return Err(IndexerError::ConfigError(format!(
                    "Default context variable '{name}' has no helper"
                )));
            }
        }

        Ok(())
    }

    /// Value type name to non-empty-or-empty default indexing expression.
    ///
    /// Types without an `indexing` entry are left out.
    pub fn type_default_expressions(&self) -> BTreeMap<String, String> {
        self.default_configuration_per_type
            .iter()
            .filter_map(|(value_type, defaults)| {
                defaults
                    .indexing
                    .clone()
                    .map(|expression| (value_type.clone(), expression))
            })
            .collect()
    }

    /// Asset size limit in bytes
    pub fn max_asset_bytes(&self) -> u64 {
        (self.indexing.max_asset_size_mb as u64) * 1024 * 1024
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Max asset size: {} MB", self.indexing.max_asset_size_mb);
        match &self.node_types.path {
            Some(path) => tracing::info!("  Node types: {:?}", path),
            None => tracing::info!("  Node types: (none)"),
        }
        tracing::info!(
            "  Default context: {}",
            self.default_context.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        tracing::info!(
            "  Type defaults: {} types",
            self.default_configuration_per_type.len()
        );
    }
}
