//! Config command - show current configuration

use crate::cli::output::{colors, format_bytes};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also list the loaded node type names
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub config_file: String,
    pub node_types_file: Option<String>,
    pub node_types_loaded: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub node_types: Vec<String>,
    pub max_asset_size_mb: usize,
    pub default_context: BTreeMap<String, String>,
    pub type_defaults: BTreeMap<String, String>,
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = &services.config;
    let xdg = XdgDirs::new();

    let response = ConfigResponse {
        config_file: xdg.config_file().to_string_lossy().into_owned(),
        node_types_file: config
            .node_types
            .path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned()),
        node_types_loaded: services.node_types.len(),
        node_types: if args.all {
            services.node_types.names().map(str::to_string).collect()
        } else {
            Vec::new()
        },
        max_asset_size_mb: config.indexing.max_asset_size_mb,
        default_context: config.default_context.clone(),
        type_defaults: config.type_default_expressions(),
    };

    match format {
        OutputFormat::Human => {
            println!("{}", colors::label("Configuration:"));
            println!("  config_file: {}", colors::file_path(&response.config_file));
            println!(
                "  node_types_file: {}",
                response.node_types_file.as_deref().unwrap_or("(none)")
            );
            println!(
                "  node_types_loaded: {}",
                colors::number(&response.node_types_loaded.to_string())
            );
            for name in &response.node_types {
                println!("    {}", colors::node_type(name));
            }
            println!(
                "  max_asset_size: {}",
                format_bytes(config.max_asset_bytes())
            );
            println!("  default_context:");
            for (name, helper) in &response.default_context {
                println!("    {name} = {helper}");
            }
            println!("  type_defaults:");
            for (value_type, expression) in &response.type_defaults {
                if expression.is_empty() {
                    println!("    {value_type}: {}", colors::dim("(not indexed)"));
                } else {
                    println!("    {value_type}: {expression}");
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
