//! Hierarchy command - flatten a node type's supertypes

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::node_type::extract_node_type_names_and_supertypes;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the hierarchy command
#[derive(Args, Debug)]
pub struct HierarchyArgs {
    /// Node type name, e.g. "Acme:Page"
    pub node_type: String,
}

/// Hierarchy response
#[derive(Debug, Serialize)]
pub struct HierarchyResponse {
    pub node_type: String,
    pub names: Vec<String>,
}

/// Execute the hierarchy command
pub async fn execute(
    args: HierarchyArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let node_type = services.node_types.get(&args.node_type).map_err(|_| {
        format!(
            "Node type '{}' not found. {} node types are loaded.",
            args.node_type,
            services.node_types.len()
        )
    })?;

    let names = extract_node_type_names_and_supertypes(&services.node_types, &node_type)?;
    let response = HierarchyResponse {
        node_type: args.node_type,
        names,
    };

    match format {
        OutputFormat::Human => {
            let (own, supertypes) = response
                .names
                .split_first()
                .unwrap_or((&response.node_type, &[][..]));
            println!("{}", colors::node_type(own));
            for name in supertypes {
                println!("  {}", name);
            }
            println!(
                "{} supertypes",
                colors::number(&supertypes.len().to_string())
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
