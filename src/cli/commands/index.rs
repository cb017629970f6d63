//! Index command - extract documents from a content tree

use crate::cli::output::{colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::tree::NodeTree;
use crate::core::types::{IndexStats, IndexedDocument};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the index command
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// JSON file with the content tree's nodes
    pub path: PathBuf,

    /// Only print the summary, not the documents
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub path: String,
    pub stats: IndexStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<IndexedDocument>,
}

/// Execute the index command
pub async fn execute(
    args: IndexArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !args.path.is_file() {
        return Err(format!(
            "Node file '{}' does not exist or is not a file.",
            args.path.display()
        )
        .into());
    }

    if services.node_types.is_empty() {
        return Err("No node types loaded. Pass --node-types or set [node_types] path \
                    in the configuration."
            .into());
    }

    let response = index(args.path.clone(), services).await?;
    let documents = if args.quiet {
        Vec::new()
    } else {
        response.documents
    };
    let response = IndexResponse {
        documents,
        ..response
    };

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

/// Load and index a tree on a blocking thread
async fn index(
    path: PathBuf,
    services: &Arc<Services>,
) -> Result<IndexResponse, Box<dyn std::error::Error>> {
    let services = Arc::clone(services);
    let display_path = path.display().to_string();

    let (documents, stats) = tokio::task::spawn_blocking(move || {
        let tree = NodeTree::from_file(&path, &services.node_types)?;
        services.create_pipeline().index_tree(&tree)
    })
    .await??;

    Ok(IndexResponse {
        path: display_path,
        stats,
        documents,
    })
}

fn print_human(response: &IndexResponse) {
    for document in &response.documents {
        println!(
            "{} {}",
            colors::node_path(&document.path),
            colors::dim(&format!("({})", document.node_type))
        );
        for (name, value) in &document.properties {
            println!("  {}: {}", colors::label(name), value);
        }
        for (bucket, text) in document.fulltext.iter() {
            println!("  {} {}: {}", colors::dim("fulltext"), colors::label(bucket), text.trim());
        }
    }

    let stats = &response.stats;
    println!(
        "{} {} nodes from {} ({} skipped, {} fulltext roots) in {}",
        colors::success("Indexed"),
        colors::number(&stats.nodes_indexed.to_string()),
        colors::file_path(&response.path),
        colors::number(&stats.nodes_skipped.to_string()),
        colors::number(&stats.fulltext_roots.to_string()),
        colors::number(&format_duration(stats.duration_ms as f64 / 1000.0))
    );
}
