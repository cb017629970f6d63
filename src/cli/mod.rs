//! CLI adapter for nodeindex
//!
//! Provides a command-line interface over the indexing pipeline. This
//! module depends on `core/` and on the built-in `eel/` evaluator; `core/`
//! depends on neither.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (extraction)    |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      eel/        |<-----|      cli/        |
//! | (expressions)    |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nodeindex - content tree to search document extraction
///
/// Turns typed content nodes into flat index documents and fulltext
/// buckets, driven by node type configuration.
#[derive(Parser, Debug)]
#[command(name = "nodeindex")]
#[command(version)]
#[command(about = "Content node search document extraction", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Node type definitions (TOML), overrides the configured file
    #[arg(long, global = true, env = "NODEINDEX_NODE_TYPES")]
    pub node_types: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index a content tree (JSON node list)
    Index(commands::IndexArgs),

    /// Show a node type followed by all of its supertypes
    Hierarchy(commands::HierarchyArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  nodeindex completions bash > ~/.local/share/bash-completion/completions/nodeindex
    ///   zsh:   nodeindex completions zsh > ~/.zfunc/_nodeindex
    ///   fish:  nodeindex completions fish > ~/.config/fish/completions/nodeindex.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::asset::AssetEncoder;
    use crate::core::config::Config;
    use crate::core::services::Services;
    use crate::core::xdg::XdgDirs;
    use crate::eel::EelEvaluator;
    use std::sync::Arc;

    // Handle completions command early (doesn't need services)
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let xdg = XdgDirs::new();
    xdg.log_paths();

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let node_types = Arc::new(Services::load_node_types(
        &config,
        cli.node_types.as_deref(),
    )?);
    let evaluator = Arc::new(EelEvaluator::new(
        Arc::clone(&node_types),
        AssetEncoder::new(config.max_asset_bytes()),
    ));
    let services = Arc::new(Services::new(config, node_types, evaluator));

    match cli.command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format).await,
        Commands::Hierarchy(args) => {
            commands::hierarchy::execute(args, &services, cli.format).await
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &services, cli.format).await,
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}
