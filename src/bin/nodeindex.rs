//! nodeindex CLI - extract search documents from a content tree
//!
//! # Examples
//!
//! ```bash
//! # Index a content tree
//! nodeindex --node-types node-types.toml index nodes.json
//!
//! # Show the supertype chain of a node type
//! nodeindex --node-types node-types.toml hierarchy Acme:Page
//!
//! # Show configuration
//! nodeindex show-config
//! ```
//!
//! Logs go to stderr. `RUST_LOG` controls the level (default
//! `nodeindex=warn`); `NODEINDEX_LOG_FORMAT=json` switches to JSON lines.

use clap::Parser;
use nodeindex::cli::output::print_error;
use nodeindex::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "nodeindex=warn".into());
    let json = std::env::var("NODEINDEX_LOG_FORMAT").is_ok_and(|format| format == "json");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
