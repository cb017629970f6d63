//! Core domain logic (evaluator- and transport-agnostic)
//!
//! This module contains all extraction logic. Expression languages and
//! user interfaces plug in from the outside.
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **value**: Dynamic values of properties and expression results
//! - **asset**: Binary assets and base64 encoding
//! - **node** / **node_type**: Content nodes and their schema
//! - **tree**: In-memory content tree
//! - **expression**: Evaluator seam and default context
//! - **indexer**: Property extraction, fulltext buckets, pipeline
//! - **types**: Output data structures
//! - **xdg**: XDG directory handling
//! - **services**: Unified service container

pub mod asset;
pub mod config;
pub mod error;
pub mod expression;
pub mod indexer;
pub mod node;
pub mod node_type;
pub mod services;
pub mod tree;
pub mod types;
pub mod value;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{IndexerError, Result};
pub use node::Node;
pub use node_type::{NodeType, NodeTypeManager};
pub use services::Services;
pub use value::Value;
