//! nodeindex - search documents from typed content trees
//!
//! Turns the nodes of a content repository into flat index documents and
//! named fulltext buckets. What gets indexed, and how, is configured per
//! node type with small expressions.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (evaluator-agnostic)
//!   - config, error, types, xdg
//!   - node, node_type (content model and type hierarchy)
//!   - indexer (property extraction, fulltext, pipeline)
//!   - services (unified service container)
//!
//! - **eel**: Built-in expression language (depends on core)
//!   - parser, evaluator, helper functions
//!
//! - **cli**: Command-line adapter (depends on core and eel)
//!   - index, hierarchy, show-config, completions
//!
//! # Key Features
//!
//! - Per-type default indexing expressions with explicit opt-out
//! - HTML split into heading and text buckets
//! - Fulltext rolled up into the closest fulltext root
//! - Size-bounded base64 asset encoding

// Core domain logic (evaluator-agnostic)
pub mod core;

// Built-in expression language
pub mod eel;

// Command-line adapter
pub mod cli;
