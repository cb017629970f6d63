//! Error types and error handling for nodeindex.
//!
//! This module defines the error type shared by the extraction core,
//! the node type registry and the content tree. Errors raised by an
//! expression evaluator are wrapped transparently so callers see the
//! evaluator's own message.

use crate::core::expression::ExpressionError;
use thiserror::Error;

/// Result type alias for nodeindex operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Main error type for nodeindex
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error(
        "Fulltext extractor of property '{property}' on node '{path}' did not \
         return a bucket map (expression: {expression})"
    )]
    InvalidFulltextExpression {
        property: String,
        path: String,
        expression: String,
    },

    #[error("Cannot index value of type '{0}' as an asset")]
    UnsupportedAssetType(String),

    #[error("Asset '{identifier}' exceeds the size limit of {limit_bytes} bytes")]
    AssetTooLarge {
        identifier: String,
        limit_bytes: u64,
    },

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("Node type not found: {0}")]
    NodeTypeNotFound(String),

    #[error("Node type inheritance cycle: {0}")]
    NodeTypeCycle(String),

    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl IndexerError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error stems from node type or service configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            IndexerError::NodeTypeNotFound(_)
                | IndexerError::NodeTypeCycle(_)
                | IndexerError::ConfigError(_)
                | IndexerError::TomlError(_)
        )
    }

    /// Check if this error was raised while evaluating an expression
    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            IndexerError::Expression(_) | IndexerError::InvalidFulltextExpression { .. }
        )
    }
}
