//! Unified service container for nodeindex
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::expression::ExpressionEvaluator;
use crate::core::indexer::{IndexingPipeline, PropertyExtractor};
use crate::core::node_type::NodeTypeManager;
use std::path::Path;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Application configuration
    pub config: Arc<Config>,

    /// Registry of resolved node types
    pub node_types: Arc<NodeTypeManager>,

    /// Evaluator for indexing and fulltext expressions
    pub evaluator: Arc<dyn ExpressionEvaluator>,
}

impl Services {
    /// Create services from their parts
    pub fn new(
        config: Config,
        node_types: Arc<NodeTypeManager>,
        evaluator: Arc<dyn ExpressionEvaluator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            node_types,
            evaluator,
        }
    }

    /// Load the node types named by the configuration (or `override_path`)
    ///
    /// Without any configured file the registry is empty.
    pub fn load_node_types(config: &Config, override_path: Option<&Path>) -> Result<NodeTypeManager> {
        match override_path.or(config.node_types.path.as_deref()) {
            Some(path) => {
                let manager = NodeTypeManager::from_file(path)?;
                tracing::info!("Loaded {} node types from {:?}", manager.len(), path);
                Ok(manager)
            }
            None => {
                tracing::warn!("No node types configured");
                Ok(NodeTypeManager::new())
            }
        }
    }

    /// Create an IndexingPipeline using the configured type defaults
    pub fn create_pipeline(&self) -> IndexingPipeline {
        IndexingPipeline::new(PropertyExtractor::from_config(
            &self.config,
            Arc::clone(&self.evaluator),
        ))
    }
}
