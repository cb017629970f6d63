// Test helper functions

use super::fixtures::NODE_TYPES;
use nodeindex::core::asset::AssetEncoder;
use nodeindex::core::config::Config;
use nodeindex::core::services::Services;
use nodeindex::core::tree::NodeTree;
use nodeindex::core::types::{IndexStats, IndexedDocument};
use nodeindex::core::NodeTypeManager;
use nodeindex::eel::EelEvaluator;
use std::path::Path;
use std::sync::Arc;

/// Node types of the shared fixture
#[allow(dead_code)] // Used in integration tests
pub fn node_types() -> Arc<NodeTypeManager> {
    Arc::new(NodeTypeManager::from_toml_str(NODE_TYPES).expect("Fixture node types are valid"))
}

/// Create services with default configuration and the fixture node types
#[allow(dead_code)] // Used in integration tests
pub fn create_test_services() -> Arc<Services> {
    let config = Config::default();
    let node_types = node_types();
    let evaluator = Arc::new(EelEvaluator::new(
        Arc::clone(&node_types),
        AssetEncoder::new(config.max_asset_bytes()),
    ));
    Arc::new(Services::new(config, node_types, evaluator))
}

/// Load and index a tree file, returning documents and stats
#[allow(dead_code)] // Used in integration tests
pub fn index_test_tree(
    services: &Services,
    nodes_file: &Path,
) -> (Vec<IndexedDocument>, IndexStats) {
    let tree = NodeTree::from_file(nodes_file, &services.node_types).expect("Failed to load tree");
    services
        .create_pipeline()
        .index_tree(&tree)
        .expect("Failed to index tree")
}

/// Find the document of `path`
#[allow(dead_code)] // Used in integration tests
pub fn document<'a>(documents: &'a [IndexedDocument], path: &str) -> &'a IndexedDocument {
    documents
        .iter()
        .find(|d| d.path == path)
        .unwrap_or_else(|| panic!("No document for {path}"))
}
