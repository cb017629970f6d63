//! Tests for the index CLI command
//!
//! Tests the index command handler:
//! - Indexing a tree in both output formats
//! - Quiet mode
//! - Error cases (missing file, no node types, malformed tree)

use crate::common::{create_test_services, TestTree};
use nodeindex::cli::commands::index::{execute, IndexArgs};
use nodeindex::cli::OutputFormat;
use nodeindex::core::asset::AssetEncoder;
use nodeindex::core::config::Config;
use nodeindex::core::services::Services;
use nodeindex::core::NodeTypeManager;
use nodeindex::eel::EelEvaluator;
use std::sync::Arc;

#[tokio::test]
async fn test_index_human() {
    let services = create_test_services();
    let tree = TestTree::site();

    let args = IndexArgs {
        path: tree.nodes_file.clone(),
        quiet: false,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_index_json_quiet() {
    let services = create_test_services();
    let tree = TestTree::site();

    let args = IndexArgs {
        path: tree.nodes_file.clone(),
        quiet: true,
    };

    let result = execute(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Index should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_index_missing_file() {
    let services = create_test_services();
    let tree = TestTree::site();

    let args = IndexArgs {
        path: tree.path().join("nope.json"),
        quiet: true,
    };

    let err = execute(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn test_index_without_node_types() {
    let config = Config::default();
    let node_types = Arc::new(NodeTypeManager::new());
    let evaluator = Arc::new(EelEvaluator::new(
        Arc::clone(&node_types),
        AssetEncoder::default(),
    ));
    let services = Arc::new(Services::new(config, node_types, evaluator));
    let tree = TestTree::site();

    let args = IndexArgs {
        path: tree.nodes_file.clone(),
        quiet: true,
    };

    let err = execute(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No node types loaded"));
}

#[tokio::test]
async fn test_index_unknown_node_type() {
    let services = create_test_services();
    let tree = TestTree::with_nodes(
        r#"[{"identifier": "x", "path": "/x", "nodeType": "Acme:Unknown"}]"#,
        &[],
    );

    let args = IndexArgs {
        path: tree.nodes_file.clone(),
        quiet: true,
    };

    let err = execute(args, &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Acme:Unknown"));
}

#[tokio::test]
async fn test_index_abstract_node_type() {
    let services = create_test_services();
    let tree = TestTree::with_nodes(
        r#"[{"identifier": "x", "path": "/x", "nodeType": "Acme:Document"}]"#,
        &[],
    );

    let args = IndexArgs {
        path: tree.nodes_file.clone(),
        quiet: true,
    };

    let err = execute(args, &services, OutputFormat::Json)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("abstract"));
}
