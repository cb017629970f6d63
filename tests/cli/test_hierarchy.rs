//! Tests for the hierarchy CLI command

use crate::common::create_test_services;
use nodeindex::cli::commands::hierarchy::{execute, HierarchyArgs};
use nodeindex::cli::OutputFormat;

#[tokio::test]
async fn test_hierarchy_human() {
    let services = create_test_services();
    let args = HierarchyArgs {
        node_type: "Acme:Headline".to_string(),
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Hierarchy should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_hierarchy_json() {
    let services = create_test_services();
    let args = HierarchyArgs {
        node_type: "Acme:Page".to_string(),
    };

    let result = execute(args, &services, OutputFormat::Json).await;
    assert!(result.is_ok(), "Hierarchy should succeed: {:?}", result.err());
}

#[tokio::test]
async fn test_hierarchy_unknown_type() {
    let services = create_test_services();
    let args = HierarchyArgs {
        node_type: "Acme:Missing".to_string(),
    };

    let err = execute(args, &services, OutputFormat::Human)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Acme:Missing"));
    assert!(err.to_string().contains("not found"));
}
