//! Whole-tree indexing through the service container

use crate::common::{create_test_services, document, index_test_tree, TestTree};
use nodeindex::core::Value;

#[test]
fn test_site_stats() {
    let tree = TestTree::site();
    let services = create_test_services();
    let (documents, stats) = index_test_tree(&services, &tree.nodes_file);

    assert_eq!(documents.len(), 4);
    assert_eq!(stats.nodes_indexed, 4);
    assert_eq!(stats.nodes_skipped, 0);
    assert_eq!(stats.fulltext_roots, 1);
}

#[test]
fn test_page_document() {
    let tree = TestTree::site();
    let (documents, _) = index_test_tree(&create_test_services(), &tree.nodes_file);
    let page = document(&documents, "/sites/demo");

    assert_eq!(page.identifier, "page-1");
    assert_eq!(page.node_type, "Acme:Page");
    assert_eq!(page.properties["title"], Value::from("Hello World"));
    assert_eq!(
        page.properties["published"],
        Value::from("2024-05-01T10:00:00+02:00")
    );
    assert!(!page.properties.contains_key("secret"));
}

#[test]
fn test_content_fulltext_rolls_up_into_page() {
    let tree = TestTree::site();
    let (documents, _) = index_test_tree(&create_test_services(), &tree.nodes_file);
    let page = document(&documents, "/sites/demo");

    assert_eq!(page.fulltext.get("h1"), Some(" Hello World"));
    assert_eq!(page.fulltext.get("h2"), Some("  Welcome"));
    assert_eq!(
        page.fulltext.get("text").map(str::trim),
        Some("Some bold words")
    );

    for path in ["/sites/demo/main/headline", "/sites/demo/main/text"] {
        assert!(document(&documents, path).fulltext.is_empty(), "{path}");
    }
}

#[test]
fn test_download_encodes_asset_and_references() {
    let tree = TestTree::site();
    let (documents, _) = index_test_tree(&create_test_services(), &tree.nodes_file);
    let download = document(&documents, "/sites/demo/main/download");

    assert_eq!(download.properties["file"], Value::from("aGk="));
    assert_eq!(
        download.properties["tags"],
        Value::from(vec!["tag-1".to_string(), "tag-2".to_string()])
    );
}

#[test]
fn test_content_without_root_keeps_its_fulltext() {
    let tree = TestTree::with_nodes(
        r#"[{"identifier": "t", "path": "/orphans/text", "nodeType": "Acme:Headline",
             "properties": {"title": "Alone"}}]"#,
        &[],
    );
    let (documents, stats) = index_test_tree(&create_test_services(), &tree.nodes_file);

    assert_eq!(stats.fulltext_roots, 0);
    assert_eq!(documents[0].fulltext.get("h2"), Some(" Alone"));
}

#[test]
fn test_failing_node_is_skipped() {
    let tree = TestTree::with_nodes(
        r#"[
          {"identifier": "p", "path": "/page", "nodeType": "Acme:Page",
           "properties": {"title": "Kept"}},
          {"identifier": "b", "path": "/page/broken", "nodeType": "Acme:Broken",
           "properties": {"title": "Dropped"}}
        ]"#,
        &[],
    );
    let (documents, stats) = index_test_tree(&create_test_services(), &tree.nodes_file);

    assert_eq!(stats.nodes_indexed, 1);
    assert_eq!(stats.nodes_skipped, 1);
    assert_eq!(stats.expression_failures, 1);
    assert_eq!(documents[0].path, "/page");
}

#[test]
fn test_missing_asset_skips_node() {
    let tree = TestTree::with_nodes(
        r#"[{"identifier": "d", "path": "/download", "nodeType": "Acme:Download",
             "properties": {"file": "files/missing.pdf"}}]"#,
        &[],
    );
    let (documents, stats) = index_test_tree(&create_test_services(), &tree.nodes_file);

    assert!(documents.is_empty());
    assert_eq!(stats.nodes_skipped, 1);
}
