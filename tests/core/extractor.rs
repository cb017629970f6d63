//! Property extraction through configured node types

use crate::common::{create_test_services, node_types};
use nodeindex::core::indexer::PropertyExtractor;
use nodeindex::core::types::FulltextBuckets;
use nodeindex::core::{IndexerError, Node, NodeTypeManager, Services, Value};
use nodeindex::eel::EelEvaluator;
use std::sync::Arc;

fn strings(items: &[&str]) -> Value {
    Value::from(items.iter().map(|s| s.to_string()).collect::<Vec<_>>())
}

fn extractor() -> PropertyExtractor {
    create_test_services().create_pipeline().extractor().clone()
}

fn page(title: &str) -> Arc<Node> {
    let page_type = node_types().get("Acme:Page").unwrap();
    Arc::new(Node::new("page-1", "/sites/demo", page_type).with_property("title", title))
}

#[test]
fn test_title_lands_in_document_and_h1_bucket() {
    let mut buckets = FulltextBuckets::new();
    let document = extractor()
        .extract_properties_and_fulltext(&page("Hello World"), &mut buckets, None)
        .unwrap();

    assert_eq!(document["title"], Value::from("Hello World"));
    assert_eq!(buckets.get("h1"), Some(" Hello World"));
    assert_eq!(buckets.len(), 1);
}

#[test]
fn test_node_metadata_properties() {
    let mut buckets = FulltextBuckets::new();
    let document = extractor()
        .extract_properties_and_fulltext(&page("Hello"), &mut buckets, None)
        .unwrap();

    assert_eq!(document["__identifier"], Value::from("page-1"));
    assert_eq!(document["__parentPath"], strings(&["/", "/sites"]));
    assert_eq!(
        document["__typeAndSupertypes"],
        strings(&["Acme:Page", "Acme:Document", "Acme:Node"])
    );
}

#[test]
fn test_unset_date_indexes_null() {
    let mut buckets = FulltextBuckets::new();
    let document = extractor()
        .extract_properties_and_fulltext(&page("Hello"), &mut buckets, None)
        .unwrap();

    assert_eq!(document.get("published"), Some(&Value::Null));
}

#[test]
fn test_empty_expression_and_empty_type_default_are_not_indexed() {
    let page_type = node_types().get("Acme:Page").unwrap();
    let node = Arc::new(
        Node::new("page-1", "/sites/demo", page_type)
            .with_property("title", "Hello")
            .with_property("secret", "hidden"),
    );

    let mut unindexed = Vec::new();
    let mut record = |name: &str| unindexed.push(name.to_string());
    let mut buckets = FulltextBuckets::new();
    let document = extractor()
        .extract_properties_and_fulltext(&node, &mut buckets, Some(&mut record))
        .unwrap();

    assert!(!document.contains_key("secret"));
    assert!(!document.contains_key("image"));
    assert_eq!(unindexed, vec!["secret", "image"]);
}

#[test]
fn test_fulltext_disabled_type_fills_no_buckets() {
    let base_type = node_types().get("Acme:Node").unwrap();
    let node = Arc::new(Node::new("n", "/n", base_type));

    let mut buckets = FulltextBuckets::new();
    let document = extractor()
        .extract_properties_and_fulltext(&node, &mut buckets, None)
        .unwrap();

    assert_eq!(document["__identifier"], Value::from("n"));
    assert!(buckets.is_empty());
}

#[test]
fn test_invalid_expression_fails_extraction() {
    let broken = node_types().get("Acme:Broken").unwrap();
    let node = Arc::new(Node::new("b", "/b", broken).with_property("title", "Oops"));

    let mut buckets = FulltextBuckets::new();
    let err = extractor()
        .extract_properties_and_fulltext(&node, &mut buckets, None)
        .unwrap_err();

    assert!(matches!(err, IndexerError::Expression(_)), "got {err:?}");
}

#[test]
fn test_buckets_accumulate_across_nodes() {
    let extractor = extractor();
    let mut buckets = FulltextBuckets::new();
    extractor
        .extract_properties_and_fulltext(&page("One"), &mut buckets, None)
        .unwrap();
    extractor
        .extract_properties_and_fulltext(&page("Two"), &mut buckets, None)
        .unwrap();

    assert_eq!(buckets.get("h1"), Some(" One Two"));
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_extraction_types_are_send_and_sync() {
    assert_send_sync::<PropertyExtractor>();
    assert_send_sync::<EelEvaluator>();
    assert_send_sync::<Services>();
    assert_send_sync::<NodeTypeManager>();
    assert_send_sync::<Node>();
    assert_send_sync::<Value>();
}

#[test]
fn test_nodes_extract_concurrently_with_own_buckets() {
    let extractor = extractor();
    let headline = node_types().get("Acme:Headline").unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let extractor = extractor.clone();
            let node = Arc::new(
                Node::new(
                    format!("headline-{i}"),
                    format!("/sites/demo/main/headline-{i}"),
                    Arc::clone(&headline),
                )
                .with_property("title", format!("v{i}")),
            );
            std::thread::spawn(move || {
                let mut buckets = FulltextBuckets::new();
                let document = extractor
                    .extract_properties_and_fulltext(&node, &mut buckets, None)
                    .unwrap();
                (document, buckets)
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        let (document, buckets) = worker.join().unwrap();
        assert_eq!(document["title"], Value::from(format!("v{i}")));
        assert_eq!(document["__identifier"], Value::from(format!("headline-{i}")));
        assert_eq!(buckets.get("h2"), Some(format!(" v{i}").as_str()));
        assert_eq!(buckets.len(), 1);
    }
}
