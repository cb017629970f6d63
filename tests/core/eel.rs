//! Expression helpers as used from node type configuration

use crate::common::node_types;
use nodeindex::core::asset::{AssetEncoder, InMemoryAsset};
use nodeindex::core::config::Config;
use nodeindex::core::expression::{DefaultContext, ExpressionEvaluator};
use nodeindex::core::{Node, Value};
use nodeindex::eel::EelEvaluator;
use std::sync::Arc;

fn evaluate(expression: &str, value: Value) -> Result<Value, String> {
    let manager = node_types();
    let evaluator = EelEvaluator::new(Arc::clone(&manager), AssetEncoder::new(8));
    let page = manager.get("Acme:Page").unwrap();
    let node = Arc::new(Node::new("page-1", "/sites/demo/about", page).with_property("title", "About"));

    let context = DefaultContext::from_settings(&Config::default().default_context)
        .build(&node, "title", value);
    evaluator
        .evaluate(expression, &context)
        .map_err(|e| e.to_string())
}

#[test]
fn test_extract_html_tags_splits_headings() {
    let result = evaluate(
        "${Indexing.extractHtmlTags(value)}",
        Value::from("<h2>Intro</h2><p>Body</p>"),
    )
    .unwrap();

    let buckets = result.as_map().unwrap();
    assert_eq!(buckets["h2"].as_str().map(str::trim), Some("Intro"));
    assert_eq!(buckets["text"].as_str().map(str::trim), Some("Body"));
}

#[test]
fn test_path_prefixes_of_node() {
    let result = evaluate("${Indexing.buildAllPathPrefixes(node.path)}", Value::Null).unwrap();
    let expected: Vec<String> = ["/", "/sites", "/sites/demo", "/sites/demo/about"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(result, Value::from(expected));
}

#[test]
fn test_node_type_map_is_accepted() {
    let result = evaluate(
        "${Indexing.extractNodeTypeNamesAndSupertypes(node.nodeType)}",
        Value::Null,
    )
    .unwrap();
    assert_eq!(result.as_list().map(<[Value]>::len), Some(3));
}

#[test]
fn test_asset_over_limit_fails() {
    let asset = Value::Asset(Arc::new(InMemoryAsset::new("big", vec![0u8; 9])));
    let err = evaluate("${Indexing.indexAsset(value)}", asset).unwrap_err();
    assert!(!err.is_empty());

    let small = Value::Asset(Arc::new(InMemoryAsset::new("small", b"hi".to_vec())));
    assert_eq!(
        evaluate("${Indexing.indexAsset(value)}", small).unwrap(),
        Value::from("aGk=")
    );
}

#[test]
fn test_conditional_and_string_helpers() {
    assert_eq!(
        evaluate("${value ? String.toLowerCase(value) : 'none'}", Value::from("ABC")).unwrap(),
        Value::from("abc")
    );
    assert_eq!(
        evaluate("${value ? String.toLowerCase(value) : 'none'}", Value::Null).unwrap(),
        Value::from("none")
    );
}

#[test]
fn test_unknown_helper_is_an_error() {
    let err = evaluate("${Indexing.doesNotExist(value)}", Value::Null).unwrap_err();
    assert!(err.contains("doesNotExist"), "{err}");
}
