//! Core data types produced by extraction.
//!
//! This module defines the fulltext bucket map, the per-node index
//! document and the statistics reported by the indexing pipeline.

use crate::core::value::Value;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured values extracted from one node, keyed by property name
pub type IndexDocument = BTreeMap<String, Value>;

/// Named fulltext buckets (`h1`..`h6`, `text`, or custom names).
///
/// Content is only ever appended. Every contribution is prefixed with a
/// single space, the first one included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FulltextBuckets(BTreeMap<String, String>);

impl FulltextBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` to `bucket`, creating the bucket if needed
    pub fn append(&mut self, bucket: &str, text: &str) {
        let content = self.0.entry(bucket.to_string()).or_default();
        content.push(' ');
        content.push_str(text);
    }

    /// Append raw content without the separator
    pub(crate) fn push_raw(&mut self, bucket: &str, text: &str) {
        self.0.entry(bucket.to_string()).or_default().push_str(text);
    }

    /// Append every bucket of `other` to this map.
    ///
    /// Uses the same contract as [`FulltextBuckets::append`]: one space
    /// before each merged contribution.
    pub fn merge(&mut self, other: &FulltextBuckets) {
        for (bucket, text) in other.iter() {
            self.append(bucket, text);
        }
    }

    pub fn get(&self, bucket: &str) -> Option<&str> {
        self.0.get(bucket).map(String::as_str)
    }

    pub fn contains(&self, bucket: &str) -> bool {
        self.0.contains_key(bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut String> {
        self.0.values_mut()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for FulltextBuckets {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<FulltextBuckets> for Value {
    fn from(buckets: FulltextBuckets) -> Self {
        Value::Map(
            buckets
                .0
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        )
    }
}

/// Final output for one node
#[derive(Debug, Clone, Serialize)]
pub struct IndexedDocument {
    /// Node identifier
    pub identifier: String,

    /// Absolute node path
    pub path: String,

    /// Node type name
    pub node_type: String,

    /// Extracted property values
    pub properties: IndexDocument,

    /// Fulltext buckets (empty when rolled up into a fulltext root)
    pub fulltext: FulltextBuckets,
}

/// Statistics from an indexing run
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// Number of nodes turned into documents
    pub nodes_indexed: usize,

    /// Number of nodes whose extraction failed
    pub nodes_skipped: usize,

    /// Skipped nodes whose failure came from an expression
    pub expression_failures: usize,

    /// Number of documents that collected descendant fulltext
    pub fulltext_roots: usize,

    /// Indexing duration in milliseconds
    pub duration_ms: u64,

    /// When the run finished
    pub indexed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_prefixes_every_contribution_with_space() {
        let mut buckets = FulltextBuckets::new();
        buckets.append("text", "Hello");
        buckets.append("text", "World");
        assert_eq!(buckets.get("text"), Some(" Hello World"));
    }

    #[test]
    fn test_merge_keeps_separator_contract() {
        let mut root = FulltextBuckets::new();
        root.append("text", "root");

        let mut child = FulltextBuckets::new();
        child.append("text", "child");
        child.append("h1", "Heading");

        root.merge(&child);
        assert_eq!(root.get("text"), Some(" root  child"));
        assert_eq!(root.get("h1"), Some("  Heading"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut buckets = FulltextBuckets::new();
        buckets.append("text", "x");
        assert_eq!(
            serde_json::to_value(&buckets).unwrap(),
            serde_json::json!({"text": " x"})
        );
    }
}
