//! In-memory content tree.
//!
//! Nodes are keyed by absolute path, so iteration visits parents before
//! their children. Trees are loaded from a JSON array of node records:
//!
//! ```json
//! [
//!   {"identifier": "p1", "path": "/sites/demo", "nodeType": "Acme:Page",
//!    "properties": {"title": "Home"}}
//! ]
//! ```

use crate::core::asset::FileAsset;
use crate::core::error::{IndexerError, Result};
use crate::core::indexer::build_all_path_prefixes;
use crate::core::node::Node;
use crate::core::node_type::{NodeType, NodeTypeManager};
use crate::core::value::Value;
use chrono::DateTime;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Declared type of date properties
const DATETIME_TYPE: &str = "DateTime";

/// Declared types of asset properties
const ASSET_TYPE: &str = "Asset";
const ASSET_LIST_TYPE: &str = "array<Asset>";

/// One node record of a tree file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeRecord {
    identifier: String,
    path: String,
    node_type: String,
    #[serde(default)]
    properties: serde_json::Map<String, serde_json::Value>,
}

/// Content nodes keyed by path
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: BTreeMap<String, Arc<Node>>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tree from a JSON file.
    ///
    /// Asset paths are resolved relative to the file's directory.
    pub fn from_file(path: impl AsRef<Path>, node_types: &NodeTypeManager) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json_str(&contents, node_types, base_dir)
    }

    /// Parse a tree from JSON text, resolving asset paths against `base_dir`
    pub fn from_json_str(
        contents: &str,
        node_types: &NodeTypeManager,
        base_dir: &Path,
    ) -> Result<Self> {
        let records: Vec<NodeRecord> = serde_json::from_str(contents)?;

        let mut tree = Self::new();
        for record in records {
            let node_type = node_types.get(&record.node_type).map_err(|_| {
                IndexerError::InvalidNode(format!(
                    "{} has unknown node type '{}'",
                    record.path, record.node_type
                ))
            })?;
            if node_type.is_abstract() {
                return Err(IndexerError::InvalidNode(format!(
                    "{} has abstract node type '{}'",
                    record.path, record.node_type
                )));
            }

            let mut node = Node::new(record.identifier, record.path, Arc::clone(&node_type));
            for (name, json) in record.properties {
                let value = convert_property(&node_type, &name, json, base_dir)
                    .map_err(|message| {
                        IndexerError::InvalidNode(format!("{}.{name}: {message}", node.path()))
                    })?;
                node.set_property(name, value);
            }
            tree.insert(node)?;
        }

        tracing::debug!("Loaded content tree with {} nodes", tree.len());
        Ok(tree)
    }

    /// Add a node; its path must be absolute and unused
    pub fn insert(&mut self, node: Node) -> Result<Arc<Node>> {
        if !node.path().starts_with('/') {
            return Err(IndexerError::InvalidNode(format!(
                "path '{}' is not absolute",
                node.path()
            )));
        }
        if self.nodes.contains_key(node.path()) {
            return Err(IndexerError::InvalidNode(format!(
                "duplicate path '{}'",
                node.path()
            )));
        }

        let node = Arc::new(node);
        self.nodes.insert(node.path().to_string(), Arc::clone(&node));
        Ok(node)
    }

    pub fn get(&self, path: &str) -> Option<&Arc<Node>> {
        self.nodes.get(path)
    }

    /// All nodes, parents before children
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<Node>> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest proper ancestor of `node` whose type is a fulltext root
    pub fn closest_fulltext_root(&self, node: &Node) -> Option<&Arc<Node>> {
        let prefixes = build_all_path_prefixes(node.path());
        prefixes
            .iter()
            .rev()
            .filter(|prefix| prefix.as_str() != node.path())
            .filter_map(|prefix| self.nodes.get(prefix))
            .find(|ancestor| ancestor.node_type().is_fulltext_root())
    }
}

/// Convert a JSON property value according to the declared property type
fn convert_property(
    node_type: &NodeType,
    name: &str,
    json: serde_json::Value,
    base_dir: &Path,
) -> std::result::Result<Value, String> {
    let declared = node_type.property(name).map(|p| p.value_type.as_str());

    match (declared, json) {
        (_, serde_json::Value::Null) => Ok(Value::Null),
        (Some(DATETIME_TYPE), serde_json::Value::String(text)) => DateTime::parse_from_rfc3339(&text)
            .map(Value::DateTime)
            .map_err(|e| format!("invalid date '{text}': {e}")),
        (Some(ASSET_TYPE), serde_json::Value::String(location)) => Ok(file_asset(&location, base_dir)),
        (Some(ASSET_LIST_TYPE), serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(location) => Ok(file_asset(&location, base_dir)),
                other => Err(format!("expected asset path, found {other}")),
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map(Value::List),
        (_, json) => Ok(Value::from(json)),
    }
}

fn file_asset(location: &str, base_dir: &Path) -> Value {
    Value::Asset(Arc::new(FileAsset::with_identifier(
        location,
        base_dir.join(location),
    )))
}
