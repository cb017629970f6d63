//! Content nodes.
//!
//! A node is a single item of the content tree: an identifier, an
//! absolute path, one resolved node type and a property map. The
//! extraction core only ever reads nodes.

use crate::core::node_type::NodeType;
use crate::core::value::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A typed, property-bearing content node
#[derive(Debug, Clone)]
pub struct Node {
    identifier: String,
    path: String,
    node_type: Arc<NodeType>,
    properties: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(
        identifier: impl Into<String>,
        path: impl Into<String>,
        node_type: Arc<NodeType>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
            node_type,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_property(name, value);
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last path segment (empty for the root node)
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    /// Path of the parent node, `None` for the root
    pub fn parent_path(&self) -> Option<&str> {
        let trimmed = self.path.trim_end_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.rfind('/') {
            Some(0) => Some("/"),
            Some(idx) => Some(&trimmed[..idx]),
            None => None,
        }
    }

    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    pub fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }
}
