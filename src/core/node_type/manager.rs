//! Name-keyed node type registry.
//!
//! Loads node type definitions and resolves supertype inheritance:
//! supertypes are merged in declaration order (later ones win), then the
//! type's own declarations are laid on top. Unknown supertypes and
//! inheritance cycles are reported as configuration errors.

use crate::core::error::{IndexerError, Result};
use crate::core::node_type::definition::{NodeTypeDefinition, NodeTypesFile, PropertyDefinition};
use crate::core::node_type::{
    NodeType, PropertyConfiguration, SearchConfiguration, DEFAULT_PROPERTY_TYPE,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Registry of resolved node types
#[derive(Debug, Clone, Default)]
pub struct NodeTypeManager {
    node_types: BTreeMap<String, Arc<NodeType>>,
}

impl NodeTypeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and resolve node types from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            IndexerError::ConfigError(format!("Failed to read node types file {path:?}: {e}"))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load and resolve node types from TOML source
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: NodeTypesFile = toml::from_str(contents)?;
        Self::from_definitions(&file.node_types)
    }

    /// Resolve inheritance for a set of definitions
    pub fn from_definitions(definitions: &BTreeMap<String, NodeTypeDefinition>) -> Result<Self> {
        let mut resolver = Resolver {
            definitions,
            resolved: BTreeMap::new(),
            in_progress: Vec::new(),
        };

        let mut manager = Self::new();
        for (name, definition) in definitions {
            let inherited = resolver.resolve(name)?;
            manager.register(inherited.into_node_type(name, definition));
        }

        tracing::debug!("Resolved {} node types", manager.len());
        Ok(manager)
    }

    /// Register an already resolved node type, replacing one of the same name
    pub fn register(&mut self, node_type: NodeType) -> Arc<NodeType> {
        let node_type = Arc::new(node_type);
        self.node_types
            .insert(node_type.name().to_string(), Arc::clone(&node_type));
        node_type
    }

    /// Get a node type by name
    pub fn get(&self, name: &str) -> Result<Arc<NodeType>> {
        self.lookup(name)
            .cloned()
            .ok_or_else(|| IndexerError::NodeTypeNotFound(name.to_string()))
    }

    /// Borrow a node type by name
    pub fn lookup(&self, name: &str) -> Option<&Arc<NodeType>> {
        self.node_types.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.node_types.contains_key(name)
    }

    /// Registered type names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.node_types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }
}

/// Inherited configuration of one type, before conversion
#[derive(Debug, Clone, Default)]
struct Inherited {
    properties: Vec<(String, PropertyDefinition)>,
    fulltext_enable: Option<bool>,
    fulltext_root: Option<bool>,
}

impl Inherited {
    fn overlay_properties(&mut self, properties: &[(String, PropertyDefinition)]) {
        for (name, definition) in properties {
            match self.properties.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => existing.merge(definition),
                None => self.properties.push((name.clone(), definition.clone())),
            }
        }
    }

    fn overlay(&mut self, other: &Inherited) {
        self.overlay_properties(&other.properties);
        if other.fulltext_enable.is_some() {
            self.fulltext_enable = other.fulltext_enable;
        }
        if other.fulltext_root.is_some() {
            self.fulltext_root = other.fulltext_root;
        }
    }

    fn into_node_type(self, name: &str, definition: &NodeTypeDefinition) -> NodeType {
        let search = SearchConfiguration {
            fulltext_enabled: self.fulltext_enable.unwrap_or(false),
            fulltext_root: self.fulltext_root.unwrap_or(false),
        };

        let mut node_type = NodeType::new(name)
            .with_supertypes(definition.super_types.iter().cloned())
            .with_search(search);
        if definition.is_abstract {
            node_type = node_type.as_abstract();
        }

        for (property, definition) in self.properties {
            let configuration = PropertyConfiguration {
                value_type: definition
                    .value_type
                    .unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string()),
                indexing: definition.search.indexing,
                fulltext_extractor: definition.search.fulltext_extractor,
            };
            node_type = node_type.with_property(property, configuration);
        }

        node_type
    }
}

struct Resolver<'a> {
    definitions: &'a BTreeMap<String, NodeTypeDefinition>,
    resolved: BTreeMap<String, Inherited>,
    in_progress: Vec<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, name: &str) -> Result<Inherited> {
        if let Some(inherited) = self.resolved.get(name) {
            return Ok(inherited.clone());
        }

        if self.in_progress.iter().any(|n| n == name) {
            return Err(IndexerError::NodeTypeCycle(format!(
                "{} -> {}",
                self.in_progress.join(" -> "),
                name
            )));
        }

        let definitions = self.definitions;
        let definition = definitions.get(name).ok_or_else(|| {
            IndexerError::NodeTypeNotFound(match self.in_progress.last() {
                Some(child) => format!("{name} (supertype of {child})"),
                None => name.to_string(),
            })
        })?;

        self.in_progress.push(name.to_string());
        let mut inherited = Inherited::default();
        for supertype in &definition.super_types {
            let parent = self.resolve(supertype)?;
            inherited.overlay(&parent);
        }
        inherited.overlay(&Inherited {
            properties: definition.properties.clone(),
            fulltext_enable: definition.search.fulltext.enable,
            fulltext_root: definition.search.fulltext.is_root,
        });
        self.in_progress.pop();

        self.resolved.insert(name.to_string(), inherited.clone());
        Ok(inherited)
    }
}
