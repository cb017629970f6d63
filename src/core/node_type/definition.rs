//! Serde model of node type definitions as written in TOML.
//!
//! ```toml
//! [node_types."Acme:Page"]
//! super_types = ["Acme:Document"]
//! search.fulltext = { enable = true, is_root = true }
//!
//! [node_types."Acme:Page".properties.title]
//! type = "string"
//! search.fulltext_extractor = "${Indexing.extractInto('h1', value)}"
//! ```
//!
//! Property tables keep their order of appearance.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Top-level layout of a node types file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeTypesFile {
    #[serde(default)]
    pub node_types: BTreeMap<String, NodeTypeDefinition>,
}

/// A node type as declared, before inheritance is resolved
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeTypeDefinition {
    #[serde(default)]
    pub super_types: Vec<String>,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub search: SearchDefinition,

    #[serde(default, deserialize_with = "ordered_properties")]
    pub properties: Vec<(String, PropertyDefinition)>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDefinition {
    #[serde(default)]
    pub fulltext: FulltextDefinition,
}

/// Fulltext flags; unset flags are inherited from supertypes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FulltextDefinition {
    pub enable: Option<bool>,
    pub is_root: Option<bool>,
}

/// A property as declared; unset fields are inherited from supertypes
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PropertyDefinition {
    #[serde(rename = "type")]
    pub value_type: Option<String>,

    #[serde(default)]
    pub search: PropertySearchDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PropertySearchDefinition {
    pub indexing: Option<String>,
    pub fulltext_extractor: Option<String>,
}

impl PropertyDefinition {
    /// Overlay `other` on top of `self`, field by field
    pub fn merge(&mut self, other: &PropertyDefinition) {
        if other.value_type.is_some() {
            self.value_type = other.value_type.clone();
        }
        if other.search.indexing.is_some() {
            self.search.indexing = other.search.indexing.clone();
        }
        if other.search.fulltext_extractor.is_some() {
            self.search.fulltext_extractor = other.search.fulltext_extractor.clone();
        }
    }
}

fn ordered_properties<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(String, PropertyDefinition)>, D::Error>
where
    D: Deserializer<'de>,
{
    let table = toml::Table::deserialize(deserializer)?;
    let mut properties = Vec::with_capacity(table.len());
    for (name, value) in table {
        match value.try_into::<PropertyDefinition>() {
            Ok(definition) => properties.push((name, definition)),
            Err(e) => return Err(D::Error::custom(format!("property '{name}': {e}"))),
        }
    }
    Ok(properties)
}
