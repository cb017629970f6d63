//! Node types: the schema every content node is an instance of.
//!
//! - **NodeType**: resolved type with effective (inherited) properties
//! - **PropertyConfiguration**: per-property indexing rules
//! - **NodeTypeManager**: name-keyed registry, loads TOML definitions
//! - **hierarchy**: supertype flattening

mod definition;
pub mod hierarchy;
mod manager;

pub use definition::{
    FulltextDefinition, NodeTypeDefinition, NodeTypesFile, PropertyDefinition,
    PropertySearchDefinition, SearchDefinition,
};
pub use hierarchy::extract_node_type_names_and_supertypes;
pub use manager::NodeTypeManager;

/// Value type assumed for properties that do not declare one
pub const DEFAULT_PROPERTY_TYPE: &str = "string";

/// Indexing rules of a single property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyConfiguration {
    /// Declared value type, used to find a type-default indexing expression
    pub value_type: String,

    /// Explicit indexing expression; `Some("")` disables indexing
    pub indexing: Option<String>,

    /// Expression producing a bucket map for fulltext extraction
    pub fulltext_extractor: Option<String>,
}

impl PropertyConfiguration {
    pub fn new(value_type: impl Into<String>) -> Self {
        Self {
            value_type: value_type.into(),
            indexing: None,
            fulltext_extractor: None,
        }
    }

    pub fn with_indexing(mut self, expression: impl Into<String>) -> Self {
        self.indexing = Some(expression.into());
        self
    }

    pub fn with_fulltext_extractor(mut self, expression: impl Into<String>) -> Self {
        self.fulltext_extractor = Some(expression.into());
        self
    }
}

impl Default for PropertyConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_PROPERTY_TYPE)
    }
}

/// Type-level search settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchConfiguration {
    /// Whether fulltext extractors of this type's properties run at all
    pub fulltext_enabled: bool,

    /// Whether nodes of this type collect the fulltext of their descendants
    pub fulltext_root: bool,
}

/// A resolved node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeType {
    name: String,
    supertypes: Vec<String>,
    properties: Vec<(String, PropertyConfiguration)>,
    search: SearchConfiguration,
    is_abstract: bool,
}

impl NodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            properties: Vec::new(),
            search: SearchConfiguration::default(),
            is_abstract: false,
        }
    }

    pub fn with_supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    /// Declare a property; redeclaring replaces the configuration in place
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        configuration: PropertyConfiguration,
    ) -> Self {
        let name = name.into();
        match self.properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = configuration,
            None => self.properties.push((name, configuration)),
        }
        self
    }

    pub fn with_search(mut self, search: SearchConfiguration) -> Self {
        self.search = search;
        self
    }

    pub fn with_fulltext(mut self, enabled: bool) -> Self {
        self.search.fulltext_enabled = enabled;
        self
    }

    pub fn as_fulltext_root(mut self) -> Self {
        self.search.fulltext_enabled = true;
        self.search.fulltext_root = true;
        self
    }

    pub fn as_abstract(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared direct supertypes, in declaration order
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Effective properties in declaration order
    pub fn properties(&self) -> &[(String, PropertyConfiguration)] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyConfiguration> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, configuration)| configuration)
    }

    pub fn search(&self) -> &SearchConfiguration {
        &self.search
    }

    pub fn is_fulltext_enabled(&self) -> bool {
        self.search.fulltext_enabled
    }

    pub fn is_fulltext_root(&self) -> bool {
        self.search.fulltext_root
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }
}
