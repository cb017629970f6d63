//! Per-property value extraction.
//!
//! For each declared property the indexing rule is resolved in this
//! order:
//!
//! 1. explicit non-empty `indexing` expression on the property
//! 2. explicit empty expression: not indexed, type default ignored
//! 3. non-empty type-default expression for the property's value type
//! 4. not indexed
//!
//! Fulltext extraction runs independently of the indexing rule.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::expression::{DefaultContext, ExpressionEvaluator};
use crate::core::indexer::fulltext::extract_fulltext;
use crate::core::node::Node;
use crate::core::node_type::PropertyConfiguration;
use crate::core::types::{FulltextBuckets, IndexDocument};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Turns a node into an index document and fulltext contributions
#[derive(Clone)]
pub struct PropertyExtractor {
    evaluator: Arc<dyn ExpressionEvaluator>,
    type_defaults: BTreeMap<String, String>,
    default_context: Arc<DefaultContext>,
}

impl PropertyExtractor {
    /// Create an extractor
    ///
    /// # Arguments
    ///
    /// * `evaluator` - Evaluator for indexing and fulltext expressions
    /// * `type_defaults` - Value type name to default indexing expression
    /// * `default_context` - Variables shared by every evaluation
    pub fn new(
        evaluator: Arc<dyn ExpressionEvaluator>,
        type_defaults: BTreeMap<String, String>,
        default_context: Arc<DefaultContext>,
    ) -> Self {
        Self {
            evaluator,
            type_defaults,
            default_context,
        }
    }

    /// Create an extractor from configuration, using the process-wide
    /// default context
    pub fn from_config(config: &Config, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        Self::new(
            evaluator,
            config.type_default_expressions(),
            DefaultContext::global(&config.default_context),
        )
    }

    pub fn default_context(&self) -> &Arc<DefaultContext> {
        &self.default_context
    }

    /// Extract the index document of `node` and append its fulltext to
    /// `buckets`.
    ///
    /// `unindexed` is called with the name of every property that no
    /// indexing rule applies to. Evaluator errors abort extraction and
    /// propagate unchanged; `buckets` may then hold partial content.
    pub fn extract_properties_and_fulltext(
        &self,
        node: &Arc<Node>,
        buckets: &mut FulltextBuckets,
        mut unindexed: Option<&mut dyn FnMut(&str)>,
    ) -> Result<IndexDocument> {
        let node_type = node.node_type();
        let fulltext_enabled = node_type.is_fulltext_enabled();
        tracing::debug!(
            "Extracting {} ({}, {} properties)",
            node.path(),
            node_type.name(),
            node_type.properties().len()
        );

        let mut document = IndexDocument::new();
        for (property_name, configuration) in node_type.properties() {
            match self.indexing_expression(configuration) {
                Some(expression) => {
                    tracing::trace!("Indexing {}.{}", node.path(), property_name);
                    let value = node.property(property_name).cloned().unwrap_or_default();
                    let context = self.default_context.build(node, property_name, value);
                    let result = self.evaluator.evaluate(expression, &context)?;
                    document.insert(property_name.clone(), result);
                }
                None => {
                    tracing::trace!("Not indexing {}.{}", node.path(), property_name);
                    if let Some(handler) = unindexed.as_deref_mut() {
                        handler(property_name);
                    }
                }
            }

            if fulltext_enabled {
                if let Some(extractor) = configuration.fulltext_extractor.as_deref() {
                    extract_fulltext(
                        self.evaluator.as_ref(),
                        &self.default_context,
                        node,
                        property_name,
                        extractor,
                        buckets,
                    )?;
                }
            }
        }

        Ok(document)
    }

    /// Resolve the indexing expression of a property, `None` if the
    /// property is not indexed
    fn indexing_expression<'a>(&'a self, configuration: &'a PropertyConfiguration) -> Option<&'a str> {
        match configuration.indexing.as_deref() {
            Some("") => None,
            Some(expression) => Some(expression),
            None => self
                .type_defaults
                .get(&configuration.value_type)
                .map(String::as_str)
                .filter(|expression| !expression.is_empty()),
        }
    }
}
