//! Fulltext bucket accumulation.
//!
//! A property's fulltext extractor evaluates to a map of bucket name to
//! content. Every entry is appended to the node's shared bucket map with
//! one leading space, including the first contribution to a bucket.

use crate::core::error::{IndexerError, Result};
use crate::core::expression::{DefaultContext, ExpressionEvaluator};
use crate::core::node::Node;
use crate::core::types::FulltextBuckets;
use crate::core::value::Value;
use std::sync::Arc;

/// Evaluate a fulltext extractor and append its buckets to `buckets`.
///
/// An empty `expression` does nothing. The expression sees the same
/// `node`, `propertyName` and `value` variables as indexing expressions.
///
/// # Errors
///
/// - `InvalidFulltextExpression` if the result is not a map
/// - `Expression` if the evaluator fails
///
/// On error, `buckets` may already hold contributions from earlier
/// properties of the node and should be discarded.
pub fn extract_fulltext(
    evaluator: &dyn ExpressionEvaluator,
    default_context: &DefaultContext,
    node: &Arc<Node>,
    property_name: &str,
    expression: &str,
    buckets: &mut FulltextBuckets,
) -> Result<()> {
    if expression.is_empty() {
        return Ok(());
    }

    let value = node.property(property_name).cloned().unwrap_or_default();
    let context = default_context.build(node, property_name, value);

    let result = evaluator.evaluate(expression, &context)?;
    let Value::Map(contributions) = result else {
        return Err(IndexerError::InvalidFulltextExpression {
            property: property_name.to_string(),
            path: node.path().to_string(),
            expression: expression.to_string(),
        });
    };

    for (bucket, value) in &contributions {
        buckets.append(bucket, &value.to_text());
    }

    tracing::trace!(
        "Fulltext of {}.{} contributed to {} buckets",
        node.path(),
        property_name,
        contributions.len()
    );
    Ok(())
}

/// Wrap a value into a single-bucket map, for use in extractor expressions.
///
/// # Example
///
/// ```
/// use nodeindex::core::indexer::extract_into;
/// use nodeindex::core::value::Value;
///
/// let map = extract_into("h1", Value::from("Title"));
/// assert_eq!(map, Value::map([("h1", Value::from("Title"))]));
/// ```
pub fn extract_into(bucket: &str, value: Value) -> Value {
    Value::map([(bucket, value)])
}
