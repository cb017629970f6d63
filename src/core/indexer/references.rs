//! Reference property conversion.
//!
//! Reference properties hold nodes, or node identifiers when the target
//! was not loaded. Both forms are accepted.

use crate::core::value::Value;

/// Map a list of nodes to their identifiers.
///
/// Identifier strings pass through unchanged. Anything that is not a
/// list yields an empty list.
///
/// # Example
///
/// ```
/// use nodeindex::core::indexer::convert_nodes_to_identifiers;
/// use nodeindex::core::value::Value;
///
/// let refs = Value::from(vec![Value::from("a1"), Value::from("b2")]);
/// assert_eq!(convert_nodes_to_identifiers(&refs), refs);
/// assert_eq!(convert_nodes_to_identifiers(&Value::Null), Value::List(vec![]));
/// ```
pub fn convert_nodes_to_identifiers(nodes: &Value) -> Value {
    let Some(items) = nodes.as_list() else {
        return Value::List(Vec::new());
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Node(node) => Some(Value::String(node.identifier().to_string())),
            Value::String(identifier) => Some(Value::String(identifier.clone())),
            _ => None,
        })
        .collect::<Vec<_>>()
        .into()
}

/// Map a list of nodes to the value of `property_name` on each.
///
/// Unset properties and unresolved references yield `null` so positions
/// line up with the input list.
pub fn convert_nodes_to_property(nodes: &Value, property_name: &str) -> Value {
    let Some(items) = nodes.as_list() else {
        return Value::List(Vec::new());
    };

    items
        .iter()
        .map(|item| match item {
            Value::Node(node) => node.property(property_name).cloned().unwrap_or_default(),
            _ => Value::Null,
        })
        .collect::<Vec<_>>()
        .into()
}
