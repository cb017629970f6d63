//! Helper namespaces callable from expressions.
//!
//! A call `Indexing.extractInto('h1', value)` resolves the variable
//! `Indexing` to its helper namespace name and dispatches on the
//! function name.

use crate::core::asset::AssetEncoder;
use crate::core::indexer::{
    build_all_path_prefixes, convert_nodes_to_identifiers, convert_nodes_to_property,
    extract_html_tags, extract_into, strip_tags,
};
use crate::core::node_type::{extract_node_type_names_and_supertypes, NodeTypeManager};
use crate::core::value::Value;
use chrono::format::{Item, StrftimeItems};
use std::sync::Arc;

/// Indexing helpers
pub const INDEXING_NAMESPACE: &str = "Indexing";

/// String helpers
pub const STRING_NAMESPACE: &str = "String";

/// Date helpers
pub const DATE_NAMESPACE: &str = "Date";

/// Dispatches helper calls
#[derive(Debug, Clone)]
pub struct Helpers {
    node_types: Arc<NodeTypeManager>,
    asset_encoder: AssetEncoder,
}

impl Helpers {
    pub fn new(node_types: Arc<NodeTypeManager>, asset_encoder: AssetEncoder) -> Self {
        Self {
            node_types,
            asset_encoder,
        }
    }

    /// Call `namespace.function` with evaluated arguments
    pub fn call(&self, namespace: &str, function: &str, args: &[Value]) -> Result<Value, String> {
        let call = Call {
            namespace,
            function,
            args,
        };
        match namespace {
            INDEXING_NAMESPACE => self.call_indexing(&call),
            STRING_NAMESPACE => call_string(&call),
            DATE_NAMESPACE => call_date(&call),
            _ => Err(format!("Unknown helper namespace '{namespace}'")),
        }
    }

    fn call_indexing(&self, call: &Call<'_>) -> Result<Value, String> {
        match call.function {
            "buildAllPathPrefixes" => {
                call.arity(1)?;
                Ok(build_all_path_prefixes(&call.args[0].to_text()).into())
            }
            "extractNodeTypeNamesAndSupertypes" => {
                call.arity(1)?;
                self.node_type_names(&call.args[0])
            }
            "extractHtmlTags" => {
                call.arity(1)?;
                Ok(extract_html_tags(&call.args[0].to_text()).into())
            }
            "extractInto" => {
                call.arity(2)?;
                Ok(extract_into(&call.args[0].to_text(), call.args[1].clone()))
            }
            "indexAsset" => {
                call.arity(1)?;
                self.asset_encoder
                    .encode(&call.args[0])
                    .map_err(|e| e.to_string())
            }
            "convertArrayOfNodesToArrayOfNodeIdentifiers" => {
                call.arity(1)?;
                Ok(convert_nodes_to_identifiers(&call.args[0]))
            }
            "convertArrayOfNodesToArrayOfNodeProperty" => {
                call.arity(2)?;
                Ok(convert_nodes_to_property(
                    &call.args[0],
                    &call.args[1].to_text(),
                ))
            }
            _ => Err(call.unknown()),
        }
    }

    /// Accepts a node, a node type name or a `nodeType` map
    fn node_type_names(&self, subject: &Value) -> Result<Value, String> {
        let names = match subject {
            Value::Node(node) => {
                extract_node_type_names_and_supertypes(&self.node_types, node.node_type())
            }
            other => {
                let name = match other {
                    Value::Map(map) => map.get("name").map(Value::to_text),
                    Value::String(name) => Some(name.clone()),
                    _ => None,
                }
                .ok_or_else(|| {
                    format!("Cannot extract node type names from {}", other.type_name())
                })?;
                self.node_types
                    .get(&name)
                    .and_then(|node_type| {
                        extract_node_type_names_and_supertypes(&self.node_types, &node_type)
                    })
            }
        };
        names.map(Value::from).map_err(|e| e.to_string())
    }
}

struct Call<'a> {
    namespace: &'a str,
    function: &'a str,
    args: &'a [Value],
}

impl Call<'_> {
    fn arity(&self, expected: usize) -> Result<(), String> {
        if self.args.len() == expected {
            Ok(())
        } else {
            Err(format!(
                "{}.{} expects {} argument(s), got {}",
                self.namespace,
                self.function,
                expected,
                self.args.len()
            ))
        }
    }

    fn unknown(&self) -> String {
        format!("Unknown helper function '{}.{}'", self.namespace, self.function)
    }
}

fn call_string(call: &Call<'_>) -> Result<Value, String> {
    call.arity(1)?;
    let text = call.args[0].to_text();
    match call.function {
        "toLowerCase" => Ok(text.to_lowercase().into()),
        "trim" => Ok(text.trim().into()),
        "stripTags" => Ok(strip_tags(&text, &[]).into()),
        _ => Err(call.unknown()),
    }
}

fn call_date(call: &Call<'_>) -> Result<Value, String> {
    match call.function {
        "format" => {
            call.arity(2)?;
            let Value::DateTime(date) = &call.args[0] else {
                return Err(format!(
                    "Date.format expects a datetime, got {}",
                    call.args[0].type_name()
                ));
            };
            let format = call.args[1].to_text();
            // Invalid specifiers would make formatting panic
            if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
                return Err(format!("Invalid date format '{format}'"));
            }
            Ok(date.format(&format).to_string().into())
        }
        _ => Err(call.unknown()),
    }
}
