//! Expression evaluation seam.
//!
//! The extraction core never interprets expressions itself. It builds a
//! variable context, hands the expression to an [`ExpressionEvaluator`]
//! and validates the shape of the result. The crate ships one
//! implementation in [`crate::eel`]; closures work too:
//!
//! ```
//! use nodeindex::core::expression::{Context, ExpressionError, ExpressionEvaluator};
//! use nodeindex::core::value::Value;
//!
//! let echo = |_: &str, context: &Context| -> Result<Value, ExpressionError> {
//!     Ok(context.get("value").cloned().unwrap_or_default())
//! };
//! let mut context = Context::new();
//! context.insert("value".to_string(), Value::from("hi"));
//! assert_eq!(echo.evaluate("${value}", &context).unwrap(), Value::from("hi"));
//! ```

use crate::core::node::Node;
use crate::core::value::Value;
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Context variable holding the node being indexed
pub const NODE_VARIABLE: &str = "node";

/// Context variable holding the name of the property being indexed
pub const PROPERTY_NAME_VARIABLE: &str = "propertyName";

/// Context variable holding the property value (`null` when unset)
pub const VALUE_VARIABLE: &str = "value";

/// Variables visible to an expression
pub type Context = BTreeMap<String, Value>;

/// Error raised by an expression evaluator
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Expression error in '{expression}': {message}")]
pub struct ExpressionError {
    pub expression: String,
    pub message: String,
}

impl ExpressionError {
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

/// Evaluates configuration-supplied expressions against a context.
///
/// Implementations must be safe to call from several threads at once.
pub trait ExpressionEvaluator: Send + Sync {
    fn evaluate(&self, expression: &str, context: &Context)
        -> std::result::Result<Value, ExpressionError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str, &Context) -> std::result::Result<Value, ExpressionError> + Send + Sync,
{
    fn evaluate(
        &self,
        expression: &str,
        context: &Context,
    ) -> std::result::Result<Value, ExpressionError> {
        self(expression, context)
    }
}

static DEFAULT_CONTEXT: OnceCell<Arc<DefaultContext>> = OnceCell::new();

/// Variables shared by every evaluation.
///
/// Built from the `default_context` settings table, which maps a variable
/// name to the helper namespace it exposes (`Indexing = "Indexing"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultContext {
    variables: Context,
}

impl DefaultContext {
    /// Build a default context from settings
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Self {
        let variables = settings
            .iter()
            .map(|(name, helper)| (name.clone(), Value::String(helper.clone())))
            .collect();
        Self { variables }
    }

    /// Process-wide default context.
    ///
    /// The first call computes it from `settings`; later calls return the
    /// same instance and ignore their argument.
    pub fn global(settings: &BTreeMap<String, String>) -> Arc<Self> {
        let context = DEFAULT_CONTEXT.get_or_init(|| {
            tracing::debug!("Initializing default context ({} variables)", settings.len());
            Arc::new(Self::from_settings(settings))
        });
        Arc::clone(context)
    }

    pub fn variables(&self) -> &Context {
        &self.variables
    }

    /// Context for evaluating an expression on one property of `node`
    pub fn build(&self, node: &Arc<Node>, property_name: &str, value: Value) -> Context {
        let mut context = self.variables.clone();
        context.insert(NODE_VARIABLE.to_string(), Value::Node(Arc::clone(node)));
        context.insert(
            PROPERTY_NAME_VARIABLE.to_string(),
            Value::String(property_name.to_string()),
        );
        context.insert(VALUE_VARIABLE.to_string(), value);
        context
    }
}
