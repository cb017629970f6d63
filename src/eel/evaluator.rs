//! Tree-walking evaluator for parsed expressions.

use crate::core::asset::AssetEncoder;
use crate::core::expression::{Context, ExpressionError, ExpressionEvaluator};
use crate::core::node::Node;
use crate::core::node_type::NodeTypeManager;
use crate::core::value::Value;
use crate::eel::functions::Helpers;
use crate::eel::parser::{BinaryOp, Expr, Parser};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Evaluates expressions of the built-in language.
///
/// Parsed expressions are cached by source text; the cache is shared by
/// all threads using the evaluator.
#[derive(Debug)]
pub struct EelEvaluator {
    helpers: Helpers,
    cache: RwLock<HashMap<String, Arc<Expr>>>,
}

impl EelEvaluator {
    pub fn new(node_types: Arc<NodeTypeManager>, asset_encoder: AssetEncoder) -> Self {
        Self {
            helpers: Helpers::new(node_types, asset_encoder),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct expressions parsed so far
    pub fn cached_expressions(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn parsed(&self, source: &str) -> Result<Arc<Expr>, ExpressionError> {
        if let Some(expr) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(Arc::clone(expr));
        }

        let expr = Arc::new(
            Parser::parse(source).map_err(|e| ExpressionError::new(source, e.to_string()))?,
        );
        tracing::trace!("Parsed expression {}", source);
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(source.to_string(), Arc::clone(&expr));
        Ok(expr)
    }
}

impl ExpressionEvaluator for EelEvaluator {
    fn evaluate(&self, expression: &str, context: &Context) -> Result<Value, ExpressionError> {
        let expr = self.parsed(expression)?;
        let scope = Scope {
            helpers: &self.helpers,
            context,
        };
        scope
            .eval(&expr)
            .map_err(|message| ExpressionError::new(expression, message))
    }
}

/// One evaluation: helpers plus the variables in scope
struct Scope<'a> {
    helpers: &'a Helpers,
    context: &'a Context,
}

impl Scope<'_> {
    fn eval(&self, expr: &Expr) -> Result<Value, String> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Variable(name) => self
                .context
                .get(name)
                .cloned()
                .ok_or_else(|| format!("Unknown variable '{name}'")),
            Expr::Object(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.eval(value)?)))
                .collect::<Result<_, String>>()
                .map(Value::Map),
            Expr::List(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<_, String>>()
                .map(Value::List),
            Expr::Member { target, name } => member(&self.eval(target)?, name),
            Expr::Index { target, index } => {
                let target = self.eval(target)?;
                let index = self.eval(index)?;
                element(&target, &index)
            }
            Expr::Call { callee, arguments } => self.call(callee, arguments),
            Expr::Not(operand) => Ok(Value::Bool(!self.eval(operand)?.is_truthy())),
            Expr::Negate(operand) => match self.eval(operand)? {
                Value::Integer(i) => i
                    .checked_neg()
                    .map(Value::Integer)
                    .ok_or_else(|| "Integer overflow".to_string()),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(format!("Cannot negate {}", other.type_name())),
            },
            Expr::Binary { left, op, right } => self.binary(left, *op, right),
            Expr::Conditional {
                condition,
                then,
                otherwise,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
        }
    }

    fn call(&self, callee: &Expr, arguments: &[Expr]) -> Result<Value, String> {
        let Expr::Member { target, name } = callee else {
            return Err("Only helper functions (Namespace.function) can be called".to_string());
        };
        let namespace = match self.eval(target)? {
            Value::String(namespace) => namespace,
            other => return Err(format!("Cannot call '{name}' on {}", other.type_name())),
        };
        let args = arguments
            .iter()
            .map(|argument| self.eval(argument))
            .collect::<Result<Vec<_>, String>>()?;
        self.helpers.call(&namespace, name, &args)
    }

    fn binary(&self, left: &Expr, op: BinaryOp, right: &Expr) -> Result<Value, String> {
        let left = self.eval(left)?;
        match op {
            BinaryOp::Or if left.is_truthy() => return Ok(left),
            BinaryOp::And if !left.is_truthy() => return Ok(left),
            _ => {}
        }
        let right = self.eval(right)?;
        match op {
            BinaryOp::Or | BinaryOp::And => Ok(right),
            BinaryOp::Eq => Ok(Value::Bool(left == right)),
            BinaryOp::Ne => Ok(Value::Bool(left != right)),
            BinaryOp::Add => add(left, right),
        }
    }
}

fn member(target: &Value, name: &str) -> Result<Value, String> {
    match target {
        Value::Null => Ok(Value::Null),
        Value::Map(map) => Ok(map.get(name).cloned().unwrap_or_default()),
        Value::Node(node) => node_member(node, name),
        other => Err(format!("Cannot access '{name}' on {}", other.type_name())),
    }
}

fn node_member(node: &Node, name: &str) -> Result<Value, String> {
    Ok(match name {
        "identifier" => node.identifier().into(),
        "path" => node.path().into(),
        "name" => node.name().into(),
        "parentPath" => node.parent_path().map(Value::from).unwrap_or_default(),
        "nodeType" => {
            let node_type = node.node_type();
            Value::map([
                ("name", Value::from(node_type.name())),
                ("superTypes", Value::from(node_type.supertypes().to_vec())),
            ])
        }
        "properties" => Value::Map(node.properties().clone()),
        _ => return Err(format!("Node has no member '{name}'")),
    })
}

fn element(target: &Value, index: &Value) -> Result<Value, String> {
    match (target, index) {
        (Value::Null, _) => Ok(Value::Null),
        (Value::List(items), Value::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or_default()),
        (Value::Map(map), key) => Ok(map.get(&key.to_text()).cloned().unwrap_or_default()),
        (Value::Node(node), key) => node_member(node, &key.to_text()),
        (target, index) => Err(format!(
            "Cannot index {} with {}",
            target.type_name(),
            index.type_name()
        )),
    }
}

fn add(left: Value, right: Value) -> Result<Value, String> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a
            .checked_add(b)
            .map(Value::Integer)
            .ok_or_else(|| "Integer overflow".to_string()),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(a as f64 + b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + b as f64)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::List(mut a), Value::List(b)) => {
            a.extend(b);
            Ok(Value::List(a))
        }
        (left @ Value::String(_), right) | (left, right @ Value::String(_)) => {
            Ok(Value::String(left.to_text() + &right.to_text()))
        }
        (left, right) => Err(format!(
            "Cannot add {} and {}",
            left.type_name(),
            right.type_name()
        )),
    }
}
