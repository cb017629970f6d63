//! Built-in expression language.
//!
//! A small expression language for indexing and fulltext rules, modeled
//! on the `${...}` syntax used in node type configuration:
//!
//! ```text
//! ${value}
//! ${Indexing.extractInto('h1', value)}
//! ${value ? Date.format(value, '%Y-%m-%d') : null}
//! ```
//!
//! [`EelEvaluator`] implements the core's
//! [`ExpressionEvaluator`](crate::core::expression::ExpressionEvaluator)
//! seam; the core never depends on this module.

pub mod evaluator;
pub mod functions;
pub mod parser;

pub use evaluator::EelEvaluator;
pub use functions::{Helpers, DATE_NAMESPACE, INDEXING_NAMESPACE, STRING_NAMESPACE};
pub use parser::{Expr, ParseError, Parser};
