//! Document extraction module.
//!
//! Turns content nodes into index documents and fulltext buckets:
//!
//! - Per-property indexing rule resolution and evaluation
//! - Fulltext accumulation into named buckets
//! - HTML splitting into heading and body buckets
//! - Path prefix expansion
//! - Whole-tree pipeline with fulltext roll-up

pub mod extractor;
pub mod fulltext;
pub mod html;
pub mod paths;
pub mod pipeline;
pub mod references;

pub use extractor::PropertyExtractor;
pub use fulltext::{extract_fulltext, extract_into};
pub use html::{extract_html_tags, strip_tags, TEXT_BUCKET};
pub use paths::build_all_path_prefixes;
pub use pipeline::IndexingPipeline;
pub use references::{convert_nodes_to_identifiers, convert_nodes_to_property};
