//! Indexing pipeline orchestration.
//!
//! Coordinates the whole-tree indexing workflow:
//! 1. Extract properties and fulltext of every node
//! 2. Roll fulltext up into the closest fulltext root
//! 3. Collect documents and statistics

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::core::error::Result;
use crate::core::indexer::PropertyExtractor;
use crate::core::node::Node;
use crate::core::tree::NodeTree;
use crate::core::types::{FulltextBuckets, IndexStats, IndexedDocument};

/// Orchestrates the indexing pipeline
pub struct IndexingPipeline {
    extractor: PropertyExtractor,
}

impl IndexingPipeline {
    /// Create a new indexing pipeline around a property extractor
    pub fn new(extractor: PropertyExtractor) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &PropertyExtractor {
        &self.extractor
    }

    /// Index every node of a tree and return documents + stats
    ///
    /// Nodes whose extraction fails are logged and skipped; their
    /// fulltext is discarded. Fulltext of a node below a fulltext root is
    /// moved into the root's document. Documents are returned in tree
    /// order.
    pub fn index_tree(&self, tree: &NodeTree) -> Result<(Vec<IndexedDocument>, IndexStats)> {
        let start = Instant::now();
        tracing::info!("Indexing {} nodes", tree.len());

        let mut documents: Vec<IndexedDocument> = Vec::with_capacity(tree.len());
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();
        let mut nodes_skipped = 0;
        let mut expression_failures = 0;

        for (idx, node) in tree.nodes().enumerate() {
            if idx % 1000 == 0 && idx > 0 {
                tracing::info!("Progress: {}/{} nodes processed", idx, tree.len());
            }

            match self.index_node(node) {
                Ok(document) => {
                    positions.insert(document.path.clone(), documents.len());
                    documents.push(document);
                }
                Err(e) if e.is_expression_error() => {
                    tracing::warn!("Expression failed on {}: {}", node.path(), e.message());
                    expression_failures += 1;
                    nodes_skipped += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to index {}: {}", node.path(), e.message());
                    nodes_skipped += 1;
                }
            }
        }

        let fulltext_roots = roll_up_fulltext(tree, &mut documents, &positions);
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Indexing complete: {} nodes indexed, {} skipped, {} fulltext roots in {}ms",
            documents.len(),
            nodes_skipped,
            fulltext_roots,
            duration_ms
        );

        let stats = IndexStats {
            nodes_indexed: documents.len(),
            nodes_skipped,
            expression_failures,
            fulltext_roots,
            duration_ms,
            indexed_at: Utc::now(),
        };

        Ok((documents, stats))
    }

    /// Extract a single node into a document with its own fulltext
    pub fn index_node(&self, node: &Arc<Node>) -> Result<IndexedDocument> {
        let mut buckets = FulltextBuckets::new();
        let mut unindexed = Vec::new();
        let mut record_unindexed = |name: &str| unindexed.push(name.to_string());

        let properties = self.extractor.extract_properties_and_fulltext(
            node,
            &mut buckets,
            Some(&mut record_unindexed),
        )?;

        if !unindexed.is_empty() {
            tracing::debug!("Not indexed on {}: {}", node.path(), unindexed.join(", "));
        }

        Ok(IndexedDocument {
            identifier: node.identifier().to_string(),
            path: node.path().to_string(),
            node_type: node.node_type().name().to_string(),
            properties,
            fulltext: buckets,
        })
    }
}

/// Move the fulltext of content nodes into their closest fulltext root.
///
/// Returns the number of root documents that received content.
fn roll_up_fulltext(
    tree: &NodeTree,
    documents: &mut [IndexedDocument],
    positions: &BTreeMap<String, usize>,
) -> usize {
    let mut receiving_roots = std::collections::BTreeSet::new();

    for idx in 0..documents.len() {
        let Some(node) = tree.get(&documents[idx].path) else {
            continue;
        };
        let node_type = node.node_type();
        if !node_type.is_fulltext_enabled() || node_type.is_fulltext_root() {
            continue;
        }
        let Some(root_idx) = tree
            .closest_fulltext_root(node)
            .and_then(|root| positions.get(root.path()))
            .copied()
        else {
            continue;
        };

        let buckets = std::mem::take(&mut documents[idx].fulltext);
        if buckets.is_empty() {
            continue;
        }
        tracing::trace!("Rolling fulltext of {} into {}", node.path(), documents[root_idx].path);
        documents[root_idx].fulltext.merge(&buckets);
        receiving_roots.insert(root_idx);
    }

    receiving_roots.len()
}
