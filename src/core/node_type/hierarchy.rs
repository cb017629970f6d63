//! Supertype hierarchy flattening.

use crate::core::error::{IndexerError, Result};
use crate::core::node_type::{NodeType, NodeTypeManager};
use std::collections::HashSet;

/// List a node type's name followed by all of its supertypes.
///
/// Supertypes are visited in preorder: a supertype's own supertypes come
/// before the next sibling. Every name appears once, at the position it
/// was first reached. Supertypes are looked up in `manager`; the starting
/// type itself does not need to be registered.
///
/// # Errors
///
/// - `NodeTypeNotFound` if a supertype is not registered
/// - `NodeTypeCycle` if a type is its own ancestor
///
/// # Example
///
/// ```
/// use nodeindex::core::node_type::{
///     extract_node_type_names_and_supertypes, NodeType, NodeTypeManager,
/// };
///
/// let mut manager = NodeTypeManager::new();
/// manager.register(NodeType::new("Acme:Node"));
/// manager.register(NodeType::new("Acme:Document").with_supertypes(["Acme:Node"]));
///
/// let page = NodeType::new("Acme:Page").with_supertypes(["Acme:Document"]);
/// let names = extract_node_type_names_and_supertypes(&manager, &page).unwrap();
/// assert_eq!(names, vec!["Acme:Page", "Acme:Document", "Acme:Node"]);
/// ```
pub fn extract_node_type_names_and_supertypes(
    manager: &NodeTypeManager,
    node_type: &NodeType,
) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();

    // Worklist of (type name, depth); `ancestry` holds the chain of types
    // currently being expanded, one per depth level
    let mut worklist: Vec<(&str, usize)> = vec![(node_type.name(), 0)];
    let mut ancestry: Vec<&str> = Vec::new();

    while let Some((name, depth)) = worklist.pop() {
        ancestry.truncate(depth);

        if ancestry.contains(&name) {
            return Err(IndexerError::NodeTypeCycle(format!(
                "{} -> {}",
                ancestry.join(" -> "),
                name
            )));
        }

        if !visited.insert(name) {
            continue;
        }
        names.push(name.to_string());

        let current = if depth == 0 {
            node_type
        } else {
            manager
                .lookup(name)
                .map(|t| &**t)
                .ok_or_else(|| IndexerError::NodeTypeNotFound(name.to_string()))?
        };

        ancestry.push(name);
        for supertype in current.supertypes().iter().rev() {
            worklist.push((supertype.as_str(), depth + 1));
        }
    }

    Ok(names)
}
