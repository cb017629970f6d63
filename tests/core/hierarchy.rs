//! Supertype flattening of configured node types

use crate::common::node_types;
use nodeindex::core::node_type::extract_node_type_names_and_supertypes;
use nodeindex::core::{IndexerError, NodeType, NodeTypeManager};

#[test]
fn test_configured_chain() {
    let manager = node_types();
    let page = manager.get("Acme:Page").unwrap();

    let names = extract_node_type_names_and_supertypes(&manager, &page).unwrap();
    assert_eq!(names, vec!["Acme:Page", "Acme:Document", "Acme:Node"]);
}

#[test]
fn test_shared_ancestor_listed_once() {
    let mut manager = NodeTypeManager::new();
    manager.register(NodeType::new("Acme:Node"));
    manager.register(NodeType::new("Acme:Content").with_supertypes(["Acme:Node"]));
    manager.register(NodeType::new("Acme:Linkable").with_supertypes(["Acme:Node"]));

    let teaser = NodeType::new("Acme:Teaser").with_supertypes(["Acme:Content", "Acme:Linkable"]);
    let names = extract_node_type_names_and_supertypes(&manager, &teaser).unwrap();
    assert_eq!(
        names,
        vec!["Acme:Teaser", "Acme:Content", "Acme:Node", "Acme:Linkable"]
    );
}

#[test]
fn test_unknown_supertype() {
    let manager = NodeTypeManager::new();
    let orphan = NodeType::new("Acme:Orphan").with_supertypes(["Acme:Missing"]);

    let err = extract_node_type_names_and_supertypes(&manager, &orphan).unwrap_err();
    assert!(matches!(err, IndexerError::NodeTypeNotFound(_)), "got {err:?}");
}

#[test]
fn test_cyclic_definitions_are_rejected() {
    let toml = r#"
        [node_types."Acme:A"]
        super_types = ["Acme:B"]

        [node_types."Acme:B"]
        super_types = ["Acme:A"]
    "#;

    let err = NodeTypeManager::from_toml_str(toml).unwrap_err();
    assert!(err.is_configuration_error());
}
