// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in unit tests but are used in integration tests
#[allow(unused_imports)]
pub use fixtures::{TestTree, NODE_TYPES, SITE_NODES};
#[allow(unused_imports)]
pub use helpers::{create_test_services, document, index_test_tree, node_types};
