// Test fixtures for integration testing

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Node types used across the integration tests.
///
/// `Acme:Page` is a fulltext root, `Acme:Text`, `Acme:Headline` and
/// `Acme:Download` are fulltext-enabled content below it.
#[allow(dead_code)] // Used in integration tests
pub const NODE_TYPES: &str = r#"
[node_types."Acme:Node"]
abstract = true

[node_types."Acme:Node".properties.__identifier]
search.indexing = "${node.identifier}"

[node_types."Acme:Node".properties.__parentPath]
search.indexing = "${Indexing.buildAllPathPrefixes(node.parentPath)}"

[node_types."Acme:Node".properties.__typeAndSupertypes]
search.indexing = "${Indexing.extractNodeTypeNamesAndSupertypes(node)}"

[node_types."Acme:Document"]
super_types = ["Acme:Node"]
abstract = true
search.fulltext = { enable = true, is_root = true }

[node_types."Acme:Document".properties.title]
type = "string"
search.fulltext_extractor = "${Indexing.extractInto('h1', value)}"

[node_types."Acme:Page"]
super_types = ["Acme:Document"]

[node_types."Acme:Page".properties.published]
type = "DateTime"

[node_types."Acme:Page".properties.secret]
type = "string"
search.indexing = ""

[node_types."Acme:Page".properties.image]
type = "ImageInterface"

[node_types."Acme:Content"]
super_types = ["Acme:Node"]
abstract = true
search.fulltext = { enable = true }

[node_types."Acme:Text"]
super_types = ["Acme:Content"]

[node_types."Acme:Text".properties.text]
type = "string"
search.fulltext_extractor = "${Indexing.extractHtmlTags(value)}"

[node_types."Acme:Headline"]
super_types = ["Acme:Content"]

[node_types."Acme:Headline".properties.title]
type = "string"
search.fulltext_extractor = "${Indexing.extractInto('h2', value)}"

[node_types."Acme:Download"]
super_types = ["Acme:Content"]

[node_types."Acme:Download".properties.file]
type = "Asset"
search.indexing = "${Indexing.indexAsset(value)}"

[node_types."Acme:Download".properties.tags]
type = "references"

[node_types."Acme:Broken"]
super_types = ["Acme:Node"]

[node_types."Acme:Broken".properties.title]
search.indexing = "${String.toLowerCase(}"
"#;

/// A small site: one page with a headline, a text and a download below it
#[allow(dead_code)] // Used in integration tests
pub const SITE_NODES: &str = r#"[
  {"identifier": "page-1", "path": "/sites/demo", "nodeType": "Acme:Page",
   "properties": {"title": "Hello World", "published": "2024-05-01T10:00:00+02:00",
                  "secret": "hidden"}},
  {"identifier": "headline-1", "path": "/sites/demo/main/headline", "nodeType": "Acme:Headline",
   "properties": {"title": "Welcome"}},
  {"identifier": "text-1", "path": "/sites/demo/main/text", "nodeType": "Acme:Text",
   "properties": {"text": "<p>Some <b>bold</b> words</p>"}},
  {"identifier": "download-1", "path": "/sites/demo/main/download", "nodeType": "Acme:Download",
   "properties": {"file": "files/hello.txt", "tags": ["tag-1", "tag-2"]}}
]"#;

/// Content tree fixture: a temporary directory holding a node types file,
/// a nodes file and any asset files
#[allow(dead_code)] // Used in integration tests
pub struct TestTree {
    pub dir: TempDir,
    pub nodes_file: PathBuf,
    pub node_types_file: PathBuf,
}

impl TestTree {
    /// The default site with a `files/hello.txt` asset
    #[allow(dead_code)] // Used in integration tests
    pub fn site() -> Self {
        Self::with_nodes(SITE_NODES, &[("files/hello.txt", b"hi")])
    }

    /// Create a tree from a JSON node list and asset files
    #[allow(dead_code)] // Used in integration tests
    pub fn with_nodes(nodes: &str, assets: &[(&str, &[u8])]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");

        let nodes_file = dir.path().join("nodes.json");
        std::fs::write(&nodes_file, nodes).expect("Failed to write nodes file");

        let node_types_file = dir.path().join("node-types.toml");
        std::fs::write(&node_types_file, NODE_TYPES).expect("Failed to write node types file");

        for (path, content) in assets {
            let full_path = dir.path().join(path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create directories");
            }
            std::fs::write(&full_path, content).expect("Failed to write asset");
        }

        Self {
            dir,
            nodes_file,
            node_types_file,
        }
    }

    #[allow(dead_code)] // Used in integration tests
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
