use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nodeindex::core::asset::AssetEncoder;
use nodeindex::core::config::Config;
use nodeindex::core::indexer::{build_all_path_prefixes, extract_html_tags, IndexingPipeline, PropertyExtractor};
use nodeindex::core::node::Node;
use nodeindex::core::tree::NodeTree;
use nodeindex::core::NodeTypeManager;
use nodeindex::eel::EelEvaluator;
use std::sync::Arc;

const NODE_TYPES: &str = r#"
[node_types."Bench:Page"]
search.fulltext = { enable = true, is_root = true }

[node_types."Bench:Page".properties.title]
search.fulltext_extractor = "${Indexing.extractInto('h1', value)}"

[node_types."Bench:Text"]
search.fulltext = { enable = true }

[node_types."Bench:Text".properties.__path]
search.indexing = "${Indexing.buildAllPathPrefixes(node.path)}"

[node_types."Bench:Text".properties.text]
search.fulltext_extractor = "${Indexing.extractHtmlTags(value)}"
"#;

fn generate_html(paragraphs: usize) -> String {
    let mut html = String::new();
    for i in 0..paragraphs {
        if i % 5 == 0 {
            html.push_str(&format!("<h2>Section {i}</h2>"));
        }
        html.push_str(&format!(
            "<p>Paragraph {i} with <b>bold</b> and <a href=\"/link/{i}\">a link</a>.</p>\n"
        ));
    }
    html
}

fn bench_html_splitting(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_html_tags");

    for paragraphs in [10, 100, 1000] {
        let html = generate_html(paragraphs);
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &html, |b, html| {
            b.iter(|| black_box(extract_html_tags(black_box(html))))
        });
    }

    group.finish();
}

fn bench_path_prefixes(c: &mut Criterion) {
    let path = "/sites/demo/main/section/column/content/text";
    c.bench_function("build_all_path_prefixes", |b| {
        b.iter(|| black_box(build_all_path_prefixes(black_box(path))))
    });
}

fn bench_index_tree(c: &mut Criterion) {
    let node_types = Arc::new(NodeTypeManager::from_toml_str(NODE_TYPES).unwrap());
    let page = node_types.get("Bench:Page").unwrap();
    let text = node_types.get("Bench:Text").unwrap();

    let mut tree = NodeTree::new();
    tree.insert(Node::new("page", "/page", page).with_property("title", "Bench"))
        .unwrap();
    let html = generate_html(5);
    for i in 0..200 {
        let node = Node::new(format!("text-{i}"), format!("/page/main/text-{i}"), Arc::clone(&text))
            .with_property("text", html.as_str());
        tree.insert(node).unwrap();
    }

    let config = Config::default();
    let evaluator = Arc::new(EelEvaluator::new(
        Arc::clone(&node_types),
        AssetEncoder::new(config.max_asset_bytes()),
    ));
    let pipeline = IndexingPipeline::new(PropertyExtractor::from_config(&config, evaluator));

    c.bench_function("index_tree_200_nodes", |b| {
        b.iter(|| black_box(pipeline.index_tree(black_box(&tree)).unwrap()))
    });
}

criterion_group!(benches, bench_html_splitting, bench_path_prefixes, bench_index_tree);
criterion_main!(benches);
