//! Path prefix expansion for ancestor-aware indexing.

/// Build every prefix of `path`, shallowest first, the full path last.
///
/// Absolute paths start with `/`. Relative paths produce no root entry.
/// Trailing slashes are removed from each emitted prefix.
///
/// # Example
///
/// ```
/// use nodeindex::core::indexer::build_all_path_prefixes;
///
/// assert_eq!(build_all_path_prefixes("/a/b"), vec!["/", "/a", "/a/b"]);
/// assert_eq!(build_all_path_prefixes("a/b"), vec!["a", "a/b"]);
/// assert!(build_all_path_prefixes("").is_empty());
/// ```
pub fn build_all_path_prefixes(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    if path == "/" {
        return vec!["/".to_string()];
    }

    let mut prefixes = Vec::new();
    let mut current = String::new();
    if path.starts_with('/') {
        current.push('/');
        prefixes.push("/".to_string());
    }

    for segment in path.trim_start_matches('/').split('/') {
        current.push_str(segment);
        current.push('/');
        prefixes.push(current.trim_end_matches('/').to_string());
    }

    prefixes
}
