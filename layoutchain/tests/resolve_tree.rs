//! End-to-end resolution over real directory trees.
//!
//! Traversal order never changes a mapping. The two strategies only differ when a
//! directory name is a string prefix of a sibling's; only the `app/blog` versus
//! `app/blog2` tree below has one.

use layoutchain::generate::{generate_dataset, DatasetSpec};
use layoutchain::{
    resolve, LayoutMap, LayoutResolver, ResolveRules, ResolveStrategy, ResolverConfig, Scope,
    Traversal,
};
use rstest::rstest;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn build_tree(files: &[&str]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    for file in files {
        let path = temp.path().join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
    }
    temp
}

fn resolve_with(
    root: &Path,
    scope: &str,
    strategy: ResolveStrategy,
    traversal: Traversal,
) -> LayoutMap {
    LayoutResolver::new(ResolveRules::new("html", "layout"))
        .with_scope(scope)
        .with_strategy(strategy)
        .with_walker(traversal)
        .resolve(root)
        .expect("resolution failed")
        .relative_to(root)
}

fn as_plain(map: &LayoutMap) -> HashMap<String, Vec<String>> {
    map.iter()
        .map(|(k, v)| (k.clone(), v.as_slice().to_vec()))
        .collect()
}

fn expected(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(k, chain)| {
            (
                k.to_string(),
                chain.iter().map(|s| s.to_string()).collect(),
            )
        })
        .collect()
}

/// html, tmpl and extensionless files side by side across several directories.
const MIXED_TREE: &[&str] = &[
    "index.html",
    "index.tmpl",
    "index",
    "layout.html",
    "test/layout.html",
    "test/index.tmpl",
    "test/index",
    "app/layout.html",
    "app/index.html",
    "app/dashboard.html",
    "app/dashboard.tmpl",
    "app/dashboard",
    "app/account/layout.html",
    "app/account/index.html",
    "auth/index.tmpl",
    "auth/index",
    "auth/login.html",
    "auth/register.html",
];

#[rstest]
fn test_mixed_tree_unrestricted(
    #[values(ResolveStrategy::LengthOrdered, ResolveStrategy::DirectoryTrie)]
    strategy: ResolveStrategy,
    #[values(Traversal::DepthFirst, Traversal::BreadthFirst)] traversal: Traversal,
) {
    let temp = build_tree(MIXED_TREE);
    let map = resolve_with(temp.path(), ".", strategy, traversal);

    let want = expected(&[
        ("index", &["layout", "index"]),
        ("app/index", &["layout", "app/layout", "app/index"]),
        ("app/dashboard", &["layout", "app/layout", "app/dashboard"]),
        (
            "app/account/index",
            &["layout", "app/layout", "app/account/layout", "app/account/index"],
        ),
        ("auth/login", &["layout", "auth/login"]),
        ("auth/register", &["layout", "auth/register"]),
    ]);
    assert_eq!(as_plain(&map), want);
}

#[rstest]
fn test_mixed_tree_scoped_to_subdirectory(
    #[values(ResolveStrategy::LengthOrdered, ResolveStrategy::DirectoryTrie)]
    strategy: ResolveStrategy,
    #[values(Traversal::DepthFirst, Traversal::BreadthFirst)] traversal: Traversal,
) {
    let temp = build_tree(MIXED_TREE);
    let map = resolve_with(temp.path(), "app", strategy, traversal);

    let want = expected(&[
        ("app/index", &["layout", "app/layout", "app/index"]),
        ("app/dashboard", &["layout", "app/layout", "app/dashboard"]),
        (
            "app/account/index",
            &["layout", "app/layout", "app/account/layout", "app/account/index"],
        ),
    ]);
    assert_eq!(as_plain(&map), want);
}

#[rstest]
#[case::length_ordered(ResolveStrategy::LengthOrdered)]
#[case::directory_trie(ResolveStrategy::DirectoryTrie)]
fn test_blog_scenario(#[case] strategy: ResolveStrategy) {
    let temp = build_tree(&[
        "app/layout.html",
        "app/blog/layout.html",
        "app/blog/post1.html",
        "app/about.html",
    ]);
    let map = resolve_with(temp.path(), ".", strategy, Traversal::DepthFirst);

    assert_eq!(
        map.get("app/about").unwrap().as_slice(),
        ["app/layout", "app/about"]
    );
    assert_eq!(
        map.get("app/blog/post1").unwrap().as_slice(),
        ["app/layout", "app/blog/layout", "app/blog/post1"]
    );
}

#[rstest]
#[case::length_ordered(ResolveStrategy::LengthOrdered)]
#[case::directory_trie(ResolveStrategy::DirectoryTrie)]
fn test_without_layouts_every_chain_is_the_file_itself(#[case] strategy: ResolveStrategy) {
    let temp = build_tree(&["a.html", "x/b.html", "x/y/c.html", "x/y/layout.md"]);
    let map = resolve_with(temp.path(), ".", strategy, Traversal::BreadthFirst);

    assert_eq!(map.len(), 3);
    for (id, chain) in map.iter() {
        assert_eq!(chain.as_slice(), [id.clone()]);
        assert!(chain.layouts().is_empty());
    }
}

#[rstest]
#[case::length_ordered(ResolveStrategy::LengthOrdered)]
#[case::directory_trie(ResolveStrategy::DirectoryTrie)]
fn test_same_directory_layout_stops_the_chain(#[case] strategy: ResolveStrategy) {
    let temp = build_tree(&[
        "docs/layout.html",
        "docs/page.html",
        "docs/guide/layout.html",
        "docs/guide/deep/layout.html",
    ]);
    let map = resolve_with(temp.path(), ".", strategy, Traversal::DepthFirst);

    assert_eq!(map.len(), 1);
    assert_eq!(
        map.get("docs/page").unwrap().as_slice(),
        ["docs/layout", "docs/page"]
    );
}

#[rstest]
#[case::length_ordered(
    ResolveStrategy::LengthOrdered,
    &["layout", "app/layout", "app/blog/layout", "app/blog2/post"]
)]
#[case::directory_trie(
    ResolveStrategy::DirectoryTrie,
    &["layout", "app/layout", "app/blog2/post"]
)]
fn test_sibling_name_prefix(
    #[case] strategy: ResolveStrategy,
    #[case] chain: &[&str],
    #[values(Traversal::DepthFirst, Traversal::BreadthFirst)] traversal: Traversal,
) {
    let temp = build_tree(&[
        "layout.html",
        "app/layout.html",
        "app/blog/layout.html",
        "app/blog2/post.html",
    ]);
    let map = resolve_with(temp.path(), ".", strategy, traversal);

    assert_eq!(map.get("app/blog2/post").unwrap().as_slice(), chain);
}

#[test]
fn test_target_is_always_last() {
    let temp = build_tree(MIXED_TREE);
    let map = resolve(temp.path(), "html", "layout", ".").unwrap();

    assert!(!map.is_empty());
    for (id, chain) in map.iter() {
        assert_eq!(chain.target(), id);
        assert_eq!(chain.as_slice().last(), Some(id));
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let temp = build_tree(MIXED_TREE);
    let first = resolve(temp.path(), "html", "layout", ".").unwrap();
    let second = resolve(temp.path(), "html", "layout", ".").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_scope_keeps_outside_layouts_in_chains() {
    let temp = build_tree(&[
        "layout.html",
        "shared/layout.html",
        "pages/layout.html",
        "pages/home.html",
        "shared/footer.html",
    ]);
    let map = resolve(temp.path(), "html", "layout", Scope::parse("pages"))
        .unwrap()
        .relative_to(temp.path());

    assert_eq!(map.len(), 1);
    assert!(!map.contains("shared/footer"));
    assert_eq!(
        map.get("pages/home").unwrap().as_slice(),
        ["layout", "pages/layout", "pages/home"]
    );
}

#[test]
fn test_only_layouts_in_scope_yields_empty_mapping() {
    let temp = build_tree(&["layout.html", "index.html", "theme/layout.html"]);
    let map = resolve(temp.path(), "html", "layout", "theme").unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_custom_extension_and_marker() {
    let temp = build_tree(&[
        "base.md",
        "guide/base.md",
        "guide/intro.md",
        "guide/layout.md",
        "guide/intro.html",
    ]);
    let map = resolve(temp.path(), "md", "base", ".")
        .unwrap()
        .relative_to(temp.path());

    assert_eq!(map.len(), 2);
    assert_eq!(
        map.get("guide/intro").unwrap().as_slice(),
        ["base", "guide/base", "guide/intro"]
    );
    assert_eq!(
        map.get("guide/layout").unwrap().as_slice(),
        ["base", "guide/base", "guide/layout"]
    );
}

#[test]
fn test_missing_root_aborts() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nowhere");

    for traversal in [Traversal::DepthFirst, Traversal::BreadthFirst] {
        let result = LayoutResolver::new(ResolveRules::default())
            .with_walker(traversal)
            .resolve(&missing);
        assert!(result.is_err(), "{traversal} should fail on a missing root");
    }
}

#[test_log::test]
fn test_generated_dataset_chains_follow_depth() {
    let temp = TempDir::new().unwrap();
    let spec = DatasetSpec::new(4, 3);
    let written = generate_dataset(temp.path(), spec).unwrap();

    let by_length = resolve_with(
        temp.path(),
        ".",
        ResolveStrategy::LengthOrdered,
        Traversal::DepthFirst,
    );
    let by_trie = resolve_with(
        temp.path(),
        ".",
        ResolveStrategy::DirectoryTrie,
        Traversal::BreadthFirst,
    );

    assert_eq!(by_length.len(), written);
    // Generated `dir{i}_{d}` names are never string prefixes of a sibling.
    assert_eq!(by_length, by_trie);

    let deepest = by_length.get("dir2_0/dir2_1/dir2_2/file4").unwrap();
    assert_eq!(
        deepest.as_slice(),
        [
            "dir2_0/layout",
            "dir2_0/dir2_1/layout",
            "dir2_0/dir2_1/dir2_2/layout",
            "dir2_0/dir2_1/dir2_2/file4",
        ]
    );
    for (id, chain) in by_length.iter() {
        let depth = id.matches('/').count();
        assert_eq!(chain.layouts().len(), depth, "{id}");
    }
}

#[test]
fn test_resolver_built_from_config() {
    let temp = build_tree(MIXED_TREE);
    let config = ResolverConfig {
        scope: "auth".to_string(),
        traversal: Traversal::BreadthFirst,
        ..Default::default()
    };
    let map = config
        .resolver()
        .resolve(temp.path())
        .unwrap()
        .relative_to(temp.path());

    let want = expected(&[
        ("auth/login", &["layout", "auth/login"]),
        ("auth/register", &["layout", "auth/register"]),
    ]);
    assert_eq!(as_plain(&map), want);
}
