//! Tests for import resolution against a real directory tree.

use galley_config::{BuildConfig, ResolveConfig, ResolveError, Resolver};
use indexmap::IndexMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "// fixture").unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    let root = dir.path();
    touch(root, "javascript/index.js");
    touch(root, "javascript/api.js");
    touch(root, "javascript/api.json");
    touch(root, "javascript/components/index.jsx");
    touch(root, "node_modules/vue/dist/vue.esm.js");
    touch(root, "node_modules/babel-polyfill/lib/index.js");
    touch(root, "node_modules/babel-polyfill/index.js");
    dir
}

#[test]
fn alias_resolves_to_target() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let resolved = resolver.resolve("vue", &dir.path().join("javascript")).unwrap();
    assert_eq!(resolved, dir.path().join("node_modules/vue/dist/vue.esm.js"));
}

#[test]
fn alias_hit_never_falls_through_to_extension_search() {
    let dir = TempDir::new().unwrap();
    // `vue` would resolve through extension search of the original specifier...
    touch(dir.path(), "node_modules/vue.js");
    // ...but the alias target is missing.
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let err = resolver.resolve("vue", dir.path()).unwrap_err();
    let ResolveError::ModuleNotFound { specifier, tried, .. } = err;
    assert_eq!(specifier, "vue");
    assert!(!tried.iter().any(|p| p.ends_with("node_modules/vue.js")));
    assert!(tried.iter().all(|p| p.to_string_lossy().contains("vue.esm")));
}

#[test]
fn extensions_are_tried_in_declared_order() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let resolved = resolver
        .resolve("./api", &dir.path().join("javascript"))
        .unwrap();
    assert_eq!(resolved, dir.path().join("javascript/api.js"));

    let json_first = ResolveConfig {
        extensions: vec![".json".to_string(), ".js".to_string()],
        ..ResolveConfig::default()
    };
    let resolver = Resolver::new(&json_first, dir.path());
    let resolved = resolver
        .resolve("./api", &dir.path().join("javascript"))
        .unwrap();
    assert_eq!(resolved, dir.path().join("javascript/api.json"));
}

#[test]
fn directory_index_is_found() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let resolved = resolver
        .resolve("./components", &dir.path().join("javascript"))
        .unwrap();
    assert_eq!(resolved, dir.path().join("javascript/components/index.jsx"));
}

#[test]
fn bare_specifier_searches_modules() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let resolved = resolver.resolve("babel-polyfill", dir.path()).unwrap();
    assert_eq!(resolved, dir.path().join("node_modules/babel-polyfill/index.js"));
}

#[test]
fn parent_segments_are_cleaned() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let resolved = resolver
        .resolve("../index", &dir.path().join("javascript/components"))
        .unwrap();
    assert_eq!(resolved, dir.path().join("javascript/index.js"));
}

#[test]
fn relative_alias_target_is_rooted_at_project() {
    let dir = project();
    let mut alias = IndexMap::new();
    alias.insert("@".to_string(), "./javascript".to_string());
    let config = ResolveConfig {
        alias,
        ..ResolveConfig::default()
    };
    let resolver = Resolver::new(&config, dir.path());

    let resolved = resolver
        .resolve("@/api", &dir.path().join("javascript/components"))
        .unwrap();
    assert_eq!(resolved, dir.path().join("javascript/api.js"));
}

#[test]
fn missing_module_reports_probes() {
    let dir = project();
    let config = BuildConfig::vue_default();
    let resolver = config.resolver(dir.path());

    let err = resolver
        .resolve("./missing", &dir.path().join("javascript"))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("can't resolve './missing'"));

    let ResolveError::ModuleNotFound { tried, .. } = err;
    // the bare candidate plus one per extension
    assert_eq!(tried.len(), 1 + config.resolve.extensions.len());
    assert!(tried[1].ends_with("missing.js"));
}
