//! Tests for first-match rule selection on the shipped configuration.

use galley_config::{BuildConfig, LoaderUse, Pattern, Rule, TransformPlan, plan};
use serde_json::json;
use std::path::Path;

fn loader_for(config: &BuildConfig, file: &str) -> Option<String> {
    match config.transform(Path::new(file)) {
        TransformPlan::Chain { rule, .. } => Some(rule.uses[0].loader.clone()),
        TransformPlan::Copy => None,
    }
}

#[test]
fn vue_default_routes_each_asset_type() {
    let config = BuildConfig::vue_default();

    assert_eq!(loader_for(&config, "javascript/index.js").as_deref(), Some("babel-loader"));
    assert_eq!(loader_for(&config, "javascript/App.vue").as_deref(), Some("vue-loader"));
    assert_eq!(loader_for(&config, "styles/main.scss").as_deref(), Some("sass-loader"));
    assert_eq!(loader_for(&config, "styles/reset.css").as_deref(), Some("sass-loader"));
    assert_eq!(loader_for(&config, "images/logo.svg").as_deref(), Some("url-loader"));
    assert_eq!(loader_for(&config, "fixtures/menu.json").as_deref(), Some("url-loader"));
}

#[test]
fn node_modules_javascript_skips_babel_and_is_copied() {
    let config = BuildConfig::vue_default();
    assert!(config.transform(Path::new("node_modules/vue/dist/vue.esm.js")).is_copy());
}

#[test]
fn unmatched_files_are_copied_verbatim() {
    let config = BuildConfig::vue_default();
    assert!(config.transform(Path::new("static/index.html")).is_copy());
    assert!(config.transform(Path::new("fonts/icons.woff2")).is_copy());
}

#[test]
fn sass_rule_keeps_its_options() {
    let config = BuildConfig::vue_default();
    let plan = config.transform(Path::new("styles/main.sass"));
    let loaders = plan.loaders();
    assert_eq!(loaders.len(), 1);
    assert_eq!(
        loaders[0].options,
        Some(json!({ "outputStyle": "expanded", "sourceMap": true }))
    );
}

#[test]
fn overlapping_rules_are_not_merged() {
    let rules = vec![
        Rule::new(Pattern::new(r"\.vue$").unwrap(), vec![LoaderUse::new("vue-loader")]),
        Rule::new(
            Pattern::new(r"App\.vue$").unwrap(),
            vec![LoaderUse::new("special-loader")],
        ),
    ];

    let TransformPlan::Chain { index, rule } = plan(&rules, Path::new("javascript/App.vue")) else {
        panic!("expected a match");
    };
    assert_eq!(index, 0);
    assert_eq!(rule.uses, vec![LoaderUse::new("vue-loader")]);
}

#[test]
fn rule_order_decides_for_every_overlap() {
    // Both rules match every .json file; swapping them swaps the winner.
    let a = Rule::new(Pattern::new(r"\.json$").unwrap(), vec![LoaderUse::new("json-loader")]);
    let b = Rule::new(Pattern::new(r"\.(png|json)$").unwrap(), vec![LoaderUse::new("url-loader")]);

    for file in ["menu.json", "data/tasks.json", "deep/nested/chores.json"] {
        let forward = vec![a.clone(), b.clone()];
        let reverse = vec![b.clone(), a.clone()];
        assert_eq!(plan(&forward, Path::new(file)).loaders()[0].loader, "json-loader");
        assert_eq!(plan(&reverse, Path::new(file)).loaders()[0].loader, "url-loader");
    }
}
