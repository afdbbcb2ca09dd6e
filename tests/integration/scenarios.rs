//! Resolution passes over asset trees on disk.

use resdeps::config::{ConfigImporter, ResourceConfig};
use resdeps::resolver::{OutputEntry, Resolver};
use resdeps::test_utils::{AssetTree, init_test_logging, sample_resource_config};
use serde_json::json;

fn sample_tree() -> AssetTree {
    init_test_logging(None);
    let tree = AssetTree::new().unwrap();
    for file in [
        "assets/js/jquery.min.js",
        "assets/js/jquery.js",
        "assets/js/main.js",
        "assets/js/legacy.js",
        "assets/css/reset.css",
        "assets/css/theme.css",
    ] {
        tree.add(file).unwrap();
    }
    tree
}

#[test]
fn test_app_group_on_disk() {
    let tree = sample_tree();
    let root = tree.dir("");
    let mut config = sample_resource_config(&root).unwrap();
    config.settings.use_link_header = true;

    let mut resolver = Resolver::new(&config);
    assert!(resolver.use_resource("js", "app", false).unwrap());

    let (data, headers) = resolver.finish();
    assert_eq!(
        data.collection("scripts"),
        &[
            OutputEntry::File(format!("{root}/assets/js/jquery.min.js")),
            OutputEntry::File(format!("{root}/assets/js/main.js")),
        ]
    );
    assert_eq!(
        data.collection("stylesheets"),
        &[
            OutputEntry::File(format!("{root}/assets/css/reset.css")),
            OutputEntry::File(format!("{root}/assets/css/theme.css")),
        ]
    );

    // css has link = false
    assert_eq!(
        headers.values("Link"),
        vec![
            format!("<{root}/assets/js/jquery.min.js>; rel=preload; as=script"),
            format!("<{root}/assets/js/main.js>; rel=preload; as=script"),
        ]
    );
}

#[test]
fn test_blocked_legacy_stays_blocked() {
    let tree = sample_tree();
    let config = sample_resource_config(&tree.dir("")).unwrap();

    let mut resolver = Resolver::new(&config);
    resolver.add_js(&["app", "legacy"]).unwrap();

    let scripts = resolver.render_data().collection("scripts");
    assert!(scripts.iter().all(|e| !e.target().ends_with("legacy.js")));
}

#[test]
fn test_url_alias_and_files_share_collection() {
    let tree = sample_tree();
    let root = tree.dir("");
    let config = sample_resource_config(&root).unwrap();

    let mut resolver = Resolver::new(&config);
    resolver.add_js(&["main", "analytics"]).unwrap();

    assert_eq!(
        serde_json::to_value(resolver.render_data()).unwrap(),
        json!({"scripts": [
            format!("{root}/assets/js/main.js"),
            {"url": "https://cdn.example.com/analytics.js"}
        ]})
    );
}

#[test]
fn test_file_created_after_miss_is_found() {
    let tree = sample_tree();
    let config = sample_resource_config(&tree.dir("")).unwrap();

    let mut resolver = Resolver::new(&config);
    assert!(!resolver.use_resource("js", "late", false).unwrap());

    tree.add("assets/js/late.js").unwrap();
    assert!(resolver.use_resource("js", "late", false).unwrap());
    assert_eq!(resolver.render_data().collection("scripts").len(), 1);
}

#[test]
fn test_missing_search_directory_is_skipped() {
    let tree = sample_tree();
    let root = tree.dir("");
    let mut config = sample_resource_config(&root).unwrap();
    config.types.add_resource_paths("js", &[format!("{root}/nowhere")], 0, 0);

    let resolver = Resolver::new(&config);
    assert_eq!(resolver.find_resource("js", "main"), Some(format!("{root}/assets/js/main.js")));
}

#[test]
fn test_layered_configuration_prepends_override_path() {
    let tree = sample_tree();
    tree.add("overrides/js/main.js").unwrap();
    let root = tree.dir("");

    let mut config = sample_resource_config(&root).unwrap();
    let overlay = json!({
        "js": {
            "path": [format!("{root}/overrides/js")],
            "pathOffset": 0,
            "pathReplace": 0
        }
    });
    ConfigImporter::inline_only().load_resource_config(&mut config, &overlay, None, "--").unwrap();

    let resolver = Resolver::new(&config);
    assert_eq!(resolver.find_resource("js", "main"), Some(format!("{root}/overrides/js/main.js")));
    assert_eq!(
        resolver.find_resource("js", "jquery"),
        Some(format!("{root}/assets/js/jquery.min.js"))
    );
}

#[test]
fn test_reset_between_pages() {
    let tree = sample_tree();
    let config: ResourceConfig = sample_resource_config(&tree.dir("")).unwrap();

    let mut resolver = Resolver::new(&config);
    resolver.add_css(&["base"]).unwrap();
    resolver.add_js(&["main"]).unwrap();

    resolver.reset_resource("css");
    assert!(resolver.render_data().collection("stylesheets").is_empty());
    assert_eq!(resolver.render_data().collection("scripts").len(), 1);

    resolver.add_css(&["theme"]).unwrap();
    assert_eq!(resolver.render_data().collection("stylesheets").len(), 1);
}
