//! Tests for the `resdeps` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use resdeps::test_utils::{AssetTree, SAMPLE_CONFIG_TOML};

/// A project directory with `site.toml` and the files it refers to.
fn sample_project() -> AssetTree {
    let tree = AssetTree::new().unwrap();
    tree.write("site.toml", SAMPLE_CONFIG_TOML).unwrap();
    for file in [
        "assets/js/jquery.min.js",
        "assets/js/main.js",
        "assets/js/legacy.js",
        "assets/css/reset.css",
        "assets/css/theme.css",
    ] {
        tree.add(file).unwrap();
    }
    tree
}

fn resdeps(tree: &AssetTree) -> Command {
    let mut cmd = Command::cargo_bin("resdeps").unwrap();
    cmd.current_dir(tree.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_resolve_group_text_output() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["resolve", "-c", "site.toml", "--section", "resources", "--settings", "settings"])
        .args(["js", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "scripts:\n  assets/js/jquery.min.js\n  assets/js/main.js\n",
        ))
        .stdout(predicate::str::contains("stylesheets:\n  assets/css/reset.css\n  assets/css/theme.css\n"))
        .stdout(predicate::str::contains(
            "Link: </static/assets/js/jquery.min.js>; rel=preload; as=script",
        ))
        .stdout(predicate::str::contains("Link: </static/assets/js/main.js>; rel=preload; as=script"))
        .stdout(predicate::str::contains("legacy").not())
        .stdout(predicate::str::contains("reset.css>").not());
}

#[test]
fn test_resolve_json_output_lists_unresolved() {
    let tree = sample_project();

    let output = resdeps(&tree)
        .args(["resolve", "-c", "site.toml", "--section", "resources", "--format", "json"])
        .args(["js", "main", "analytics", "nothere"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "collections": {"scripts": [
                "assets/js/main.js",
                {"url": "https://cdn.example.com/analytics.js"}
            ]},
            "headers": [],
            "unresolved": ["nothere"]
        })
    );

    // Missing files are warned about on stderr
    assert!(String::from_utf8_lossy(&output.stderr).contains("nothere"));
}

#[test]
fn test_resolve_block_and_static_prefix() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["resolve", "-c", "site.toml", "--section", "resources"])
        .args(["--block", "jquery", "--block", "css:theme", "--link", "--prefix", "https://cdn.test/"])
        .args(["js", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jquery").not())
        .stdout(predicate::str::contains("theme.css").not())
        .stdout(predicate::str::contains(
            "Link: <https://cdn.test/assets/js/main.js>; rel=preload; as=script",
        ))
        // css carries its own link = false
        .stdout(predicate::str::contains("<https://cdn.test/assets/css/reset.css>").not());
}

#[test]
fn test_resolve_unknown_type_suggests_closest() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["resolve", "-c", "site.toml", "--section", "resources", "fnt", "icons"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown resource type: fnt"))
        .stderr(predicate::str::contains("Did you mean 'font'?"));
}

#[test]
fn test_resolve_missing_config_file() {
    let tree = AssetTree::new().unwrap();

    resdeps(&tree)
        .args(["resolve", "-c", "nope.toml", "js", "app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_types_json() {
    let tree = sample_project();

    let output = resdeps(&tree)
        .args(["types", "-c", "site.toml", "--section", "resources", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let types: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    let js = types.iter().find(|t| t["type"]["name"] == "js").unwrap();
    assert_eq!(js["groups"]["app"], serde_json::json!(["jquery", "!legacy", "main", "css:base"]));
    assert_eq!(js["urls"]["analytics"], "https://cdn.example.com/analytics.js");
    assert!(types.iter().any(|t| t["type"]["name"] == "font"));
}

#[test]
fn test_types_text() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["types", "-c", "site.toml", "--section", "resources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collection: stylesheets"))
        .stdout(predicate::str::contains("group base = [reset, theme]"));
}

#[test]
fn test_check_passes_on_sample() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["check", "-c", "site.toml", "--section", "resources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no cycles"))
        .stdout(predicate::str::contains("expansion order: css:base, js:app"));
}

#[test]
fn test_check_json_lists_expansion_order() {
    let tree = AssetTree::new().unwrap();
    tree.write(
        "nested.json",
        r#"{"js": {"groups": {"page": ["layout", "css:print"], "layout": ["css:base"]}},
            "css": {"groups": {"base": ["reset"], "print": ["paper"]}}}"#,
    )
    .unwrap();

    let output = resdeps(&tree)
        .args(["check", "-c", "nested.json", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["valid"], true);
    let order: Vec<&str> =
        json["expansion_order"].as_array().unwrap().iter().filter_map(|v| v.as_str()).collect();
    assert_eq!(order.len(), 4);

    let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
    assert!(position("css:base") < position("js:layout"));
    assert!(position("js:layout") < position("js:page"));
    assert!(position("css:print") < position("js:page"));
}

#[test]
fn test_check_reports_cycle() {
    let tree = AssetTree::new().unwrap();
    tree.write(
        "cyclic.json",
        r#"{"js": {"groups": {"a": ["x", "css:b"]}}, "css": {"groups": {"b": ["js:a"]}}}"#,
    )
    .unwrap();

    resdeps(&tree)
        .args(["check", "-c", "cyclic.json"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("cyclic group: css:b → js:a → css:b"))
        .stderr(predicate::str::contains("Configuration check failed with 1 problem(s)"));
}

#[test]
fn test_resolve_cyclic_group_fails() {
    let tree = AssetTree::new().unwrap();
    tree.write(
        "cyclic.yaml",
        "js:\n  groups:\n    a: [\"css:b\"]\ncss:\n  groups:\n    b: [\"js:a\"]\n",
    )
    .unwrap();

    resdeps(&tree)
        .args(["resolve", "-c", "cyclic.yaml", "js", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cyclic group reference detected: js:a → css:b → js:a"));
}

#[test]
fn test_verbose_and_quiet_conflict() {
    let tree = sample_project();

    resdeps(&tree)
        .args(["-v", "-q", "check", "-c", "site.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
