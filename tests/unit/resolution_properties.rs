//! Behavioural properties of a resolution pass.

use resdeps::config::{ConfigImporter, ResourceConfig};
use resdeps::core::ResError;
use resdeps::header::{PrefixCallbacks, PrefixMode};
use resdeps::resolver::{Loaded, OutputEntry, Resolver};
use resdeps::test_utils::{MemoryProbe, init_test_logging};
use serde_json::{Value, json};

fn load(value: Value) -> ResourceConfig {
    init_test_logging(None);
    let mut config = ResourceConfig::new();
    ConfigImporter::inline_only().load_resource_config(&mut config, &value, None, "--").unwrap();
    config
}

fn targets(resolver: &Resolver<'_>, collection: &str) -> Vec<String> {
    resolver.render_data().collection(collection).iter().map(|e| e.target().to_string()).collect()
}

#[test]
fn first_match_wins_extension_order_within_a_path() {
    let config = load(json!({"js": {"path": ["p1", "p2"], "exts": [".min.js", ".js"]}}));

    let probe = MemoryProbe::with_files(["p1/x.js", "p2/x.min.js"]);
    let resolver = Resolver::new(&config).with_probe(&probe);
    assert_eq!(resolver.find_resource("js", "x").as_deref(), Some("p1/x.js"));

    probe.add("p1/x.min.js");
    assert_eq!(resolver.find_resource("js", "x").as_deref(), Some("p1/x.min.js"));
}

#[test]
fn duplicate_requests_produce_one_entry() {
    let config = load(json!({"css": {"path": ["/c"], "exts": [".css"]}}));
    let probe = MemoryProbe::with_files(["/c/a.css", "/c/b.css"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.use_resources("css", &["a", "b", "a", "b", "a"], false).unwrap();
    assert_eq!(targets(&resolver, "stylesheets"), vec!["/c/a.css", "/c/b.css"]);
}

#[test]
fn group_member_already_resolved_is_not_repeated() {
    let config = load(json!({"js": {"path": ["/j"], "groups": {"app": ["lib", "main"]}}}));
    let probe = MemoryProbe::with_files(["/j/lib.js", "/j/main.js"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.use_resource("js", "main", false).unwrap();
    resolver.use_resource("js", "app", false).unwrap();
    assert_eq!(targets(&resolver, "scripts"), vec!["/j/main.js", "/j/lib.js"]);
}

#[test]
fn cross_type_members_use_their_own_collection_and_rules() {
    let config = load(json!({
        "js": {"path": ["/j"], "groups": {"page": ["app", "css:theme", "font:icons"]}},
        "css": {"path": ["/c"], "name": "styles"},
        "font": {"path": ["/f"]}
    }));
    let probe = MemoryProbe::with_files(["/j/app.js", "/c/theme.min.css", "/f/icons.woff2", "/f/icons.ttf"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.use_resource("js", "page", false).unwrap();

    assert_eq!(targets(&resolver, "scripts"), vec!["/j/app.js"]);
    assert_eq!(targets(&resolver, "styles"), vec!["/c/theme.min.css"]);
    assert_eq!(targets(&resolver, "fonts"), vec!["/f/icons.woff2"]);
}

#[test]
fn blocked_cross_type_member() {
    let config = load(json!({
        "js": {"path": ["/j"], "groups": {"app": ["a", "!css:print"]}},
        "css": {"path": ["/c"]}
    }));
    let probe = MemoryProbe::with_files(["/j/a.js", "/c/print.css"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.use_resource("js", "app", false).unwrap();
    resolver.use_resource("css", "print", false).unwrap();

    assert!(resolver.render_data().collection("stylesheets").is_empty());
    assert_eq!(resolver.loaded().get("css", "print"), Some(&Loaded::Blocked));
}

#[test]
fn unknown_cross_type_member_is_skipped() {
    let config = load(json!({"js": {"path": ["/j"], "groups": {"app": ["video:intro", "a"]}}}));
    let probe = MemoryProbe::with_files(["/j/a.js"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    assert!(resolver.use_resource("js", "app", false).unwrap());
    assert_eq!(targets(&resolver, "scripts"), vec!["/j/a.js"]);
}

#[test]
fn self_referencing_group_is_reported() {
    let config = load(json!({"js": {"groups": {"loop": ["loop"]}}}));
    let probe = MemoryProbe::new();
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    let err = resolver.use_resource("js", "loop", false).unwrap_err();
    assert!(matches!(err.downcast_ref::<ResError>(), Some(ResError::CyclicGroup { .. })));
    assert!(err.to_string().contains("js:loop → js:loop"));
}

#[test]
fn url_entries_carry_the_url_object() {
    let config = load(json!({"js": {"urls": {"cdn": "https://x/lib.js"}}}));
    let probe = MemoryProbe::new();
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.use_resource("js", "cdn", false).unwrap();
    assert_eq!(
        serde_json::to_value(resolver.render_data()).unwrap(),
        json!({"scripts": [{"url": "https://x/lib.js"}]})
    );
    assert!(probe.probed().is_empty());
}

#[test]
fn per_type_prefix_is_computed_once() {
    let mut config = load(json!({"js": {"path": ["/j"], "link": true}, "css": {"path": ["/c"], "link": true}}));
    config.settings.link_header_prefix = "cdn".to_string();
    config.settings.prefix_mode = PrefixMode::PerType;

    let calls = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    let seen = std::rc::Rc::clone(&calls);
    let mut callbacks = PrefixCallbacks::new();
    callbacks.register("cdn", move |req| {
        seen.borrow_mut().push(req.type_name.to_string());
        format!("https://cdn.test/{}", req.type_name)
    });

    let probe = MemoryProbe::with_files(["/j/a.js", "/j/b.js", "/c/s.css"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe).with_callbacks(&callbacks);
    resolver.add_js(&["a", "b"]).unwrap();
    resolver.add_css(&["s"]).unwrap();

    assert_eq!(*calls.borrow(), vec!["js", "css"]);
    assert_eq!(
        resolver.headers().values("Link"),
        vec![
            "<https://cdn.test/js/j/a.js>; rel=preload; as=script",
            "<https://cdn.test/js/j/b.js>; rel=preload; as=script",
            "<https://cdn.test/css/c/s.css>; rel=preload; as=style",
        ]
    );
}

#[test]
fn unregistered_prefix_callback_falls_back_to_empty_prefix() {
    let mut config = load(json!({"js": {"path": ["/j"], "link": true}}));
    config.settings.link_header_prefix = "missing".to_string();
    config.settings.prefix_mode = PrefixMode::PerCall;

    let probe = MemoryProbe::with_files(["/j/a.js"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);
    resolver.use_resource("js", "a", false).unwrap();

    assert_eq!(resolver.headers().values("Link"), vec!["</j/a.js>; rel=preload; as=script"]);
    assert_eq!(resolver.render_data().collection("scripts"), &[OutputEntry::File("/j/a.js".into())]);
}

#[test]
fn reset_allows_a_blocked_name_to_be_included() {
    let config = load(json!({"js": {"path": ["/j"]}}));
    let probe = MemoryProbe::with_files(["/j/a.js"]);
    let mut resolver = Resolver::new(&config).with_probe(&probe);

    resolver.block_js(&["a"]).unwrap();
    resolver.reset_resource("js");
    resolver.add_js(&["a"]).unwrap();

    assert_eq!(targets(&resolver, "scripts"), vec!["/j/a.js"]);
}
