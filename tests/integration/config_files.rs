//! Loading resource configuration from files in each supported format.

use resdeps::config::{ConfigImporter, ConfigStore, ResolverSettings, ResourceConfig};
use resdeps::core::ResError;
use resdeps::header::PrefixMode;
use resdeps::test_utils::{AssetTree, SAMPLE_CONFIG_TOML, init_test_logging};

fn import(store: &ConfigStore, section: &str) -> ResourceConfig {
    let mut config = ResourceConfig::new();
    ConfigImporter::new(store).load_resource_config(&mut config, section, None, "--").unwrap();
    config
}

#[test]
fn test_toml_file_with_sections() {
    init_test_logging(None);
    let tree = AssetTree::new().unwrap();
    let path = tree.write("site.toml", SAMPLE_CONFIG_TOML).unwrap();

    let store = ConfigStore::from_file(&path).unwrap();
    let mut config = import(&store, "resources");
    config.settings = ResolverSettings::from_value(store.get("settings").unwrap()).unwrap();

    assert!(config.settings.use_link_header);
    assert_eq!(config.settings.link_header_prefix, "/static/");
    assert_eq!(config.types.get("js").unwrap().search_paths, vec!["assets/js"]);
    assert_eq!(config.types.get("css").unwrap().extensions, vec![".css"]);
    assert_eq!(config.types.get("css").unwrap().use_link_header, Some(false));
    assert_eq!(config.tables.group("css", "base").map(<[_]>::len), Some(2));
    assert_eq!(
        config.tables.url("js", "analytics"),
        Some("https://cdn.example.com/analytics.js")
    );
}

#[test]
fn test_json_file_with_commented_type() {
    let tree = AssetTree::new().unwrap();
    let path = tree
        .write(
            "resources.json",
            r#"{
                "comment": "//",
                "//video": {"path": ["/v"]},
                "js": {"path": ["/j"], "urls": {"//old": "https://x/old.js", "cdn": "https://x/cdn.js"}}
            }"#,
        )
        .unwrap();

    let store = ConfigStore::from_file(&path).unwrap();
    let config = import(&store, "");

    assert!(!config.types.contains("//video"));
    assert!(!config.types.contains("comment"));
    assert_eq!(config.tables.url("js", "old"), None);
    assert_eq!(config.tables.url("js", "//old"), None);
    assert_eq!(config.tables.url("js", "cdn"), Some("https://x/cdn.js"));
}

#[test]
fn test_yaml_file_with_custom_type() {
    let tree = AssetTree::new().unwrap();
    let path = tree
        .write(
            "assets.yaml",
            "site:\n  assets:\n    img:\n      path: [/img]\n      exts: [.webp, .png]\n      as: image\n      name: images\n",
        )
        .unwrap();

    let store = ConfigStore::from_file(&path).unwrap();
    let config = import(&store, "site.assets");

    let img = config.types.get("img").unwrap();
    assert_eq!(img.as_keyword, "image");
    assert_eq!(img.collection_name, "images");
    assert_eq!(img.extensions, vec![".webp", ".png"]);
}

#[test]
fn test_settings_prefix_mode_from_file() {
    let tree = AssetTree::new().unwrap();
    let path = tree
        .write("settings.toml", "[resolver]\nlink_header_prefix = \"cdn\"\nprefix_mode = 2\nlink_urls = true\n")
        .unwrap();

    let store = ConfigStore::from_file(&path).unwrap();
    let settings = ResolverSettings::from_value(store.get("resolver").unwrap()).unwrap();

    assert_eq!(settings.prefix_mode, PrefixMode::PerCall);
    assert!(settings.link_urls);
    assert!(settings.warn_on_missing);
}

#[test]
fn test_missing_section_is_a_config_error() {
    let tree = AssetTree::new().unwrap();
    let path = tree.write("site.toml", SAMPLE_CONFIG_TOML).unwrap();
    let store = ConfigStore::from_file(&path).unwrap();

    let mut config = ResourceConfig::new();
    let err = ConfigImporter::new(&store)
        .load_resource_config(&mut config, "assets", None, "--")
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<ResError>(), Some(ResError::ConfigError { .. })));
}

#[test]
fn test_scalar_section_is_a_config_error() {
    let tree = AssetTree::new().unwrap();
    let path = tree.write("site.toml", SAMPLE_CONFIG_TOML).unwrap();
    let store = ConfigStore::from_file(&path).unwrap();

    let mut config = ResourceConfig::new();
    let err = ConfigImporter::new(&store)
        .load_resource_config(&mut config, "settings.link_header_prefix", None, "--")
        .unwrap_err();
    assert!(matches!(err.downcast_ref::<ResError>(), Some(ResError::ConfigError { .. })));
}

#[test]
fn test_broken_file_reports_parse_error() {
    let tree = AssetTree::new().unwrap();
    let path = tree.write("broken.json", "{\"js\": ").unwrap();

    let err = ConfigStore::from_file(&path).unwrap_err();
    assert!(matches!(err.downcast_ref::<ResError>(), Some(ResError::ConfigParseError { .. })));
}
