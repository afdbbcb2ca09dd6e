//! Sample configurations for tests.

use anyhow::Result;
use serde_json::{Value, json};

use crate::config::{ConfigImporter, ResourceConfig};

/// A complete TOML configuration with paths relative to the working directory.
///
/// Matching files: `assets/js/{jquery.min.js,main.js,legacy.js}`,
/// `assets/css/{reset.css,theme.css}`.
pub const SAMPLE_CONFIG_TOML: &str = r#"
[settings]
use_link_header = true
link_header_prefix = "/static/"

[resources.js]
path = ["assets/js"]

[resources.js.groups]
app = ["jquery", "!legacy", "main", "css:base"]

[resources.js.urls]
analytics = "https://cdn.example.com/analytics.js"

[resources.css]
path = ["assets/css"]
exts = [".css"]
link = false

[resources.css.groups]
base = ["reset", "theme"]
"#;

/// The resource part of [`SAMPLE_CONFIG_TOML`] as a value tree, with search
/// paths below `root`.
pub fn sample_config(root: &str) -> Value {
    json!({
        "js": {
            "path": [format!("{root}/assets/js")],
            "groups": {"app": ["jquery", "!legacy", "main", "css:base"]},
            "urls": {"analytics": "https://cdn.example.com/analytics.js"}
        },
        "css": {
            "path": [format!("{root}/assets/css")],
            "exts": [".css"],
            "link": false,
            "groups": {"base": ["reset", "theme"]}
        }
    })
}

/// [`sample_config`] imported into a fresh [`ResourceConfig`].
pub fn sample_resource_config(root: &str) -> Result<ResourceConfig> {
    let mut config = ResourceConfig::new();
    ConfigImporter::inline_only().load_resource_config(&mut config, &sample_config(root), None, "--")?;
    Ok(config)
}
