//! `resdeps types` - show the effective type definitions.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use super::common::{ConfigArgs, OutputFormat};
use crate::config::ResourceConfig;
use crate::core::ResourceType;

/// List every resource type with its groups and URL aliases.
#[derive(Args, Debug)]
pub struct TypesCommand {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TypesCommand {
    /// Run the command.
    pub fn execute(self) -> Result<()> {
        let (_, config) = self.source.load()?;

        match self.format {
            OutputFormat::Json => {
                let types: Vec<_> = config.types.iter().map(|def| describe(&config, def)).collect();
                println!("{}", serde_json::to_string_pretty(&types)?);
            }
            OutputFormat::Text => {
                for def in config.types.iter() {
                    print_type(&config, def);
                }
            }
        }

        Ok(())
    }
}

fn describe(config: &ResourceConfig, def: &ResourceType) -> serde_json::Value {
    let groups: serde_json::Map<String, serde_json::Value> = config
        .tables
        .groups_of(&def.name)
        .into_iter()
        .map(|(name, members)| {
            let members: Vec<String> = members.iter().map(ToString::to_string).collect();
            (name.to_string(), json!(members))
        })
        .collect();
    let urls: serde_json::Map<String, serde_json::Value> =
        config.tables.urls_of(&def.name).into_iter().map(|(k, v)| (k.to_string(), json!(v))).collect();

    json!({
        "type": def,
        "groups": groups,
        "urls": urls,
    })
}

fn flag(value: Option<bool>) -> String {
    value.map_or_else(|| "inherit".dimmed().to_string(), |v| v.to_string())
}

fn print_type(config: &ResourceConfig, def: &ResourceType) {
    println!("{}", def.name.bold());
    if !def.as_keyword.is_empty() {
        println!("  as:         {}", def.as_keyword);
    }
    println!("  collection: {}", def.collection_name);
    println!("  exts:       {}", def.extensions.join(", "));
    println!("  path:       {}", def.search_paths.join(", "));
    println!("  warn:       {}", flag(def.warn_on_missing));
    println!("  link:       {}", flag(def.use_link_header));

    for (name, members) in config.tables.groups_of(&def.name) {
        let members: Vec<String> = members.iter().map(ToString::to_string).collect();
        println!("  group {} = [{}]", name.cyan(), members.join(", "));
    }
    for (name, url) in config.tables.urls_of(&def.name) {
        println!("  url {} = {}", name.cyan(), url);
    }
}
