//! `resdeps resolve` - run one resolution pass and print its output.
//!
//! ```bash
//! resdeps resolve -c site.toml --section resources js app
//! resdeps resolve -c site.toml --section resources --block legacy --link js app main
//! resdeps resolve -c site.toml --section resources --format json css base
//! ```
//!
//! `--block` accepts the group member syntax, so `--block css:theme` blocks a
//! stylesheet while resolving scripts.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;
use std::str::FromStr;

use super::common::{ConfigArgs, OutputFormat, ensure_type};
use crate::config::ResolverSettings;
use crate::core::{ResError, ResourceRef};
use crate::header::{HeaderList, PrefixMode};
use crate::resolver::{OutputEntry, RenderData, Resolver};

/// Resolve resources and print the resulting collections and headers.
#[derive(Args, Debug)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Dotted name of the resolver settings table
    #[arg(long, value_name = "NAME")]
    pub settings: Option<String>,

    /// Resource type the names belong to
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Resources, groups or URL aliases to include, in order
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Block a resource before resolving (repeatable, accepts `type:name`)
    #[arg(long = "block", value_name = "NAME")]
    pub blocked: Vec<String>,

    /// Emit preload headers for every type without its own `link` flag
    #[arg(long)]
    pub link: bool,

    /// Static prefix for preload headers
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl ResolveCommand {
    /// Run the command.
    pub fn execute(self) -> Result<()> {
        let (store, mut config) = self.source.load()?;

        if let Some(name) = &self.settings {
            let value = store.get(name).ok_or_else(|| ResError::ConfigError {
                message: format!("Invalid settings '{name}'"),
            })?;
            config.settings = ResolverSettings::from_value(value)?;
        }
        if self.link {
            config.settings.use_link_header = true;
        }
        if let Some(prefix) = &self.prefix {
            config.settings.link_header_prefix = prefix.clone();
            config.settings.prefix_mode = PrefixMode::Static;
        }

        ensure_type(&config, &self.type_name)?;

        let mut resolver = Resolver::new(&config);
        for raw in &self.blocked {
            let reference = ResourceRef::from_str(raw)?;
            resolver.use_resource(reference.target_type(&self.type_name), &reference.name, true)?;
        }

        let mut unresolved = Vec::new();
        for name in &self.names {
            if !resolver.use_resource(&self.type_name, name, false)? {
                unresolved.push(name.clone());
            }
        }

        let (data, headers) = resolver.finish();
        match self.format {
            OutputFormat::Json => {
                let headers: Vec<String> = headers.iter().map(|(n, v)| format!("{n}: {v}")).collect();
                let output = json!({
                    "collections": data,
                    "headers": headers,
                    "unresolved": unresolved,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => print_text(&data, &headers, &unresolved),
        }

        Ok(())
    }
}

fn print_text(data: &RenderData, headers: &HeaderList, unresolved: &[String]) {
    if data.is_empty() {
        println!("{}", "No resources resolved".yellow());
    }

    for (collection, entries) in data.iter() {
        println!("{}", format!("{collection}:").bold());
        for entry in entries {
            match entry {
                OutputEntry::File(path) => println!("  {path}"),
                OutputEntry::Url {
                    url,
                } => println!("  {} {}", url, "(url)".dimmed()),
            }
        }
    }

    if !headers.is_empty() {
        println!();
        for (name, value) in headers.iter() {
            println!("{name}: {value}");
        }
    }

    if !unresolved.is_empty() {
        eprintln!("{} {}", "unresolved:".yellow(), unresolved.join(", "));
    }
}
