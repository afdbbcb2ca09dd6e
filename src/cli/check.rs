//! `resdeps check` - validate group definitions without resolving anything.
//!
//! Reports groups that contain themselves (directly or through other groups)
//! and group members whose type is not defined. Exits non-zero when either is
//! found. Otherwise prints the order groups expand in, nested groups first.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use serde_json::json;

use super::common::{ConfigArgs, OutputFormat};
use crate::resolver::{GroupGraph, GroupNode};
use crate::resolver::group_graph::render_chain;

/// Check a configuration for group cycles and unknown member types.
#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckCommand {
    /// Run the command.
    pub fn execute(self) -> Result<()> {
        let (_, config) = self.source.load()?;
        let graph = GroupGraph::from_config(&config);

        let cycle = graph.find_cycle();
        let unknown = graph.unknown_members();
        let order = if cycle.is_none() { graph.expansion_order()? } else { Vec::new() };

        match self.format {
            OutputFormat::Json => {
                let unknown: Vec<_> = unknown
                    .iter()
                    .map(|u| json!({"group": u.group.to_string(), "member": u.member.to_string()}))
                    .collect();
                let output = json!({
                    "valid": cycle.is_none() && unknown.is_empty(),
                    "cycle": cycle.as_deref().map(render_chain),
                    "unknown_members": unknown,
                    "expansion_order": order.iter().map(ToString::to_string).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if let Some(cycle) = &cycle {
                    println!("{} cyclic group: {}", "✗".red(), render_chain(cycle));
                }
                for u in unknown {
                    println!(
                        "{} group {} references unknown type in '{}'",
                        "✗".red(),
                        u.group,
                        u.member
                    );
                }
                if cycle.is_none() && unknown.is_empty() {
                    println!(
                        "{} {} types, {} groups, no cycles",
                        "✓".green(),
                        config.types.names().len(),
                        graph.node_count()
                    );
                }
                if !order.is_empty() {
                    println!("  expansion order: {}", join_nodes(&order));
                }
            }
        }

        let problems = usize::from(cycle.is_some()) + unknown.len();
        if problems > 0 {
            return Err(anyhow!("Configuration check failed with {problems} problem(s)"));
        }
        Ok(())
    }
}

fn join_nodes(nodes: &[GroupNode]) -> String {
    nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
