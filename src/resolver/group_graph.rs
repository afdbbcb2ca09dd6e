//! Static analysis of group definitions.
//!
//! Groups reference other groups, possibly across types, so a configuration
//! describes a directed graph of `type:name` nodes. This module builds that
//! graph to find problems before any page is rendered:
//!
//! - cycles, which would make expansion fail at request time
//! - members whose type has no definition, which always resolve to nothing

use anyhow::{Result, anyhow};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fmt;

use crate::config::ResourceConfig;
use crate::core::{ResError, ResourceRef};

/// A group in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupNode {
    /// Type the group belongs to
    pub type_name: String,
    /// Group name
    pub name: String,
}

impl GroupNode {
    /// Create a node.
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for GroupNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.name)
    }
}

/// A group member that names an undefined type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMember {
    /// Group containing the member
    pub group: GroupNode,
    /// The member as written
    pub member: ResourceRef,
}

/// DFS colors for cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Directed graph of group → member-group edges.
pub struct GroupGraph {
    graph: DiGraph<GroupNode, ()>,
    node_map: HashMap<GroupNode, NodeIndex>,
    unknown: Vec<UnknownMember>,
}

impl GroupGraph {
    /// Build the graph for every group in `config`.
    ///
    /// Nodes are added in sorted order so the reported cycle is stable.
    pub fn from_config(config: &ResourceConfig) -> Self {
        let mut graph = Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            unknown: Vec::new(),
        };

        for type_name in config.tables.group_types() {
            for (name, members) in config.tables.groups_of(type_name) {
                let from = graph.ensure_node(GroupNode::new(type_name, name));

                for member in members {
                    let target = member.target_type(type_name);
                    if !config.types.contains(target) {
                        graph.unknown.push(UnknownMember {
                            group: GroupNode::new(type_name, name),
                            member: member.clone(),
                        });
                        continue;
                    }
                    if config.tables.group(target, &member.name).is_some() {
                        let to = graph.ensure_node(GroupNode::new(target, member.name.as_str()));
                        if !graph.graph.contains_edge(from, to) {
                            graph.graph.add_edge(from, to, ());
                        }
                    }
                }
            }
        }

        graph
    }

    fn ensure_node(&mut self, node: GroupNode) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&node) {
            index
        } else {
            let index = self.graph.add_node(node.clone());
            self.node_map.insert(node, index);
            index
        }
    }

    /// Fail with [`ResError::CyclicGroup`] if any group contains itself.
    pub fn detect_cycles(&self) -> Result<()> {
        match self.find_cycle() {
            Some(cycle) => Err(ResError::CyclicGroup {
                chain: render_chain(&cycle),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// The first cycle found, closed by repeating its first node.
    pub fn find_cycle(&self) -> Option<Vec<GroupNode>> {
        let mut colors: HashMap<NodeIndex, Color> =
            self.graph.node_indices().map(|n| (n, Color::White)).collect();
        let mut path = Vec::new();

        for node in self.graph.node_indices() {
            if colors.get(&node) == Some(&Color::White)
                && let Some(cycle) = self.dfs_visit(node, &mut colors, &mut path)
            {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs_visit(
        &self,
        node: NodeIndex,
        colors: &mut HashMap<NodeIndex, Color>,
        path: &mut Vec<NodeIndex>,
    ) -> Option<Vec<GroupNode>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        for neighbor in self.graph.neighbors(node) {
            match colors.get(&neighbor) {
                Some(Color::Gray) => {
                    let start = path.iter().position(|n| *n == neighbor).unwrap_or(0);
                    let mut cycle: Vec<GroupNode> =
                        path[start..].iter().map(|n| self.graph[*n].clone()).collect();
                    cycle.push(self.graph[neighbor].clone());
                    return Some(cycle);
                }
                Some(Color::White) => {
                    if let Some(cycle) = self.dfs_visit(neighbor, colors, path) {
                        return Some(cycle);
                    }
                }
                _ => {}
            }
        }

        path.pop();
        colors.insert(node, Color::Black);
        None
    }

    /// Groups ordered so that every nested group comes before the groups using it.
    pub fn expansion_order(&self) -> Result<Vec<GroupNode>> {
        self.detect_cycles()?;

        let indices =
            toposort(&self.graph, None).map_err(|_| anyhow!("Failed to order group expansion"))?;
        Ok(indices.into_iter().rev().map(|idx| self.graph[idx].clone()).collect())
    }

    /// Members that name an undefined type.
    pub fn unknown_members(&self) -> &[UnknownMember] {
        &self.unknown
    }

    /// Number of groups that take part in nesting.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of group → group edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Render a node chain as `type:name → type:name`.
pub fn render_chain(nodes: &[GroupNode]) -> String {
    nodes.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
}
