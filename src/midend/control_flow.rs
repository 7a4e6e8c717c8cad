//! Per-function control-flow graphs over the IR.
//!
//! Nodes live in an arena indexed by [`NodeId`] and borrow the statements they
//! stand for, so a graph never outlives the [`Function`] it was built from.
//! Edges are successor lists in insertion order with duplicates suppressed.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::Serialize;

use crate::midend::ir::Function;

mod builder;
mod errors;
mod node;

use builder::CfgBuilder;
pub use errors::{CfgError, CfgWarning};
pub use node::{CfgNode, NodeId, NodeStatement};

#[derive(Debug, Serialize)]
pub struct ControlFlowGraph<'a> {
    function: &'a str,
    entry: Option<NodeId>,
    nodes: Vec<CfgNode<'a>>,
    labels: IndexMap<String, NodeId>,
    warnings: Vec<CfgWarning>,
}

impl<'a> ControlFlowGraph<'a> {
    pub fn build(function: &'a Function) -> Self {
        CfgBuilder::new().build(function)
    }

    pub fn function(&self) -> &str {
        self.function
    }

    /// First node executed, `None` for an empty body
    pub fn entry(&self) -> Option<NodeId> {
        self.entry
    }

    pub fn nodes(&self) -> &[CfgNode<'a>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&CfgNode<'a>> {
        self.nodes.get(id)
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.successors())
            .unwrap_or_default()
    }

    pub fn predecessors(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.successors().contains(&id))
            .map(|node| node.id)
            .collect()
    }

    /// Nodes without any successor
    pub fn terminals(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|node| node.successors().is_empty())
            .map(|node| node.id)
            .collect()
    }

    pub fn label(&self, name: &str) -> Option<NodeId> {
        self.labels.get(name).copied()
    }

    pub fn labels(&self) -> &IndexMap<String, NodeId> {
        &self.labels
    }

    pub fn warnings(&self) -> &[CfgWarning] {
        &self.warnings
    }

    pub fn graphviz_string(&self) -> String {
        let mut dot = format!("digraph \"{}\" {{\n", self.function);
        dot.push_str("    node [shape=box];\n");

        for node in &self.nodes {
            let rendered = node.statement.to_string().replace('"', "\\\"");
            let shape = if node.is_join() { ", shape=ellipse" } else { "" };
            dot.push_str(&format!(
                "    n{} [label=\"[{}]\\n{}\"{}];\n",
                node.id, node.id, rendered, shape
            ));
        }

        for node in &self.nodes {
            for successor in node.successors() {
                dot.push_str(&format!("    n{} -> n{};\n", node.id, successor));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

impl Display for ControlFlowGraph<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== CFG ===")?;
        writeln!(f, "Fcn : {}", self.function)?;
        for node in &self.nodes {
            writeln!(f, "{}", node)?;
        }
        Ok(())
    }
}
