use serde::Serialize;

use super::NodeId;

#[derive(Clone, PartialEq)]
pub enum CfgError {
    NoFunction,
    FirstDeclarationNotFunction { found: String },
}

impl std::fmt::Display for CfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFunction => write!(f, "No function declaration to build a CFG for"),
            Self::FirstDeclarationNotFunction { found } => write!(
                f,
                "First declaration '{}' is not a function, can't build a CFG",
                found
            ),
        }
    }
}

impl std::fmt::Debug for CfgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Recoverable diagnostics; the graph is still produced
#[derive(Clone, PartialEq, Serialize)]
pub enum CfgWarning {
    UnresolvedLabel { label: String, goto: NodeId },
    BreakOutsideLoopOrSwitch { node: NodeId },
    DuplicateLabel { label: String, first: NodeId, duplicate: NodeId },
}

impl std::fmt::Display for CfgWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedLabel { label, goto } => {
                write!(f, "Label '{}' not found for goto at node {}", label, goto)
            }
            Self::BreakOutsideLoopOrSwitch { node } => {
                write!(f, "Break at node {} is outside of any loop or switch", node)
            }
            Self::DuplicateLabel {
                label,
                first,
                duplicate,
            } => write!(
                f,
                "Label '{}' at node {} already defined at node {}",
                label, duplicate, first
            ),
        }
    }
}

impl std::fmt::Debug for CfgWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}
