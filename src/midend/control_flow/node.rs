use std::fmt::Display;

use serde::Serialize;

use crate::midend::ir::{Expression, Statement};

pub type NodeId = usize;

/// What a node stands for: a statement of the function body, one clause of a
/// decomposed `for`, or a synthetic join
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum NodeStatement<'a> {
    Statement(&'a Statement),
    Expression(&'a Expression),
    Join,
}

impl Display for NodeStatement<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Statement(statement) => write!(f, "{}", statement),
            Self::Expression(expression) => write!(f, "{}", expression),
            Self::Join => write!(f, "join"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CfgNode<'a> {
    pub id: NodeId,
    pub statement: NodeStatement<'a>,
    successors: Vec<NodeId>,
    /// First node actually executed when this node heads a compound construct
    pub composite_entry: Option<NodeId>,
    /// Where control reconverges after the construct this node heads
    pub composite_exit: Option<NodeId>,
}

impl<'a> CfgNode<'a> {
    pub(super) fn new(id: NodeId, statement: NodeStatement<'a>) -> Self {
        CfgNode {
            id,
            statement,
            successors: Vec::new(),
            composite_entry: None,
            composite_exit: None,
        }
    }

    pub fn successors(&self) -> &[NodeId] {
        &self.successors
    }

    pub fn is_join(&self) -> bool {
        matches!(self.statement, NodeStatement::Join)
    }

    /// Returns false if the edge already existed
    pub(super) fn add_successor(&mut self, to: NodeId) -> bool {
        if self.successors.contains(&to) {
            return false;
        }
        self.successors.push(to);
        true
    }
}

impl Display for CfgNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} ->", self.id, self.statement)?;
        for (index, successor) in self.successors.iter().enumerate() {
            if index == 0 {
                write!(f, " {}", successor)?;
            } else {
                write!(f, ", {}", successor)?;
            }
        }
        Ok(())
    }
}
