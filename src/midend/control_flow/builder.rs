use indexmap::IndexMap;

use crate::{
    midend::ir::{Block, Case, Expression, Function, Statement},
    trace,
};

use super::{CfgNode, CfgWarning, ControlFlowGraph, NodeId, NodeStatement};

/// Where control enters a placed construct and the nodes it leaves from.
/// Empty exits mean control never falls out (return, goto).
struct Placed {
    entry: NodeId,
    exits: Vec<NodeId>,
}

impl Placed {
    fn single(node: NodeId) -> Self {
        Placed {
            entry: node,
            exits: vec![node],
        }
    }

    fn terminal(node: NodeId) -> Self {
        Placed {
            entry: node,
            exits: Vec::new(),
        }
    }
}

pub(super) struct CfgBuilder<'a> {
    nodes: Vec<CfgNode<'a>>,
    labels: IndexMap<String, NodeId>,
    pending_gotos: Vec<(NodeId, &'a str)>,
    // one frame per enclosing loop or switch
    break_frames: Vec<Vec<NodeId>>,
    warnings: Vec<CfgWarning>,
}

impl<'a> CfgBuilder<'a> {
    pub(super) fn new() -> Self {
        CfgBuilder {
            nodes: Vec::new(),
            labels: IndexMap::new(),
            pending_gotos: Vec::new(),
            break_frames: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(super) fn build(mut self, function: &'a Function) -> ControlFlowGraph<'a> {
        let _span = trace::span_auto!(trace::Level::DEBUG, "Build CFG", function = %function.name);

        let entry = self.place_block(&function.body).map(|placed| placed.entry);
        self.resolve_gotos();

        trace::debug!(
            "CFG for {}: {} nodes, {} labels, {} warnings",
            function.name,
            self.nodes.len(),
            self.labels.len(),
            self.warnings.len()
        );

        ControlFlowGraph {
            function: &function.name,
            entry,
            nodes: self.nodes,
            labels: self.labels,
            warnings: self.warnings,
        }
    }

    fn add_node(&mut self, statement: NodeStatement<'a>) -> NodeId {
        let id = self.nodes.len();
        trace::trace!("node {}: {}", id, statement);
        self.nodes.push(CfgNode::new(id, statement));
        id
    }

    fn add_statement_node(&mut self, statement: &'a Statement) -> NodeId {
        self.add_node(NodeStatement::Statement(statement))
    }

    fn add_edge(&mut self, from: NodeId, to: NodeId) {
        if self.nodes[from].add_successor(to) {
            trace::trace!("edge {} -> {}", from, to);
        }
    }

    fn connect(&mut self, from: &[NodeId], to: NodeId) {
        for &exit in from {
            self.add_edge(exit, to);
        }
    }

    fn warn(&mut self, warning: CfgWarning) {
        trace::warning!("{}", warning);
        self.warnings.push(warning);
    }

    /// Runs `place` with a fresh break frame and hands back the breaks it collected
    fn with_break_frame<T>(&mut self, place: impl FnOnce(&mut Self) -> T) -> (T, Vec<NodeId>) {
        self.break_frames.push(Vec::new());
        let placed = place(self);
        let breaks = self.break_frames.pop().unwrap_or_default();
        (placed, breaks)
    }

    /// Chains the statements of a block; `None` for an empty block
    fn place_block(&mut self, block: &'a Block) -> Option<Placed> {
        let mut placed: Option<Placed> = None;

        for statement in &block.statements {
            let next = self.place_statement(statement);
            placed = Some(match placed {
                None => next,
                Some(previous) => {
                    self.connect(&previous.exits, next.entry);
                    Placed {
                        entry: previous.entry,
                        exits: next.exits,
                    }
                }
            });
        }

        placed
    }

    fn place_statement(&mut self, statement: &'a Statement) -> Placed {
        match statement {
            Statement::Variable(_) | Statement::Expression(_) => {
                Placed::single(self.add_statement_node(statement))
            }
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => self.place_if(statement, then_branch, else_branch.as_ref()),
            Statement::While { body, .. } => self.place_while(statement, body),
            Statement::DoWhile { body, .. } => self.place_do_while(statement, body),
            Statement::For {
                init,
                condition,
                update,
                body,
            } => self.place_for(
                statement,
                init.as_ref(),
                condition.as_ref(),
                update.as_ref(),
                body,
            ),
            Statement::Switch { cases, .. } => self.place_switch(statement, cases),
            Statement::Break => self.place_break(statement),
            Statement::Goto { label } => {
                let node = self.add_statement_node(statement);
                self.pending_gotos.push((node, label));
                Placed::terminal(node)
            }
            Statement::Label { name } => self.place_label(statement, name),
            Statement::Return { .. } => Placed::terminal(self.add_statement_node(statement)),
            Statement::Block(block) => {
                let node = self.add_statement_node(statement);
                match self.place_block(block) {
                    Some(inner) => {
                        self.add_edge(node, inner.entry);
                        Placed {
                            entry: node,
                            exits: inner.exits,
                        }
                    }
                    None => Placed::single(node),
                }
            }
        }
    }

    fn place_if(
        &mut self,
        statement: &'a Statement,
        then_branch: &'a Block,
        else_branch: Option<&'a Block>,
    ) -> Placed {
        let node = self.add_statement_node(statement);
        let mut exits = Vec::new();

        for branch in [Some(then_branch), else_branch] {
            match branch.and_then(|block| self.place_block(block)) {
                Some(placed) => {
                    self.add_edge(node, placed.entry);
                    exits.extend(placed.exits);
                }
                // a missing or empty branch falls through from the condition
                None => {
                    if !exits.contains(&node) {
                        exits.push(node);
                    }
                }
            }
        }

        Placed { entry: node, exits }
    }

    fn place_while(&mut self, statement: &'a Statement, body: &'a Block) -> Placed {
        let node = self.add_statement_node(statement);
        let (body, breaks) = self.with_break_frame(|builder| builder.place_block(body));

        match body {
            Some(body) => {
                self.add_edge(node, body.entry);
                self.connect(&body.exits, node);
            }
            None => self.add_edge(node, node),
        }

        let mut exits = vec![node];
        exits.extend(breaks);
        Placed { entry: node, exits }
    }

    /// The condition node is created before the body but control enters at the body
    fn place_do_while(&mut self, statement: &'a Statement, body: &'a Block) -> Placed {
        let node = self.add_statement_node(statement);
        let (body, breaks) = self.with_break_frame(|builder| builder.place_block(body));

        let entry = match body {
            Some(body) => {
                self.connect(&body.exits, node);
                self.add_edge(node, body.entry);
                self.nodes[node].composite_entry = Some(body.entry);
                body.entry
            }
            None => {
                self.add_edge(node, node);
                node
            }
        };

        let mut exits = vec![node];
        exits.extend(breaks);
        Placed { entry, exits }
    }

    /// header -> init -> condition -> body -> update -> condition
    fn place_for(
        &mut self,
        statement: &'a Statement,
        init: Option<&'a Expression>,
        condition: Option<&'a Expression>,
        update: Option<&'a Expression>,
        body: &'a Block,
    ) -> Placed {
        let header = self.add_statement_node(statement);
        let init = init.map(|init| self.add_node(NodeStatement::Expression(init)));
        let condition =
            condition.map(|condition| self.add_node(NodeStatement::Expression(condition)));
        let (body, breaks) = self.with_break_frame(|builder| builder.place_block(body));
        let update = update.map(|update| self.add_node(NodeStatement::Expression(update)));

        let mut before_loop = header;
        if let Some(init) = init {
            self.add_edge(header, init);
            before_loop = init;
        }

        let mut cycle: Vec<Placed> = Vec::new();
        cycle.extend(condition.map(Placed::single));
        cycle.extend(body);
        cycle.extend(update.map(Placed::single));

        // without any clause or body the loop spins on whatever precedes it
        let top = cycle.first().map_or(before_loop, |part| part.entry);
        self.add_edge(before_loop, top);

        let mut tail: Option<Vec<NodeId>> = None;
        for part in cycle {
            if let Some(previous) = tail {
                self.connect(&previous, part.entry);
            }
            tail = Some(part.exits);
        }
        if let Some(last) = tail {
            self.connect(&last, top);
        }

        let first_executed = init.unwrap_or(top);
        if first_executed != header {
            self.nodes[header].composite_entry = Some(first_executed);
        }

        // no condition means the loop is only left through a break
        let mut exits: Vec<NodeId> = condition.into_iter().collect();
        exits.extend(breaks);
        Placed {
            entry: header,
            exits,
        }
    }

    /// Every case is its own branch off the switch node; breaks and case ends meet at a join
    fn place_switch(&mut self, statement: &'a Statement, cases: &'a [Case]) -> Placed {
        let node = self.add_statement_node(statement);
        let join = self.add_node(NodeStatement::Join);
        self.nodes[node].composite_exit = Some(join);

        let ((), breaks) = self.with_break_frame(|builder| {
            for case in cases {
                match builder.place_block(&case.body) {
                    Some(body) => {
                        builder.add_edge(node, body.entry);
                        builder.connect(&body.exits, join);
                    }
                    None => builder.add_edge(node, join),
                }
            }
        });
        self.connect(&breaks, join);

        if cases.is_empty() {
            self.add_edge(node, join);
        }

        Placed {
            entry: node,
            exits: vec![join],
        }
    }

    fn place_break(&mut self, statement: &'a Statement) -> Placed {
        let node = self.add_statement_node(statement);
        match self.break_frames.last_mut() {
            Some(frame) => frame.push(node),
            None => self.warn(CfgWarning::BreakOutsideLoopOrSwitch { node }),
        }
        // the frame edge is added by the enclosing construct; sequential flow still continues
        Placed::single(node)
    }

    fn place_label(&mut self, statement: &'a Statement, name: &str) -> Placed {
        let node = self.add_statement_node(statement);
        // a redefined label takes over, gotos resolve to the latest definition
        if let Some(first) = self.labels.insert(name.to_string(), node) {
            self.warn(CfgWarning::DuplicateLabel {
                label: name.to_string(),
                first,
                duplicate: node,
            });
        }
        Placed::single(node)
    }

    // runs once every label has been seen, so forward gotos resolve too
    fn resolve_gotos(&mut self) {
        for (goto, label) in std::mem::take(&mut self.pending_gotos) {
            match self.labels.get(label) {
                Some(&target) => self.add_edge(goto, target),
                None => self.warn(CfgWarning::UnresolvedLabel {
                    label: label.to_string(),
                    goto,
                }),
            }
        }
    }
}
