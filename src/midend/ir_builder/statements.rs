use crate::{
    frontend::syntax_tree::{Rule, SyntaxNode, SyntaxTree},
    midend::ir::{Block, Case, Expression, Literal, Statement},
};

use super::{IrBuilder, IrError, Reduced};

// if_stmt: [LParen, cond, RParen, then, else?]
const IF_CONDITION: usize = 1;
const IF_THEN: usize = 3;
const IF_ELSE: usize = 4;

// while_stmt: [LParen, cond, RParen, body]
const WHILE_CONDITION: usize = 1;
const WHILE_BODY: usize = 3;

// do_while_stmt: [body, LParen, cond, RParen]
const DO_WHILE_BODY: usize = 0;
const DO_WHILE_CONDITION: usize = 2;

// for_stmt: [LParen, for_init, for_cond, for_update, RParen, body]
const FOR_INIT: usize = 1;
const FOR_CONDITION: usize = 2;
const FOR_UPDATE: usize = 3;
const FOR_BODY: usize = 5;

// switch_stmt: [LParen, expr, RParen, LBrace, clause*, RBrace]
const SWITCH_EXPR: usize = 1;
const SWITCH_FIRST_CLAUSE: usize = 4;

// case_clause: [value, Colon, stmt*]; default_clause: [Colon, stmt*]
const CASE_VALUE: usize = 0;
const CASE_BODY: usize = 2;
const DEFAULT_BODY: usize = 1;

// labeled_stmt: [Ident, Colon, stmt]
const LABEL_NAME: usize = 0;
const LABELED_STATEMENT: usize = 2;

impl IrBuilder {
    pub(super) fn reduce_compound_statement(
        &mut self,
        tree: &SyntaxTree,
    ) -> Result<Reduced, IrError> {
        self.symtab.push_scope();
        let block = self.reduce_block_items(tree);
        self.symtab.pop_scope()?;

        Ok(Reduced::Statement(Statement::Block(block?)))
    }

    /// Reduce every child into the current scope and flatten the results
    pub(super) fn reduce_block_items(&mut self, tree: &SyntaxTree) -> Result<Block, IrError> {
        self.reduce_statements_from(tree, 0)
    }

    fn reduce_statements_from(
        &mut self,
        tree: &SyntaxTree,
        first: usize,
    ) -> Result<Block, IrError> {
        let mut statements = Vec::new();
        for child in tree.children.iter().skip(first) {
            statements.extend(self.reduce(child)?.into_statements(tree)?);
        }
        Ok(Block::new(statements))
    }

    pub(super) fn reduce_expression_statement(
        &mut self,
        tree: &SyntaxTree,
    ) -> Result<Reduced, IrError> {
        let expression = self.child_expression(tree, 0)?;
        Ok(Reduced::Statement(Statement::Expression(expression)))
    }

    fn child_block(&mut self, tree: &SyntaxTree, index: usize) -> Result<Block, IrError> {
        self.reduce_child(tree, index)?.into_block(tree)
    }

    pub(super) fn reduce_if(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let condition = self.child_expression(tree, IF_CONDITION)?;
        let then_branch = self.child_block(tree, IF_THEN)?;
        let else_branch = if tree.children.len() > IF_ELSE {
            Some(self.child_block(tree, IF_ELSE)?)
        } else {
            None
        };

        Ok(Reduced::Statement(Statement::If {
            condition,
            then_branch,
            else_branch,
        }))
    }

    pub(super) fn reduce_while(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let condition = self.child_expression(tree, WHILE_CONDITION)?;
        let body = self.child_block(tree, WHILE_BODY)?;
        Ok(Reduced::Statement(Statement::While { condition, body }))
    }

    pub(super) fn reduce_do_while(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let body = self.child_block(tree, DO_WHILE_BODY)?;
        let condition = self.child_expression(tree, DO_WHILE_CONDITION)?;
        Ok(Reduced::Statement(Statement::DoWhile { body, condition }))
    }

    pub(super) fn reduce_for(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let init = self.child_clause(tree, FOR_INIT)?;
        let condition = self.child_clause(tree, FOR_CONDITION)?;
        let update = self.child_clause(tree, FOR_UPDATE)?;
        let body = self.child_block(tree, FOR_BODY)?;

        Ok(Reduced::Statement(Statement::For {
            init,
            condition,
            update,
            body,
        }))
    }

    fn child_clause(
        &mut self,
        tree: &SyntaxTree,
        index: usize,
    ) -> Result<Option<Expression>, IrError> {
        self.reduce_child(tree, index)?
            .into_optional_expression(tree)
    }

    // for_init, for_cond, for_update: [] or [expr]
    pub(super) fn reduce_for_clause(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        match tree.children.first() {
            None => Ok(Reduced::Absent),
            Some(expression) => self.reduce(expression),
        }
    }

    /// Case bodies share one scope, the switch's braces
    pub(super) fn reduce_switch(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let expr = self.child_expression(tree, SWITCH_EXPR)?;

        self.symtab.push_scope();
        let cases = self.reduce_cases(tree);
        self.symtab.pop_scope()?;

        Ok(Reduced::Statement(Statement::Switch { expr, cases: cases? }))
    }

    fn reduce_cases(&mut self, tree: &SyntaxTree) -> Result<Vec<Case>, IrError> {
        let mut cases = Vec::new();
        for child in tree.children.iter().skip(SWITCH_FIRST_CLAUSE) {
            // the closing brace
            if let SyntaxNode::Token(_) = child {
                continue;
            }

            match self.reduce(child)? {
                Reduced::Case(case) => cases.push(case),
                other => return Err(other.mismatch(tree, "a case clause")),
            }
        }
        Ok(cases)
    }

    pub(super) fn reduce_case(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let case = match tree.rule {
            Rule::DefaultClause => Case {
                value: None,
                body: self.reduce_statements_from(tree, DEFAULT_BODY)?,
            },
            _ => Case {
                value: Some(self.case_value(tree)?),
                body: self.reduce_statements_from(tree, CASE_BODY)?,
            },
        };

        Ok(Reduced::Case(case))
    }

    fn case_value(&mut self, tree: &SyntaxTree) -> Result<Literal, IrError> {
        match self.reduce_child(tree, CASE_VALUE)? {
            Reduced::Token(token) => Self::token_literal(tree, token),
            Reduced::Expression(Expression::Literal(literal)) => Ok(literal),
            other => Err(other.mismatch(tree, "a literal case value")),
        }
    }

    pub(super) fn reduce_break(&mut self, _tree: &SyntaxTree) -> Result<Reduced, IrError> {
        Ok(Reduced::Statement(Statement::Break))
    }

    pub(super) fn reduce_goto(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let label = Self::child_ident(tree, 0)?;
        Ok(Reduced::Statement(Statement::Goto { label }))
    }

    /// A labeled statement becomes the label followed by the statement itself
    pub(super) fn reduce_labeled(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let name = Self::child_ident(tree, LABEL_NAME)?;
        let mut statements = vec![Statement::Label { name }];
        statements.extend(
            self.reduce_child(tree, LABELED_STATEMENT)?
                .into_statements(tree)?,
        );
        Ok(Reduced::Statements(statements))
    }

    pub(super) fn reduce_return(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let value = match tree.children.first() {
            Some(value) => Some(self.reduce(value)?.into_expression(tree)?),
            None => None,
        };
        Ok(Reduced::Statement(Statement::Return { value }))
    }
}
