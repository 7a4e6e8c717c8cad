//! Reduction of the generic syntax tree into the typed IR.
//!
//! Reduction is bottom-up: a rule's children are reduced first and the rule
//! combines their results. The two exceptions are `function_def` and
//! `compound_stmt`, which open a scope before their children are visited so
//! that declarations land in the scope they lexically belong to.

use crate::{
    frontend::syntax_tree::{Rule, SyntaxNode, SyntaxTree, Token, TokenKind},
    midend::{
        ir::{Expression, Program},
        symtab::ScopedSymbolTableManager,
    },
    trace,
};

mod declarations;
mod errors;
mod expressions;
mod reduced;
mod statements;
#[cfg(test)]
mod tests;

pub use errors::IrError;
use reduced::Reduced;

#[derive(Debug)]
pub struct IrBuilder {
    symtab: ScopedSymbolTableManager,
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IrBuilder {
    pub fn new() -> Self {
        IrBuilder {
            symtab: ScopedSymbolTableManager::new(),
        }
    }

    pub fn symbol_table(&self) -> &ScopedSymbolTableManager {
        &self.symtab
    }

    pub fn into_symbol_table(self) -> ScopedSymbolTableManager {
        self.symtab
    }

    /// Reduce a `start` or `program` tree into a [`Program`]
    pub fn build_program(&mut self, tree: &SyntaxTree) -> Result<Program, IrError> {
        let _span = trace::span_auto!(trace::Level::DEBUG, "Build IR");

        match self.reduce_tree(tree)? {
            Reduced::Program(program) => {
                trace::debug!(
                    "Built program with {} top-level declarations, {} global symbols",
                    program.declarations.len(),
                    self.symtab.global().len()
                );
                Ok(program)
            }
            other => Err(other.mismatch(tree, "a program")),
        }
    }

    fn reduce(&mut self, node: &SyntaxNode) -> Result<Reduced, IrError> {
        match node {
            SyntaxNode::Token(token) => Ok(Reduced::Token(token.clone())),
            SyntaxNode::Tree(tree) => self.reduce_tree(tree),
        }
    }

    fn reduce_tree(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        trace::trace!("reduce {} at {}", tree.rule, tree.loc);

        match tree.rule {
            Rule::Start | Rule::Stmt | Rule::Expr => self.reduce_pass_through(tree),
            Rule::Program => self.reduce_program(tree),
            Rule::StructDef => self.reduce_struct_definition(tree),
            Rule::StructBody => self.reduce_struct_body(tree),
            Rule::StructType | Rule::TypeSpecifier => self.reduce_type_specifier(tree),
            Rule::Declaration => self.reduce_declaration(tree),
            Rule::DeclaratorList | Rule::ParamList => self.reduce_variable_list(tree),
            Rule::Declarator => self.reduce_declarator(tree),
            Rule::FunctionDef => self.reduce_function_definition(tree),
            Rule::Param => self.reduce_param(tree),
            Rule::CompoundStmt => self.reduce_compound_statement(tree),
            Rule::ExprStmt => self.reduce_expression_statement(tree),
            Rule::Assignment => self.reduce_assignment(tree),
            Rule::LogicOr
            | Rule::LogicAnd
            | Rule::Equality
            | Rule::Relational
            | Rule::Add
            | Rule::Mul => self.reduce_chain(tree),
            Rule::Unary => self.reduce_unary(tree),
            Rule::Primary => self.reduce_primary(tree),
            Rule::FieldAccess => self.reduce_field_access(tree),
            Rule::ArrayAccess => self.reduce_array_access(tree),
            Rule::FuncCall => self.reduce_function_call(tree),
            Rule::ArgList => self.reduce_arguments(tree),
            Rule::IfStmt => self.reduce_if(tree),
            Rule::WhileStmt => self.reduce_while(tree),
            Rule::DoWhileStmt => self.reduce_do_while(tree),
            Rule::ForStmt => self.reduce_for(tree),
            Rule::ForInit | Rule::ForCond | Rule::ForUpdate => self.reduce_for_clause(tree),
            Rule::SwitchStmt => self.reduce_switch(tree),
            Rule::CaseClause | Rule::DefaultClause => self.reduce_case(tree),
            Rule::BreakStmt => self.reduce_break(tree),
            Rule::GotoStmt => self.reduce_goto(tree),
            Rule::LabeledStmt => self.reduce_labeled(tree),
            Rule::ReturnStmt => self.reduce_return(tree),
        }
    }

    fn reduce_pass_through(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        match tree.children.as_slice() {
            [only] => self.reduce(only),
            children => Err(IrError::malformed(
                tree.rule,
                tree.loc,
                format!("expected exactly one child, found {}", children.len()),
            )),
        }
    }
}

// positional access to children
impl IrBuilder {
    fn child<'t>(tree: &'t SyntaxTree, index: usize) -> Result<&'t SyntaxNode, IrError> {
        tree.children.get(index).ok_or_else(|| {
            IrError::malformed(
                tree.rule,
                tree.loc,
                format!(
                    "missing child {} (has {} children)",
                    index,
                    tree.children.len()
                ),
            )
        })
    }

    fn child_token(tree: &SyntaxTree, index: usize) -> Result<&Token, IrError> {
        match Self::child(tree, index)? {
            SyntaxNode::Token(token) => Ok(token),
            SyntaxNode::Tree(subtree) => Err(IrError::malformed(
                tree.rule,
                tree.loc,
                format!("expected a token at child {}, found {}", index, subtree.rule),
            )),
        }
    }

    fn child_ident(tree: &SyntaxTree, index: usize) -> Result<String, IrError> {
        let token = Self::child_token(tree, index)?;
        match token.kind {
            TokenKind::Ident => Ok(token.text.clone()),
            kind => Err(IrError::malformed(
                tree.rule,
                tree.loc,
                format!("expected an identifier at child {}, found {:?}", index, kind),
            )),
        }
    }

    fn reduce_child(&mut self, tree: &SyntaxTree, index: usize) -> Result<Reduced, IrError> {
        let child = Self::child(tree, index)?;
        self.reduce(child)
    }

    fn child_expression(&mut self, tree: &SyntaxTree, index: usize) -> Result<Expression, IrError> {
        self.reduce_child(tree, index)?.into_expression(tree)
    }
}
