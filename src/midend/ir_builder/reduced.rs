use crate::{
    frontend::syntax_tree::{SyntaxTree, Token},
    midend::ir::{Block, Case, Expression, Function, Program, Statement, Variable},
};

use super::IrError;

/// Result of reducing one node; each rule yields the variant its parent expects
pub(super) enum Reduced {
    Token(Token),
    TypeSpecifier(String),
    Declarator(Variable),
    Variables(Vec<Variable>),
    Fields(Vec<(String, String)>),
    Expression(Expression),
    Arguments(Vec<Expression>),
    Statement(Statement),
    Statements(Vec<Statement>),
    Case(Case),
    Function(Function),
    Program(Program),
    // empty optional clauses and struct definitions
    Absent,
}

impl Reduced {
    fn describe(&self) -> &'static str {
        match self {
            Self::Token(_) => "a token",
            Self::TypeSpecifier(_) => "a type specifier",
            Self::Declarator(_) => "a declarator",
            Self::Variables(_) => "a variable list",
            Self::Fields(_) => "a struct body",
            Self::Expression(_) => "an expression",
            Self::Arguments(_) => "an argument list",
            Self::Statement(_) => "a statement",
            Self::Statements(_) => "a statement list",
            Self::Case(_) => "a case clause",
            Self::Function(_) => "a function",
            Self::Program(_) => "a program",
            Self::Absent => "nothing",
        }
    }

    pub fn mismatch(&self, context: &SyntaxTree, expected: &str) -> IrError {
        IrError::malformed(
            context.rule,
            context.loc,
            format!("expected {}, found {}", expected, self.describe()),
        )
    }

    pub fn into_type_specifier(self, context: &SyntaxTree) -> Result<String, IrError> {
        match self {
            Self::TypeSpecifier(type_spec) => Ok(type_spec),
            other => Err(other.mismatch(context, "a type specifier")),
        }
    }

    pub fn into_expression(self, context: &SyntaxTree) -> Result<Expression, IrError> {
        match self {
            Self::Expression(expression) => Ok(expression),
            other => Err(other.mismatch(context, "an expression")),
        }
    }

    pub fn into_optional_expression(
        self,
        context: &SyntaxTree,
    ) -> Result<Option<Expression>, IrError> {
        match self {
            Self::Absent => Ok(None),
            other => other.into_expression(context).map(Some),
        }
    }

    pub fn into_variables(self, context: &SyntaxTree) -> Result<Vec<Variable>, IrError> {
        match self {
            Self::Variables(variables) => Ok(variables),
            Self::Declarator(variable) => Ok(vec![variable]),
            other => Err(other.mismatch(context, "a variable list")),
        }
    }

    /// Flatten anything statement-like into a sequence
    pub fn into_statements(self, context: &SyntaxTree) -> Result<Vec<Statement>, IrError> {
        match self {
            Self::Statement(statement) => Ok(vec![statement]),
            Self::Statements(statements) => Ok(statements),
            Self::Expression(expression) => Ok(vec![Statement::Expression(expression)]),
            Self::Absent => Ok(Vec::new()),
            other => Err(other.mismatch(context, "a statement")),
        }
    }

    /// A braced body stays as is, anything else is wrapped into a block
    pub fn into_block(self, context: &SyntaxTree) -> Result<Block, IrError> {
        match self {
            Self::Statement(Statement::Block(block)) => Ok(block),
            other => Ok(Block::new(other.into_statements(context)?)),
        }
    }
}
