//! Typed intermediate representation produced from the syntax tree.
//!
//! The node set is closed: every statement and expression the language can
//! express is one variant of [`Statement`] or [`Expression`]. Struct
//! definitions never appear here; they only leave a symbol behind.

use std::fmt::Display;

use indexmap::IndexMap;
use serde::Serialize;

#[cfg(test)]
mod tests;

pub const ATTRIBUTE_DIMENSIONS: &str = "dimensions";
pub const ATTRIBUTE_FIELDS: &str = "fields";
pub const ATTRIBUTE_PARAMS: &str = "params";

pub type Attributes = IndexMap<String, AttributeValue>;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Dimensions(Vec<u64>),
    // field name to field type, in declaration order
    Fields(IndexMap<String, String>),
    Params(Vec<Variable>),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Program {
    pub declarations: Vec<Declaration>,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Function(function) => Some(function),
            Declaration::Variable(_) => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Declaration {
    Function(Function),
    Variable(Variable),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Function(function) => &function.name,
            Self::Variable(variable) => &variable.name,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Function {
    pub return_type: String,
    pub name: String,
    pub params: Vec<Variable>,
    pub body: Block,
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Variable {
    pub name: String,
    pub type_spec: Option<String>,
    pub attributes: Attributes,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            type_spec: None,
            attributes: Attributes::new(),
        }
    }

    pub fn typed(name: impl Into<String>, type_spec: impl Into<String>) -> Self {
        Variable {
            type_spec: Some(type_spec.into()),
            ..Self::new(name)
        }
    }

    pub fn dimensions(&self) -> Option<&[u64]> {
        match self.attributes.get(ATTRIBUTE_DIMENSIONS) {
            Some(AttributeValue::Dimensions(dimensions)) => Some(dimensions),
            _ => None,
        }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(type_spec) = &self.type_spec {
            write!(f, "{} ", type_spec)?;
        }
        write!(f, "{}", self.name)?;
        for dimension in self.dimensions().unwrap_or_default() {
            write!(f, "[{}]", dimension)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Block { statements }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// One arm of a switch; a `None` value is the `default` arm
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Case {
    pub value: Option<Literal>,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Statement {
    Variable(Variable),
    Expression(Expression),
    If {
        condition: Expression,
        then_branch: Block,
        else_branch: Option<Block>,
    },
    While {
        condition: Expression,
        body: Block,
    },
    DoWhile {
        body: Block,
        condition: Expression,
    },
    For {
        init: Option<Expression>,
        condition: Option<Expression>,
        update: Option<Expression>,
        body: Block,
    },
    Switch {
        expr: Expression,
        cases: Vec<Case>,
    },
    Break,
    Goto {
        label: String,
    },
    Label {
        name: String,
    },
    Return {
        value: Option<Expression>,
    },
    Block(Block),
}

// statements render as their header only, bodies are left to whoever walks them
impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Variable(variable) => write!(f, "{}", variable),
            Self::Expression(expression) => write!(f, "{}", expression),
            Self::If { condition, .. } => write!(f, "if ({})", condition),
            Self::While { condition, .. } => write!(f, "while ({})", condition),
            Self::DoWhile { condition, .. } => write!(f, "do while ({})", condition),
            Self::For {
                init,
                condition,
                update,
                ..
            } => {
                let clause = |clause: &Option<Expression>| {
                    clause
                        .as_ref()
                        .map(|expression| expression.to_string())
                        .unwrap_or_default()
                };
                write!(
                    f,
                    "for ({}; {}; {})",
                    clause(init),
                    clause(condition),
                    clause(update)
                )
            }
            Self::Switch { expr, .. } => write!(f, "switch ({})", expr),
            Self::Break => write!(f, "break"),
            Self::Goto { label } => write!(f, "goto {}", label),
            Self::Label { name } => write!(f, "{}:", name),
            Self::Return { value } => match value {
                Some(value) => write!(f, "return {}", value),
                None => write!(f, "return"),
            },
            Self::Block(block) => write!(f, "{{ {} statements }}", block.statements.len()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
    LogicalAnd,
    LogicalOr,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Self::Add,
            "-" => Self::Subtract,
            "*" => Self::Multiply,
            "/" => Self::Divide,
            "%" => Self::Modulo,
            "<" => Self::LessThan,
            ">" => Self::GreaterThan,
            "<=" => Self::LessThanOrEqual,
            ">=" => Self::GreaterThanOrEqual,
            "==" => Self::Equal,
            "!=" => Self::NotEqual,
            "&&" => Self::LogicalAnd,
            "||" => Self::LogicalOr,
            _ => return None,
        })
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThanOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    Increment,
    Decrement,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "++" => Some(Self::Increment),
            "--" => Some(Self::Decrement),
            _ => None,
        }
    }
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increment => write!(f, "++"),
            Self::Decrement => write!(f, "--"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // {:?} keeps the fractional part so 5 prints as 5.0
            Self::Number(value) => write!(f, "{:?}", value),
            Self::String(text) => write!(f, "\"{}\"", text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expression {
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
        is_postfix: bool,
    },
    Assignment {
        target: Box<Expression>,
        value: Box<Expression>,
    },
    FunctionCall {
        name: String,
        args: Vec<Expression>,
    },
    Literal(Literal),
    Identifier(String),
    FieldAccess {
        base: Box<Expression>,
        field: String,
    },
    ArrayAccess {
        base: Box<Expression>,
        index: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assignment(target: Expression, value: Expression) -> Self {
        Self::Assignment {
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    pub fn number(value: f64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    // operands that bind looser than a binary operator get parenthesized
    fn fmt_operand(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BinaryOp { .. } | Self::Assignment { .. } => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BinaryOp { op, left, right } => {
                left.fmt_operand(f)?;
                write!(f, " {} ", op)?;
                right.fmt_operand(f)
            }
            Self::UnaryOp {
                op,
                operand,
                is_postfix,
            } => {
                if *is_postfix {
                    write!(f, "{}{}", operand, op)
                } else {
                    write!(f, "{}{}", op, operand)
                }
            }
            Self::Assignment { target, value } => write!(f, "{} = {}", target, value),
            Self::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Self::Literal(literal) => write!(f, "{}", literal),
            Self::Identifier(name) => write!(f, "{}", name),
            Self::FieldAccess { base, field } => write!(f, "{}.{}", base, field),
            Self::ArrayAccess { base, index } => write!(f, "{}[{}]", base, index),
        }
    }
}
