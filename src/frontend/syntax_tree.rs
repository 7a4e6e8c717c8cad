//! The generic syntax tree handed to the IR builder.
//!
//! The tree is deliberately untyped: every interior node is a grammar rule with
//! an ordered child list and every leaf is a token. Any parser that emits this
//! shape (including one speaking JSON through serde) can drive the midend.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::sourceloc::SourceLoc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Start,
    Program,
    StructDef,
    StructBody,
    StructType,
    TypeSpecifier,
    Declaration,
    DeclaratorList,
    Declarator,
    FunctionDef,
    ParamList,
    Param,
    CompoundStmt,
    Stmt,
    ExprStmt,
    Expr,
    Assignment,
    LogicOr,
    LogicAnd,
    Equality,
    Relational,
    Add,
    Mul,
    Unary,
    Primary,
    FieldAccess,
    ArrayAccess,
    FuncCall,
    ArgList,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    ForStmt,
    ForInit,
    ForCond,
    ForUpdate,
    SwitchStmt,
    CaseClause,
    DefaultClause,
    BreakStmt,
    GotoStmt,
    LabeledStmt,
    ReturnStmt,
}

impl Rule {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Program => "program",
            Self::StructDef => "struct_def",
            Self::StructBody => "struct_body",
            Self::StructType => "struct_type",
            Self::TypeSpecifier => "type_specifier",
            Self::Declaration => "declaration",
            Self::DeclaratorList => "declarator_list",
            Self::Declarator => "declarator",
            Self::FunctionDef => "function_def",
            Self::ParamList => "param_list",
            Self::Param => "param",
            Self::CompoundStmt => "compound_stmt",
            Self::Stmt => "stmt",
            Self::ExprStmt => "expr_stmt",
            Self::Expr => "expr",
            Self::Assignment => "assignment",
            Self::LogicOr => "logic_or",
            Self::LogicAnd => "logic_and",
            Self::Equality => "equality",
            Self::Relational => "relational",
            Self::Add => "add",
            Self::Mul => "mul",
            Self::Unary => "unary",
            Self::Primary => "primary",
            Self::FieldAccess => "field_access",
            Self::ArrayAccess => "array_access",
            Self::FuncCall => "func_call",
            Self::ArgList => "arg_list",
            Self::IfStmt => "if_stmt",
            Self::WhileStmt => "while_stmt",
            Self::DoWhileStmt => "do_while_stmt",
            Self::ForStmt => "for_stmt",
            Self::ForInit => "for_init",
            Self::ForCond => "for_cond",
            Self::ForUpdate => "for_update",
            Self::SwitchStmt => "switch_stmt",
            Self::CaseClause => "case_clause",
            Self::DefaultClause => "default_clause",
            Self::BreakStmt => "break_stmt",
            Self::GotoStmt => "goto_stmt",
            Self::LabeledStmt => "labeled_stmt",
            Self::ReturnStmt => "return_stmt",
        }
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lexical category of a leaf, used by the builder to tell literals from names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Ident,
    Number,
    String,
    TypeName,
    Operator,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Colon,
    Comma,
    Dot,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    #[serde(default)]
    pub loc: SourceLoc,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, loc: SourceLoc) -> Self {
        Token {
            kind,
            text: text.into(),
            loc,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxTree {
    pub rule: Rule,
    pub children: Vec<SyntaxNode>,
    #[serde(default)]
    pub loc: SourceLoc,
}

impl SyntaxTree {
    pub fn new(rule: Rule, loc: SourceLoc, children: Vec<SyntaxNode>) -> Self {
        SyntaxTree {
            rule,
            children,
            loc,
        }
    }

    /// Indented rendering of the tree, one rule or token per line
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.pretty_into(&mut out, 0);
        out
    }

    fn pretty_into(&self, out: &mut String, depth: usize) {
        out.push_str(&"  ".repeat(depth));
        out.push_str(self.rule.name());
        out.push('\n');
        for child in &self.children {
            match child {
                SyntaxNode::Tree(tree) => tree.pretty_into(out, depth + 1),
                SyntaxNode::Token(token) => {
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(&token.text);
                    out.push('\n');
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxNode {
    Tree(SyntaxTree),
    Token(Token),
}

impl SyntaxNode {
    pub fn tree(rule: Rule, loc: SourceLoc, children: Vec<SyntaxNode>) -> Self {
        Self::Tree(SyntaxTree::new(rule, loc, children))
    }

    pub fn token(kind: TokenKind, text: impl Into<String>, loc: SourceLoc) -> Self {
        Self::Token(Token::new(kind, text, loc))
    }

    pub fn loc(&self) -> SourceLoc {
        match self {
            Self::Tree(tree) => tree.loc,
            Self::Token(token) => token.loc,
        }
    }
}

impl From<Token> for SyntaxNode {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<SyntaxTree> for SyntaxNode {
    fn from(tree: SyntaxTree) -> Self {
        Self::Tree(tree)
    }
}
