use crate::{
    frontend::{sourceloc::SourceLoc, syntax_tree::Rule},
    midend::symtab::SymbolError,
};

pub enum IrError {
    Symbol(SymbolError),
    MalformedType(SourceLoc),
    MalformedTree {
        rule: Rule,
        loc: SourceLoc,
        detail: String,
    },
    InvalidDimension {
        text: String,
        loc: SourceLoc,
    },
    InvalidNumber {
        text: String,
        loc: SourceLoc,
    },
}

impl std::fmt::Display for IrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(symbol_error) => write!(f, "{}", symbol_error),
            Self::MalformedType(loc) => write!(
                f,
                "Empty type specifier at {} - check the parser output against the grammar",
                loc
            ),
            Self::MalformedTree { rule, loc, detail } => {
                write!(f, "Malformed {} at {}: {}", rule, loc, detail)
            }
            Self::InvalidDimension { text, loc } => {
                write!(f, "Invalid array dimension '{}' at {}", text, loc)
            }
            Self::InvalidNumber { text, loc } => {
                write!(f, "Invalid numeric literal '{}' at {}", text, loc)
            }
        }
    }
}

impl std::fmt::Debug for IrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<SymbolError> for IrError {
    fn from(symbol_error: SymbolError) -> Self {
        Self::Symbol(symbol_error)
    }
}

impl IrError {
    pub fn malformed(rule: Rule, loc: SourceLoc, detail: impl Into<String>) -> Self {
        Self::MalformedTree {
            rule,
            loc,
            detail: detail.into(),
        }
    }
}
