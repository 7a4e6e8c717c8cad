use crate::midend::symtab::Symbol;

#[derive(Clone, PartialEq)]
pub enum SymbolError {
    DuplicateSymbol { name: String, existing: Symbol },
    ScopeUnderflow,
}

impl std::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateSymbol { name, existing } => write!(
                f,
                "Symbol '{}' already defined in this scope (as {})",
                name, existing.kind
            ),
            Self::ScopeUnderflow => write!(f, "Can't pop the global scope"),
        }
    }
}

impl std::fmt::Debug for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl SymbolError {
    pub fn duplicate(existing: &Symbol) -> Self {
        Self::DuplicateSymbol {
            name: existing.name.clone(),
            existing: existing.clone(),
        }
    }
}
