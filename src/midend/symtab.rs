use indexmap::IndexMap;
use serde::Serialize;

use crate::trace;

mod errors;
mod symbol;
#[cfg(test)]
mod tests;

pub use errors::SymbolError;
pub use symbol::{Symbol, STRUCT_KIND};

/// The bindings of a single scope, in definition order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, symbol: Symbol) -> Result<(), SymbolError> {
        if let Some(existing) = self.symbols.get(&symbol.name) {
            return Err(SymbolError::duplicate(existing));
        }

        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Stack of nested scopes. Index 0 is the global scope and is never popped;
/// the last table is the current scope. Each table's parent is the one below
/// it, so lookups walk the stack from the top down.
#[derive(Debug, Serialize)]
pub struct ScopedSymbolTableManager {
    scopes: Vec<SymbolTable>,
}

impl Default for ScopedSymbolTableManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopedSymbolTableManager {
    pub fn new() -> Self {
        ScopedSymbolTableManager {
            scopes: vec![SymbolTable::new()],
        }
    }

    pub fn define(&mut self, symbol: Symbol) -> Result<(), SymbolError> {
        trace::trace!(
            "define {} at scope depth {}",
            symbol,
            self.scopes.len() - 1
        );
        self.current_mut().define(symbol)
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(SymbolTable::new());
        trace::trace!("push scope, depth now {}", self.scopes.len() - 1);
    }

    /// Discard the current scope and everything defined in it
    pub fn pop_scope(&mut self) -> Result<SymbolTable, SymbolError> {
        if self.scopes.len() == 1 {
            return Err(SymbolError::ScopeUnderflow);
        }

        let popped = self.scopes.pop().ok_or(SymbolError::ScopeUnderflow)?;
        trace::trace!(
            "pop scope with {} symbols, depth now {}",
            popped.len(),
            self.scopes.len() - 1
        );
        Ok(popped)
    }

    /// 0 when only the global scope is live
    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn current(&self) -> &SymbolTable {
        // the global scope is never popped, so the stack is never empty
        &self.scopes[self.scopes.len() - 1]
    }

    fn current_mut(&mut self) -> &mut SymbolTable {
        let top = self.scopes.len() - 1;
        &mut self.scopes[top]
    }

    pub fn global(&self) -> &SymbolTable {
        &self.scopes[0]
    }

    pub fn into_global(mut self) -> SymbolTable {
        self.scopes.swap_remove(0)
    }
}
