use std::fmt::Display;

use serde::Serialize;

use crate::midend::ir::{AttributeValue, Attributes};

pub const STRUCT_KIND: &str = "struct";

/// A named declaration. `kind` is the declared type, the return type of a
/// function, or `"struct"` for struct definitions, whose `fields` attribute
/// then maps each field name to its type.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: String,
    pub attributes: Attributes,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Symbol {
            name: name.into(),
            kind: kind.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn is_struct(&self) -> bool {
        self.kind == STRUCT_KIND
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}
