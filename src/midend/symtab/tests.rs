use crate::midend::{
    ir::{AttributeValue, ATTRIBUTE_DIMENSIONS, ATTRIBUTE_FIELDS},
    symtab::*,
};

#[test]
fn define_and_lookup() {
    let mut table = SymbolTable::new();
    table.define(Symbol::new("x", "int")).unwrap();
    table.define(Symbol::new("y", "float")).unwrap();

    assert_eq!(table.lookup("x"), Some(&Symbol::new("x", "int")));
    assert_eq!(table.lookup("z"), None);

    let names: Vec<&str> = table.symbols().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
}

#[test]
fn duplicate_in_same_scope() {
    let mut manager = ScopedSymbolTableManager::new();
    manager.define(Symbol::new("x", "int")).unwrap();

    assert_eq!(
        manager.define(Symbol::new("x", "float")),
        Err(SymbolError::DuplicateSymbol {
            name: "x".into(),
            existing: Symbol::new("x", "int")
        })
    );
    // the original binding is untouched
    assert_eq!(manager.lookup("x").map(|s| s.kind.as_str()), Some("int"));
}

#[test]
fn shadowing_across_scopes() {
    let mut manager = ScopedSymbolTableManager::new();
    manager.define(Symbol::new("x", "int")).unwrap();

    manager.push_scope();
    manager.define(Symbol::new("x", "char")).unwrap();
    manager.define(Symbol::new("inner", "int")).unwrap();
    assert_eq!(manager.lookup("x").map(|s| s.kind.as_str()), Some("char"));
    assert_eq!(manager.depth(), 1);

    let popped = manager.pop_scope().unwrap();
    assert_eq!(popped.len(), 2);
    assert_eq!(manager.lookup("x").map(|s| s.kind.as_str()), Some("int"));
    assert_eq!(manager.lookup("inner"), None);
}

#[test]
fn outer_definitions_visible_in_later_scopes() {
    let mut manager = ScopedSymbolTableManager::new();
    manager.push_scope();
    manager.define(Symbol::new("a", "int")).unwrap();
    manager.push_scope();
    manager.push_scope();

    assert!(manager.lookup("a").is_some());
    assert!(manager.current().is_empty());
}

#[test]
fn cannot_pop_global_scope() {
    let mut manager = ScopedSymbolTableManager::new();
    assert_eq!(manager.pop_scope(), Err(SymbolError::ScopeUnderflow));

    manager.push_scope();
    assert!(manager.pop_scope().is_ok());
    assert_eq!(manager.pop_scope(), Err(SymbolError::ScopeUnderflow));
}

#[test]
fn symbols_carry_attributes() {
    let matrix = Symbol::new("m", "int").with_attribute(
        ATTRIBUTE_DIMENSIONS,
        AttributeValue::Dimensions(vec![2, 2]),
    );
    let point = Symbol::new("Point", STRUCT_KIND)
        .with_attribute(
            ATTRIBUTE_FIELDS,
            AttributeValue::Fields([("x".to_string(), "int".to_string())].into_iter().collect()),
        );

    let mut manager = ScopedSymbolTableManager::new();
    manager.define(matrix.clone()).unwrap();
    manager.define(point).unwrap();

    assert!(manager.lookup("Point").is_some_and(Symbol::is_struct));
    assert_eq!(manager.into_global().lookup("m"), Some(&matrix));
}

#[test]
fn error_messages() {
    assert_eq!(
        SymbolError::duplicate(&Symbol::new("x", "int")).to_string(),
        "Symbol 'x' already defined in this scope (as int)"
    );
    assert_eq!(
        SymbolError::ScopeUnderflow.to_string(),
        "Can't pop the global scope"
    );
}
