use crate::{
    frontend::{
        parser::Parser,
        sourceloc::SourceLoc,
        syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
    },
    midend::{
        ir::*,
        ir_builder::{IrBuilder, IrError},
        symtab::{SymbolError, STRUCT_KIND},
    },
};

fn build(source: &str) -> Result<(Program, IrBuilder), IrError> {
    let tree = Parser::from_string(source).parse().unwrap();
    let mut builder = IrBuilder::new();
    let program = builder.build_program(&tree)?;
    Ok((program, builder))
}

fn only_function(program: &Program) -> &Function {
    let functions: Vec<&Function> = program.functions().collect();
    assert_eq!(functions.len(), 1);
    functions[0]
}

fn body_lines(function: &Function) -> Vec<String> {
    function
        .body
        .statements
        .iter()
        .map(|statement| statement.to_string())
        .collect()
}

#[test]
fn for_loop_function() {
    let (program, _) =
        build("int main(){ int x; int i; for(i=0;i<5;i++){x=i;} return x; }").unwrap();
    let main = only_function(&program);

    assert_eq!(main.return_type, "int");
    assert_eq!(main.name, "main");
    assert!(main.params.is_empty());
    assert_eq!(
        main.body.statements,
        vec![
            Statement::Variable(Variable::typed("x", "int")),
            Statement::Variable(Variable::typed("i", "int")),
            Statement::For {
                init: Some(Expression::assignment(
                    Expression::identifier("i"),
                    Expression::number(0.0)
                )),
                condition: Some(Expression::binary(
                    BinaryOperator::LessThan,
                    Expression::identifier("i"),
                    Expression::number(5.0)
                )),
                update: Some(Expression::UnaryOp {
                    op: UnaryOperator::Increment,
                    operand: Box::new(Expression::identifier("i")),
                    is_postfix: true,
                }),
                body: Block::new(vec![Statement::Expression(Expression::assignment(
                    Expression::identifier("x"),
                    Expression::identifier("i")
                ))]),
            },
            Statement::Return {
                value: Some(Expression::identifier("x"))
            },
        ]
    );
}

#[test]
fn binary_chains_fold_left() {
    let (program, _) = build("void f() { r = a - b - c; r = a + b * c - d; }").unwrap();
    assert_eq!(
        body_lines(only_function(&program)),
        vec!["r = (a - b) - c", "r = (a + (b * c)) - d"]
    );
}

#[test]
fn unary_prefix_and_postfix() {
    let (program, _) = build("void f() { ++i; j--; }").unwrap();
    let statements = &only_function(&program).body.statements;

    assert!(matches!(
        &statements[0],
        Statement::Expression(Expression::UnaryOp {
            op: UnaryOperator::Increment,
            is_postfix: false,
            ..
        })
    ));
    assert!(matches!(
        &statements[1],
        Statement::Expression(Expression::UnaryOp {
            op: UnaryOperator::Decrement,
            is_postfix: true,
            ..
        })
    ));
}

#[test]
fn literals_and_accesses() {
    let (program, _) = build("void f() { s = \"hello\"; x = v.y + m[2]; call(1, -2.5); }").unwrap();
    let statements = &only_function(&program).body.statements;

    assert_eq!(
        statements[0],
        Statement::Expression(Expression::assignment(
            Expression::identifier("s"),
            Expression::Literal(Literal::String("hello".into()))
        ))
    );
    assert_eq!(statements[1].to_string(), "x = v.y + m[2.0]");
    assert_eq!(statements[2].to_string(), "call(1.0, -2.5)");
}

#[test]
fn non_block_bodies_are_wrapped() {
    let (program, _) = build("void f() { if (a) b = 1; while (c) d++; }").unwrap();
    let statements = &only_function(&program).body.statements;

    match &statements[0] {
        Statement::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.statements.len(), 1);
            assert!(else_branch.is_none());
        }
        other => panic!("expected if, got {}", other),
    }
    match &statements[1] {
        Statement::While { body, .. } => assert_eq!(body.statements.len(), 1),
        other => panic!("expected while, got {}", other),
    }
}

#[test]
fn nested_blocks_stay_nested() {
    let (program, _) = build("void f() { int x; { int x; x = 1; } }").unwrap();
    let statements = &only_function(&program).body.statements;

    assert_eq!(statements.len(), 2);
    assert!(matches!(&statements[1], Statement::Block(inner) if inner.statements.len() == 2));
}

#[test]
fn duplicate_local_is_fatal() {
    let err = build("int f() { int x; int x; return x; }").unwrap_err();
    assert!(matches!(
        err,
        IrError::Symbol(SymbolError::DuplicateSymbol { ref name, .. }) if name == "x"
    ));
}

#[test]
fn parameters_share_the_body_scope() {
    let err = build("int f(int a) { int a; return a; }").unwrap_err();
    assert!(matches!(
        err,
        IrError::Symbol(SymbolError::DuplicateSymbol { ref name, .. }) if name == "a"
    ));

    // a nested block may shadow a parameter
    assert!(build("int f(int a) { { int a; } return a; }").is_ok());
}

#[test]
fn locals_of_different_functions_do_not_collide() {
    let (program, builder) = build("void f() { int x; } void g(int x) { int y; }").unwrap();
    assert_eq!(program.functions().count(), 2);

    let globals = builder.symbol_table().global();
    let names: Vec<&str> = globals.symbols().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["f", "g"]);
    assert_eq!(builder.symbol_table().depth(), 0);
}

#[test]
fn duplicate_function_is_fatal() {
    assert!(matches!(
        build("void f() { } int f() { return 1; }"),
        Err(IrError::Symbol(SymbolError::DuplicateSymbol { .. }))
    ));
}

#[test]
fn globals_and_function_symbols() {
    let (program, builder) = build("int g; int m[2][3]; int add(int a, float b) { return a; }").unwrap();

    let names: Vec<&str> = program.declarations.iter().map(Declaration::name).collect();
    assert_eq!(names, vec!["g", "m", "add"]);
    match &program.declarations[1] {
        Declaration::Variable(matrix) => {
            assert_eq!(matrix.type_spec.as_deref(), Some("int"));
            assert_eq!(matrix.dimensions(), Some(&[2u64, 3][..]));
        }
        other => panic!("expected a global, got {:?}", other),
    }

    let symtab = builder.symbol_table();
    let matrix = symtab.lookup("m").unwrap();
    assert_eq!(matrix.kind, "int");
    assert_eq!(
        matrix.attributes.get(ATTRIBUTE_DIMENSIONS),
        Some(&AttributeValue::Dimensions(vec![2, 3]))
    );

    let add = symtab.lookup("add").unwrap();
    assert_eq!(add.kind, "int");
    assert_eq!(
        add.attributes.get(ATTRIBUTE_PARAMS),
        Some(&AttributeValue::Params(vec![
            Variable::typed("a", "int"),
            Variable::typed("b", "float")
        ]))
    );
    // parameters were popped with the function scope
    assert!(symtab.lookup("a").is_none());
}

#[test]
fn structs_only_leave_a_symbol() {
    let (program, builder) =
        build("struct Point { int x; float y; }; struct Point p; void f() { }").unwrap();

    let names: Vec<&str> = program.declarations.iter().map(Declaration::name).collect();
    assert_eq!(names, vec!["p", "f"]);

    let symtab = builder.symbol_table();
    let point = symtab.lookup("Point").unwrap();
    assert_eq!(point.kind, STRUCT_KIND);
    match point.attributes.get(ATTRIBUTE_FIELDS) {
        Some(AttributeValue::Fields(fields)) => {
            let fields: Vec<(&str, &str)> = fields
                .iter()
                .map(|(name, type_spec)| (name.as_str(), type_spec.as_str()))
                .collect();
            assert_eq!(fields, vec![("x", "int"), ("y", "float")]);
        }
        other => panic!("expected fields, got {:?}", other),
    }
    assert_eq!(symtab.lookup("p").map(|s| s.kind.as_str()), Some("struct Point"));
}

#[test]
fn switch_labels_and_gotos() {
    let (program, _) = build(
        "void f() { switch (x) { case 1: y = 1; break; case \"a\": default: y = 2; } top: goto top; }",
    )
    .unwrap();
    let statements = &only_function(&program).body.statements;

    match &statements[0] {
        Statement::Switch { expr, cases } => {
            assert_eq!(expr, &Expression::identifier("x"));
            let values: Vec<Option<Literal>> = cases.iter().map(|c| c.value.clone()).collect();
            assert_eq!(
                values,
                vec![
                    Some(Literal::Number(1.0)),
                    Some(Literal::String("a".into())),
                    None
                ]
            );
            assert_eq!(cases[0].body.statements.len(), 2);
            assert!(cases[1].body.is_empty());
        }
        other => panic!("expected switch, got {}", other),
    }
    assert_eq!(
        statements[1..],
        [
            Statement::Label { name: "top".into() },
            Statement::Goto {
                label: "top".into()
            }
        ]
    );
}

fn token(kind: TokenKind, text: &str) -> SyntaxNode {
    SyntaxNode::token(kind, text, SourceLoc::none())
}

fn tree(rule: Rule, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::tree(rule, SourceLoc::none(), children)
}

#[test]
fn empty_type_specifier_is_malformed() {
    let program = SyntaxTree::new(
        Rule::Program,
        SourceLoc::none(),
        vec![tree(
            Rule::Declaration,
            vec![
                tree(Rule::TypeSpecifier, vec![]),
                tree(
                    Rule::DeclaratorList,
                    vec![tree(Rule::Declarator, vec![token(TokenKind::Ident, "x")])],
                ),
            ],
        )],
    );

    assert!(matches!(
        IrBuilder::new().build_program(&program),
        Err(IrError::MalformedType(_))
    ));
}

#[test]
fn bad_numbers() {
    let statement = |number: &str| {
        SyntaxTree::new(
            Rule::Start,
            SourceLoc::none(),
            vec![tree(
                Rule::Program,
                vec![tree(
                    Rule::Declaration,
                    vec![
                        tree(Rule::TypeSpecifier, vec![token(TokenKind::TypeName, "int")]),
                        tree(
                            Rule::Declarator,
                            vec![
                                token(TokenKind::Ident, "m"),
                                token(TokenKind::Number, number),
                            ],
                        ),
                    ],
                )],
            )],
        )
    };

    assert!(IrBuilder::new().build_program(&statement("4")).is_ok());
    assert!(matches!(
        IrBuilder::new().build_program(&statement("2.5")),
        Err(IrError::InvalidDimension { ref text, .. }) if text == "2.5"
    ));
}

#[test]
fn reduces_a_tree_from_json() {
    let json = r#"{
        "rule": "program",
        "children": [
            { "tree": { "rule": "function_def", "children": [
                { "tree": { "rule": "type_specifier", "children": [
                    { "token": { "kind": "type_name", "text": "void" } }
                ] } },
                { "token": { "kind": "ident", "text": "f" } },
                { "token": { "kind": "l_paren", "text": "(" } },
                { "token": { "kind": "r_paren", "text": ")" } },
                { "tree": { "rule": "compound_stmt", "children": [
                    { "tree": { "rule": "return_stmt", "children": [] } }
                ] } }
            ] } }
        ]
    }"#;

    let tree: SyntaxTree = serde_json::from_str(json).unwrap();
    let program = IrBuilder::new().build_program(&tree).unwrap();
    let f = only_function(&program);
    assert_eq!(f.to_string(), "void f()");
    assert_eq!(f.body.statements, vec![Statement::Return { value: None }]);
}

#[test]
fn statements_outside_functions_are_rejected() {
    let program = SyntaxTree::new(
        Rule::Program,
        SourceLoc::none(),
        vec![tree(Rule::BreakStmt, vec![])],
    );
    assert!(matches!(
        IrBuilder::new().build_program(&program),
        Err(IrError::MalformedTree {
            rule: Rule::Program,
            ..
        })
    ));
}
