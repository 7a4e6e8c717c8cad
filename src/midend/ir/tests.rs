use crate::midend::ir::*;

fn postfix_increment(name: &str) -> Expression {
    Expression::UnaryOp {
        op: UnaryOperator::Increment,
        operand: Box::new(Expression::identifier(name)),
        is_postfix: true,
    }
}

#[test]
fn expression_rendering() {
    let condition = Expression::binary(
        BinaryOperator::LessThan,
        Expression::identifier("i"),
        Expression::number(5.0),
    );
    assert_eq!(condition.to_string(), "i < 5.0");

    assert_eq!(postfix_increment("i").to_string(), "i++");
    assert_eq!(
        Expression::UnaryOp {
            op: UnaryOperator::Decrement,
            operand: Box::new(Expression::identifier("i")),
            is_postfix: false,
        }
        .to_string(),
        "--i"
    );

    let nested = Expression::binary(
        BinaryOperator::Multiply,
        Expression::binary(
            BinaryOperator::Add,
            Expression::identifier("a"),
            Expression::identifier("b"),
        ),
        Expression::number(2.5),
    );
    assert_eq!(nested.to_string(), "(a + b) * 2.5");

    let call = Expression::FunctionCall {
        name: "add".into(),
        args: vec![
            Expression::FieldAccess {
                base: Box::new(Expression::identifier("v")),
                field: "x".into(),
            },
            Expression::ArrayAccess {
                base: Box::new(Expression::identifier("m")),
                index: Box::new(Expression::number(0.0)),
            },
            Expression::Literal(Literal::String("hi".into())),
        ],
    };
    assert_eq!(call.to_string(), "add(v.x, m[0.0], \"hi\")");
}

#[test]
fn statement_headers() {
    let for_loop = Statement::For {
        init: Some(Expression::assignment(
            Expression::identifier("i"),
            Expression::number(0.0),
        )),
        condition: None,
        update: Some(postfix_increment("i")),
        body: Block::default(),
    };
    assert_eq!(for_loop.to_string(), "for (i = 0.0; ; i++)");

    assert_eq!(Statement::Break.to_string(), "break");
    assert_eq!(
        Statement::Goto {
            label: "out".into()
        }
        .to_string(),
        "goto out"
    );
    assert_eq!(Statement::Label { name: "out".into() }.to_string(), "out:");
    assert_eq!(Statement::Return { value: None }.to_string(), "return");
}

#[test]
fn variables_render_with_dimensions() {
    let mut matrix = Variable::typed("m", "int");
    matrix.attributes.insert(
        ATTRIBUTE_DIMENSIONS.into(),
        AttributeValue::Dimensions(vec![3, 4]),
    );

    assert_eq!(matrix.dimensions(), Some(&[3u64, 4][..]));
    assert_eq!(Statement::Variable(matrix).to_string(), "int m[3][4]");
    assert_eq!(Variable::new("x").to_string(), "x");
}

#[test]
fn program_functions_skip_globals() {
    let program = Program {
        declarations: vec![
            Declaration::Variable(Variable::typed("g", "int")),
            Declaration::Function(Function {
                return_type: "void".into(),
                name: "f".into(),
                params: vec![Variable::typed("a", "int")],
                body: Block::default(),
            }),
        ],
    };

    let names: Vec<&str> = program.functions().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["f"]);
    assert_eq!(program.declarations[0].name(), "g");
    assert_eq!(
        program.functions().next().map(|f| f.to_string()),
        Some(String::from("void f(int a)"))
    );
}

#[test]
fn serializes_to_json() {
    let statement = Statement::Return {
        value: Some(Expression::identifier("x")),
    };
    let json = serde_json::to_value(&statement).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "Return": { "value": { "Identifier": "x" } } })
    );
}
