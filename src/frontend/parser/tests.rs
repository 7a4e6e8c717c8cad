use crate::frontend::{
    lexer::token::Token,
    parser::{ParseError, Parser},
    sourceloc::SourceLoc,
    syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
};

fn parse(source: &str) -> SyntaxTree {
    Parser::from_string(source).parse().unwrap()
}

fn child_tree(tree: &SyntaxTree, index: usize) -> &SyntaxTree {
    match &tree.children[index] {
        SyntaxNode::Tree(child) => child,
        SyntaxNode::Token(token) => panic!("child {} is token {}", index, token),
    }
}

fn child_rules(tree: &SyntaxTree) -> Vec<Option<Rule>> {
    tree.children
        .iter()
        .map(|child| match child {
            SyntaxNode::Tree(tree) => Some(tree.rule),
            SyntaxNode::Token(_) => None,
        })
        .collect()
}

fn first_statement(source: &str) -> SyntaxTree {
    let program = parse(source);
    let function = child_tree(&program, 0);
    assert_eq!(function.rule, Rule::FunctionDef);
    let body = child_tree(function, function.children.len() - 1);
    child_tree(body, 0).clone()
}

#[test]
fn empty_program() {
    let program = parse("");
    assert_eq!(program.rule, Rule::Program);
    assert!(program.children.is_empty());
}

#[test]
fn declaration() {
    assert_eq!(
        parse("int x;").pretty(),
        "program
  declaration
    type_specifier
      int
    declarator_list
      declarator
        x
"
    );
}

#[test]
fn declarator_list_and_dimensions() {
    let program = parse("unsigned int a, m[3][4];");
    let declaration = child_tree(&program, 0);
    let type_specifier = child_tree(declaration, 0);
    assert_eq!(
        type_specifier.children[0],
        SyntaxNode::token(TokenKind::TypeName, "unsigned int", SourceLoc::new(1, 1))
    );

    let declarators = child_tree(declaration, 1);
    assert_eq!(declarators.children.len(), 2);
    let matrix = child_tree(declarators, 1);
    let texts: Vec<String> = matrix
        .children
        .iter()
        .map(|child| match child {
            SyntaxNode::Token(token) => token.text.clone(),
            SyntaxNode::Tree(tree) => panic!("unexpected tree {}", tree.rule),
        })
        .collect();
    assert_eq!(texts, vec!["m", "3", "4"]);
}

#[test]
fn function_with_precedence() {
    assert_eq!(
        parse("int main() { return a + b * 2; }").pretty(),
        "program
  function_def
    type_specifier
      int
    main
    (
    )
    compound_stmt
      return_stmt
        add
          primary
            a
          +
          mul
            primary
              b
            *
            primary
              2
"
    );
}

#[test]
fn parameters() {
    let program = parse("int add(int a, float b) { return a; }");
    let function = child_tree(&program, 0);
    assert_eq!(
        child_rules(function),
        vec![
            Some(Rule::TypeSpecifier),
            None,
            None,
            Some(Rule::ParamList),
            None,
            Some(Rule::CompoundStmt)
        ]
    );
    assert_eq!(child_tree(function, 3).children.len(), 2);

    // (void) is the same as ()
    let program = parse("void f(void) { }");
    let function = child_tree(&program, 0);
    assert_eq!(function.children.len(), 5);
}

#[test]
fn struct_definition() {
    let program = parse("struct Point { int x; int y; }; struct Point p;");
    let definition = child_tree(&program, 0);
    assert_eq!(definition.rule, Rule::StructDef);
    assert_eq!(child_tree(definition, 2).rule, Rule::StructBody);
    assert_eq!(child_tree(definition, 2).children.len(), 6);

    let declaration = child_tree(&program, 1);
    let type_specifier = child_tree(declaration, 0);
    assert_eq!(child_tree(type_specifier, 0).rule, Rule::StructType);
}

#[test]
fn for_statement_keeps_empty_clauses() {
    let statement = first_statement("void f() { for (;;) ; }");
    assert_eq!(statement.rule, Rule::ForStmt);
    assert_eq!(
        child_rules(&statement),
        vec![
            None,
            Some(Rule::ForInit),
            Some(Rule::ForCond),
            Some(Rule::ForUpdate),
            None,
            Some(Rule::CompoundStmt)
        ]
    );
    for clause in 1..=3 {
        assert!(child_tree(&statement, clause).children.is_empty());
    }
}

#[test]
fn unary_operator_position() {
    let statement = first_statement("void f() { i++; }");
    let unary = child_tree(&statement, 0);
    assert_eq!(unary.rule, Rule::Unary);
    assert_eq!(child_rules(unary), vec![Some(Rule::Primary), None]);

    let statement = first_statement("void f() { --i; }");
    let unary = child_tree(&statement, 0);
    assert_eq!(child_rules(unary), vec![None, Some(Rule::Primary)]);
}

#[test]
fn assignment_is_right_associative() {
    let statement = first_statement("void f() { a = b = (1 + 2); }");
    let outer = child_tree(&statement, 0);
    assert_eq!(outer.rule, Rule::Assignment);
    let inner = child_tree(outer, 1);
    assert_eq!(inner.rule, Rule::Assignment);
    // parentheses leave the inner chain in place
    assert_eq!(child_tree(inner, 1).rule, Rule::Add);
}

#[test]
fn postfix_expressions() {
    let statement = first_statement("void f() { x = add(v.x, m[2], -1); }");
    let assignment = child_tree(&statement, 0);
    let call = child_tree(child_tree(assignment, 1), 0);
    assert_eq!(call.rule, Rule::FuncCall);

    let args = child_tree(call, 1);
    assert_eq!(args.rule, Rule::ArgList);
    assert_eq!(child_tree(child_tree(args, 0), 0).rule, Rule::FieldAccess);
    assert_eq!(child_tree(child_tree(args, 1), 0).rule, Rule::ArrayAccess);
    assert_eq!(
        child_tree(args, 2).children[0],
        SyntaxNode::token(TokenKind::Number, "-1", SourceLoc::new(1, 31))
    );
}

#[test]
fn switch_clauses() {
    let statement = first_statement(
        "void f() { switch (x) { case 1: a = 1; break; case -2: default: b = 2; } }",
    );
    assert_eq!(statement.rule, Rule::SwitchStmt);
    assert_eq!(
        child_rules(&statement),
        vec![
            None,
            Some(Rule::Primary),
            None,
            None,
            Some(Rule::CaseClause),
            Some(Rule::CaseClause),
            Some(Rule::DefaultClause),
            None
        ]
    );
    assert_eq!(child_tree(&statement, 4).children.len(), 4);
    assert_eq!(child_tree(&statement, 5).children.len(), 2);
    assert_eq!(
        child_rules(child_tree(&statement, 6)),
        vec![None, Some(Rule::ExprStmt)]
    );
}

#[test]
fn labels_and_jumps() {
    let program = parse("void f() { top: x++; if (x < 3) goto top; else return; }");
    let function = child_tree(&program, 0);
    let body = child_tree(function, 4);

    let labeled = child_tree(body, 0);
    assert_eq!(labeled.rule, Rule::LabeledStmt);
    assert_eq!(child_rules(labeled), vec![None, None, Some(Rule::ExprStmt)]);

    let if_statement = child_tree(body, 1);
    assert_eq!(
        child_rules(if_statement),
        vec![
            None,
            Some(Rule::Relational),
            None,
            Some(Rule::GotoStmt),
            Some(Rule::ReturnStmt)
        ]
    );
}

#[test]
fn do_while() {
    let statement = first_statement("void f() { do { x++; } while (x < 3); }");
    assert_eq!(
        child_rules(&statement),
        vec![Some(Rule::CompoundStmt), None, Some(Rule::Relational), None]
    );
}

#[test]
fn missing_semicolon() {
    let err = Parser::from_string("int x").parse().unwrap_err();
    match err {
        ParseError::UnexpectedToken(unexpected) => {
            assert_eq!(unexpected.got, Token::Eof);
            assert_eq!(unexpected.expected, vec![Token::Semicolon]);
            assert_eq!(unexpected.while_parsing, "declaration");
        }
        other => panic!("expected an unexpected token error, got {}", other),
    }
}

#[test]
fn lex_errors_surface() {
    let err = Parser::from_string("int $;").parse().unwrap_err();
    assert!(matches!(err, ParseError::LexError(_)));
}
