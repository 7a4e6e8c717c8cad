use crate::frontend::{
    lexer::{token::Token, LexError, Lexer},
    sourceloc::SourceLoc,
};

fn lex_tokens(input: &str) -> Vec<Token> {
    Lexer::from_string(input)
        .lex_all()
        .unwrap()
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

#[test]
fn empty_input() {
    assert_eq!(lex_tokens(""), vec![Token::Eof]);
}

// ensure keyword matching behaves as expected with alpha/num pre/suffixes
#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        lex_tokens("int integer for _for for1 struct"),
        vec![
            Token::Int,
            Token::Identifier("integer".into()),
            Token::For,
            Token::Identifier("_for".into()),
            Token::Identifier("for1".into()),
            Token::Struct,
            Token::Eof
        ]
    );
}

#[test]
fn numbers_keep_their_text() {
    assert_eq!(
        lex_tokens("5 3.25 1e3 2.5E-2"),
        vec![
            Token::Number("5".into()),
            Token::Number("3.25".into()),
            Token::Number("1e3".into()),
            Token::Number("2.5E-2".into()),
            Token::Eof
        ]
    );
}

#[test]
fn member_access_is_not_a_fraction() {
    assert_eq!(
        lex_tokens("v.x"),
        vec![
            Token::Identifier("v".into()),
            Token::Dot,
            Token::Identifier("x".into()),
            Token::Eof
        ]
    );
}

#[test]
fn two_char_operators() {
    assert_eq!(
        lex_tokens("++ -- <= >= == != && || = < > !"),
        vec![
            Token::Increment,
            Token::Decrement,
            Token::LThanE,
            Token::GThanE,
            Token::Equals,
            Token::NotEquals,
            Token::And,
            Token::Or,
            Token::Assign,
            Token::LThan,
            Token::GThan,
            Token::Not,
            Token::Eof
        ]
    );
}

#[test]
fn string_literal_keeps_quotes() {
    assert_eq!(
        lex_tokens(r#"s = "a \"b\" c";"#),
        vec![
            Token::Identifier("s".into()),
            Token::Assign,
            Token::StringLiteral(r#""a \"b\" c""#.into()),
            Token::Semicolon,
            Token::Eof
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        lex_tokens("a // line comment\n/* block\ncomment */ b"),
        vec![
            Token::Identifier("a".into()),
            Token::Identifier("b".into()),
            Token::Eof
        ]
    );
}

#[test]
fn locations() {
    let tokens = Lexer::from_string("int x;\n  x = 1;").lex_all().unwrap();
    let locs: Vec<SourceLoc> = tokens.iter().map(|(_, loc)| *loc).collect();
    assert_eq!(
        locs,
        vec![
            SourceLoc::new(1, 1),
            SourceLoc::new(1, 5),
            SourceLoc::new(1, 6),
            SourceLoc::new(2, 3),
            SourceLoc::new(2, 5),
            SourceLoc::new(2, 7),
            SourceLoc::new(2, 8),
            SourceLoc::new(2, 9),
        ]
    );
}

#[test]
fn errors() {
    assert_eq!(
        Lexer::from_string("a # b").lex_all(),
        Err(LexError::invalid_char('#', SourceLoc::new(1, 3)))
    );
    assert_eq!(
        Lexer::from_string("\"abc").lex_all(),
        Err(LexError::unterminated_string(SourceLoc::new(1, 1)))
    );
    assert_eq!(
        Lexer::from_string("a /* b").lex_all(),
        Err(LexError::unterminated_comment(SourceLoc::new(1, 3)))
    );
}
