use crate::frontend::{
    lexer::{token::Token, LexError},
    sourceloc::SourceLoc,
};

#[derive(Clone, PartialEq, Eq)]
pub enum ParseError {
    LexError(LexError),
    UnexpectedToken(UnexpectedTokenError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LexError(lex_error) => write!(f, "{}", lex_error),
            Self::UnexpectedToken(unexpected_token) => {
                let mut expected_tokens = String::new();
                for tok in &unexpected_token.expected {
                    if !expected_tokens.is_empty() {
                        expected_tokens += ", ";
                    }

                    expected_tokens += &format!("'{}'", tok.name());
                }
                write!(
                    f,
                    "Unexpected token '{}' at {} while parsing {}, expected one of [{}]",
                    unexpected_token.got,
                    unexpected_token.loc,
                    unexpected_token.while_parsing,
                    expected_tokens
                )
            }
        }
    }
}

impl std::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedTokenError {
    pub loc: SourceLoc,
    pub got: Token,
    pub expected: Vec<Token>,
    pub while_parsing: String,
}

impl ParseError {
    pub fn unexpected_token(
        loc: SourceLoc,
        got: Token,
        expected: &[Token],
        while_parsing: String,
    ) -> Self {
        Self::UnexpectedToken(UnexpectedTokenError {
            loc,
            got,
            expected: expected.to_vec(),
            while_parsing,
        })
    }
}

impl From<LexError> for ParseError {
    fn from(value: LexError) -> Self {
        Self::LexError(value)
    }
}
