//! Recursive-descent producer of the generic syntax tree.
//!
//! Keywords and purely structural punctuation are dropped from the tree; the
//! parentheses around `if`/`while`/`for`/`switch` headers and the brackets of
//! an array access are kept so the tree has the positional shape the IR
//! builder's reduction rules expect.

use std::collections::VecDeque;

use super::{
    lexer::{token::Token, LexError, Lexer},
    sourceloc::SourceLoc,
    syntax_tree::{self, SyntaxNode, SyntaxTree, TokenKind},
};

use crate::trace;

mod declarations;
mod errors;
mod expressions;
mod statements;
#[cfg(test)]
mod tests;

pub use errors::ParseError;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    upcoming_tokens: VecDeque<(Token, SourceLoc)>,
    parsing_stack: Vec<(SourceLoc, String)>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Parser {
            lexer,
            upcoming_tokens: VecDeque::new(),
            parsing_stack: Vec::new(),
        }
    }

    pub fn from_string(source: &'a str) -> Self {
        Self::new(Lexer::from_string(source))
    }

    /// Parse a whole translation unit into a `program` tree
    pub fn parse(&mut self) -> Result<SyntaxTree, ParseError> {
        let _span = trace::span_auto!(trace::Level::DEBUG, "Parse translation unit");
        self.parse_program()
    }

    fn ensure_n_tokens_in_lookahead(&mut self, n: usize) -> Result<(), LexError> {
        while self.upcoming_tokens.len() <= n {
            let lexed = self.lexer.next()?;
            let at_eof = lexed.0 == Token::Eof;
            self.upcoming_tokens.push_back(lexed);
            if at_eof {
                break;
            }
        }

        Ok(())
    }

    // return the next token from the input stream without advancing
    fn peek_token(&mut self) -> Result<Token, ParseError> {
        Ok(self.peek_token_with_loc()?.0)
    }

    fn peek_token_with_loc(&mut self) -> Result<(Token, SourceLoc), ParseError> {
        let peeked = self.lookahead_token_with_loc(0)?;
        trace::trace!("Peek token: {} @ {}", peeked.0, peeked.1);
        Ok(peeked)
    }

    fn lookahead_token(&mut self, lookahead_by: usize) -> Result<Token, ParseError> {
        Ok(self.lookahead_token_with_loc(lookahead_by)?.0)
    }

    // returns the lookahead_by-th token from the input stream without advancing, or EOF if that many tokens are not available
    fn lookahead_token_with_loc(
        &mut self,
        lookahead_by: usize,
    ) -> Result<(Token, SourceLoc), ParseError> {
        self.ensure_n_tokens_in_lookahead(lookahead_by)?;

        Ok(self
            .upcoming_tokens
            .get(lookahead_by)
            .cloned()
            .unwrap_or((Token::Eof, self.lexer.current_loc())))
    }

    fn next_token(&mut self) -> Result<(Token, SourceLoc), ParseError> {
        self.ensure_n_tokens_in_lookahead(0)?;
        let (next, start_loc) = self
            .upcoming_tokens
            .pop_front()
            .unwrap_or((Token::Eof, self.lexer.current_loc()));
        Ok((next, start_loc))
    }

    fn expect_token(&mut self, expected: Token) -> Result<(Token, SourceLoc), ParseError> {
        if self.peek_token()? == expected {
            self.next_token()
        } else {
            self.unexpected_token(&[expected])
        }
    }

    fn expect_identifier(&mut self) -> Result<(String, SourceLoc), ParseError> {
        match self.peek_token()? {
            Token::Identifier(_) => match self.next_token()? {
                (Token::Identifier(name), loc) => Ok((name, loc)),
                _ => self.unexpected_token(&[Token::Identifier(String::new())]),
            },
            _ => self.unexpected_token(&[Token::Identifier(String::new())]),
        }
    }

    fn unexpected_token<T>(&mut self, expected_tokens: &[Token]) -> Result<T, ParseError> {
        let current_parse_string = self
            .parsing_stack
            .last()
            .map(|(_, what)| what.clone())
            .unwrap_or_else(|| String::from("UNKNOWN"));

        let (upcoming_token, upcoming_loc) = self.peek_token_with_loc()?;

        Err(ParseError::unexpected_token(
            upcoming_loc,
            upcoming_token,
            expected_tokens,
            current_parse_string,
        ))
    }

    fn start_parsing(
        &mut self,
        what_parsing: &str,
    ) -> Result<(SourceLoc, trace::ExitOnDropSpan), ParseError> {
        let start_loc = self.peek_token_with_loc()?.1;

        let exit_on_drop_span = trace::span_auto!(
            trace::Level::TRACE,
            "parse rule",
            what_parsing,
            loc = %start_loc
        );

        self.parsing_stack
            .push((start_loc, String::from(what_parsing)));

        Ok((start_loc, exit_on_drop_span))
    }

    fn finish_parsing(&mut self, parsed: SyntaxTree) -> SyntaxTree {
        if let Some((_, parsed_description)) = self.parsing_stack.pop() {
            trace::trace!(
                "Finish parsing {}: {} ({} children)",
                parsed_description,
                parsed.rule,
                parsed.children.len()
            );
        }
        parsed
    }
}

// conversion of lexer tokens into tree leaves
impl<'a> Parser<'a> {
    fn leaf(token: &Token, loc: SourceLoc) -> SyntaxNode {
        let kind = match token {
            Token::Identifier(_) => TokenKind::Ident,
            Token::Number(_) => TokenKind::Number,
            Token::StringLiteral(_) => TokenKind::String,
            Token::LParen => TokenKind::LParen,
            Token::RParen => TokenKind::RParen,
            Token::LCurly => TokenKind::LBrace,
            Token::RCurly => TokenKind::RBrace,
            Token::LBracket => TokenKind::LBracket,
            Token::RBracket => TokenKind::RBracket,
            Token::Semicolon => TokenKind::Semicolon,
            Token::Colon => TokenKind::Colon,
            Token::Comma => TokenKind::Comma,
            Token::Dot => TokenKind::Dot,
            token if token.is_type_name() => TokenKind::TypeName,
            _ => TokenKind::Operator,
        };
        SyntaxNode::Token(syntax_tree::Token::new(kind, token.name(), loc))
    }

    // consume the expected token and keep it as a leaf
    fn expect_leaf(&mut self, expected: Token) -> Result<SyntaxNode, ParseError> {
        let (token, loc) = self.expect_token(expected)?;
        Ok(Self::leaf(&token, loc))
    }

    fn next_leaf(&mut self) -> Result<SyntaxNode, ParseError> {
        let (token, loc) = self.next_token()?;
        Ok(Self::leaf(&token, loc))
    }
}
