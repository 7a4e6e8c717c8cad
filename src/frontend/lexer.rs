use std::{iter::Peekable, str::Chars};

use token::Token;

use super::sourceloc::SourceLoc;

pub mod errors;
#[cfg(test)]
mod tests;
pub mod token;

pub use errors::LexError;

#[derive(Debug)]
pub struct Lexer<'a> {
    cur_line: usize,
    cur_col: usize,
    chars: Peekable<Chars<'a>>,
}

// public methods:
impl<'a> Lexer<'a> {
    pub fn from_string(s: &'a str) -> Self {
        Self {
            cur_line: 1,
            cur_col: 1,
            chars: s.chars().peekable(),
        }
    }

    // returns the position to which the input has been read
    pub fn current_loc(&self) -> SourceLoc {
        SourceLoc::new(self.cur_line, self.cur_col)
    }

    pub fn next(&mut self) -> Result<(Token, SourceLoc), LexError> {
        self.lex()
    }

    pub fn lex_all(&mut self) -> Result<Vec<(Token, SourceLoc)>, LexError> {
        let mut tokens: Vec<(Token, SourceLoc)> = Vec::new();
        loop {
            let next_token = self.next()?;
            let done = next_token.0 == Token::Eof;
            tokens.push(next_token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}

// private methods
impl<'a> Lexer<'a> {
    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second_char(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next()
    }

    fn advance_char(&mut self) -> Option<char> {
        let consumed = self.chars.next();
        if let Some(consumed) = consumed {
            if consumed == '\n' {
                self.cur_line += 1;
                self.cur_col = 1;
            } else {
                self.cur_col += 1;
            }
        }
        consumed
    }

    fn match_next_char_for_token_or(
        &mut self,
        expected: char,
        tok_true: Token,
        tok_false: Token,
    ) -> Token {
        if self.peek_char() == Some(expected) {
            self.advance_char();
            tok_true
        } else {
            tok_false
        }
    }

    // whitespace and both comment styles
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.advance_char();
                }
                Some('/') if self.peek_second_char() == Some('/') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance_char();
                    }
                }
                Some('/') if self.peek_second_char() == Some('*') => {
                    let comment_start = self.current_loc();
                    self.advance_char();
                    self.advance_char();
                    loop {
                        match self.advance_char() {
                            Some('*') if self.peek_char() == Some('/') => {
                                self.advance_char();
                                break;
                            }
                            Some(_) => (),
                            None => return Err(LexError::unterminated_comment(comment_start)),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_kw_or_ident(&mut self) -> Token {
        let mut identifier = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                identifier.push(c);
                self.advance_char();
            } else {
                break;
            }
        }

        match identifier.as_str() {
            "int" => Token::Int,
            "char" => Token::Char,
            "float" => Token::Float,
            "double" => Token::Double,
            "void" => Token::Void,
            "short" => Token::Short,
            "long" => Token::Long,
            "unsigned" => Token::Unsigned,
            "signed" => Token::Signed,
            "struct" => Token::Struct,
            "if" => Token::If,
            "else" => Token::Else,
            "while" => Token::While,
            "do" => Token::Do,
            "for" => Token::For,
            "switch" => Token::Switch,
            "case" => Token::Case,
            "default" => Token::Default,
            "break" => Token::Break,
            "goto" => Token::Goto,
            "return" => Token::Return,
            _ => Token::Identifier(identifier),
        }
    }

    // digits, an optional fraction and an optional exponent; the text is kept verbatim
    fn lex_number(&mut self) -> Token {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance_char();
            } else {
                break;
            }
        }

        if self.peek_char() == Some('.')
            && self.peek_second_char().is_some_and(|c| c.is_ascii_digit())
        {
            text.push('.');
            self.advance_char();
            while let Some(c) = self.peek_char() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance_char();
                } else {
                    break;
                }
            }
        }

        if matches!(self.peek_char(), Some('e') | Some('E'))
            && self
                .peek_second_char()
                .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+')
        {
            if let Some(e) = self.advance_char() {
                text.push(e);
            }
            if let Some(sign) = self.peek_char().filter(|c| *c == '-' || *c == '+') {
                text.push(sign);
                self.advance_char();
            }
            while let Some(c) = self.peek_char() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance_char();
                } else {
                    break;
                }
            }
        }

        Token::Number(text)
    }

    // keeps the delimiting quotes, escapes are not interpreted
    fn lex_string(&mut self, start: SourceLoc) -> Result<Token, LexError> {
        let mut text = String::new();
        if let Some(quote) = self.advance_char() {
            text.push(quote);
        }

        loop {
            match self.advance_char() {
                Some('"') => {
                    text.push('"');
                    return Ok(Token::StringLiteral(text));
                }
                Some('\\') => {
                    text.push('\\');
                    match self.advance_char() {
                        Some(escaped) => text.push(escaped),
                        None => return Err(LexError::unterminated_string(start)),
                    }
                }
                Some('\n') | None => return Err(LexError::unterminated_string(start)),
                Some(c) => text.push(c),
            }
        }
    }

    fn lex(&mut self) -> Result<(Token, SourceLoc), LexError> {
        self.skip_trivia()?;
        let match_start = self.current_loc();

        let peeked_char = match self.peek_char() {
            Some(c) => c,
            None => return Ok((Token::Eof, match_start)),
        };

        let token = match peeked_char {
            'a'..='z' | 'A'..='Z' | '_' => self.lex_kw_or_ident(),
            '0'..='9' => self.lex_number(),
            '"' => self.lex_string(match_start)?,
            _ => {
                self.advance_char();
                match peeked_char {
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '{' => Token::LCurly,
                    '}' => Token::RCurly,
                    '[' => Token::LBracket,
                    ']' => Token::RBracket,
                    ';' => Token::Semicolon,
                    ':' => Token::Colon,
                    ',' => Token::Comma,
                    '.' => Token::Dot,
                    '*' => Token::Star,
                    '/' => Token::FSlash,
                    '%' => Token::Percent,
                    '+' => self.match_next_char_for_token_or('+', Token::Increment, Token::Plus),
                    '-' => self.match_next_char_for_token_or('-', Token::Decrement, Token::Minus),
                    '<' => self.match_next_char_for_token_or('=', Token::LThanE, Token::LThan),
                    '>' => self.match_next_char_for_token_or('=', Token::GThanE, Token::GThan),
                    '=' => self.match_next_char_for_token_or('=', Token::Equals, Token::Assign),
                    '!' => self.match_next_char_for_token_or('=', Token::NotEquals, Token::Not),
                    '&' if self.peek_char() == Some('&') => {
                        self.advance_char();
                        Token::And
                    }
                    '|' if self.peek_char() == Some('|') => {
                        self.advance_char();
                        Token::Or
                    }
                    other => return Err(LexError::invalid_char(other, match_start)),
                }
            }
        };

        Ok((token, match_start))
    }
}
