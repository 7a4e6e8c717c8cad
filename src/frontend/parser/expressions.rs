use crate::frontend::{
    lexer::token::Token,
    syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
};

use super::{ParseError, Parser};

// binary precedence levels, loosest first
const BINARY_LEVELS: [Rule; 6] = [
    Rule::LogicOr,
    Rule::LogicAnd,
    Rule::Equality,
    Rule::Relational,
    Rule::Add,
    Rule::Mul,
];

fn is_level_operator(level: Rule, token: &Token) -> bool {
    match level {
        Rule::LogicOr => matches!(token, Token::Or),
        Rule::LogicAnd => matches!(token, Token::And),
        Rule::Equality => matches!(token, Token::Equals | Token::NotEquals),
        Rule::Relational => matches!(
            token,
            Token::LThan | Token::GThan | Token::LThanE | Token::GThanE
        ),
        Rule::Add => matches!(token, Token::Plus | Token::Minus),
        Rule::Mul => matches!(token, Token::Star | Token::FSlash | Token::Percent),
        _ => false,
    }
}

impl<'a> Parser<'a> {
    pub(super) fn parse_expression(&mut self) -> Result<SyntaxNode, ParseError> {
        self.parse_assignment()
    }

    // right-associative; a lone operand is returned without an assignment wrapper
    fn parse_assignment(&mut self) -> Result<SyntaxNode, ParseError> {
        let start_loc = self.peek_token_with_loc()?.1;
        let target = self.parse_binary_level(0)?;

        if self.peek_token()? == Token::Assign {
            let (_, _span) = self.start_parsing("assignment")?;
            self.expect_token(Token::Assign)?;
            let value = self.parse_assignment()?;
            let assignment = SyntaxTree::new(Rule::Assignment, start_loc, vec![target, value]);
            Ok(SyntaxNode::Tree(self.finish_parsing(assignment)))
        } else {
            Ok(target)
        }
    }

    // flat chain [e0, op, e1, op, e2, ...] for one precedence level
    fn parse_binary_level(&mut self, level: usize) -> Result<SyntaxNode, ParseError> {
        let Some(rule) = BINARY_LEVELS.get(level).copied() else {
            return self.parse_unary();
        };

        let start_loc = self.peek_token_with_loc()?.1;
        let first = self.parse_binary_level(level + 1)?;
        let mut chain = vec![first];

        while is_level_operator(rule, &self.peek_token()?) {
            chain.push(self.next_leaf()?);
            chain.push(self.parse_binary_level(level + 1)?);
        }

        if chain.len() == 1 {
            Ok(chain.remove(0))
        } else {
            Ok(SyntaxNode::tree(rule, start_loc, chain))
        }
    }

    fn parse_unary(&mut self) -> Result<SyntaxNode, ParseError> {
        let start_loc = self.peek_token_with_loc()?.1;

        match self.peek_token()? {
            Token::Increment | Token::Decrement => {
                let operator = self.next_leaf()?;
                let operand = self.parse_unary()?;
                Ok(SyntaxNode::tree(Rule::Unary, start_loc, vec![operator, operand]))
            }
            _ => {
                let operand = self.parse_primary()?;
                match self.peek_token()? {
                    Token::Increment | Token::Decrement => {
                        let operator = self.next_leaf()?;
                        Ok(SyntaxNode::tree(Rule::Unary, start_loc, vec![operand, operator]))
                    }
                    _ => Ok(operand),
                }
            }
        }
    }

    fn parse_primary(&mut self) -> Result<SyntaxNode, ParseError> {
        // parentheses only group, they leave no node behind
        if self.peek_token()? == Token::LParen {
            self.expect_token(Token::LParen)?;
            let parenthesized = self.parse_expression()?;
            self.expect_token(Token::RParen)?;
            return Ok(parenthesized);
        }

        let (start_loc, _span) = self.start_parsing("primary expression")?;

        let inner = match (self.peek_token()?, self.lookahead_token(1)?) {
            (Token::Number(_), _) | (Token::StringLiteral(_), _) => self.next_leaf()?,
            (Token::Minus, Token::Number(_)) => self.parse_negative_number()?,
            (Token::Identifier(_), Token::LParen) => self.parse_function_call()?,
            (Token::Identifier(_), Token::Dot) => self.parse_field_access()?,
            (Token::Identifier(_), Token::LBracket) => self.parse_array_access()?,
            (Token::Identifier(_), _) => self.next_leaf()?,
            _ => {
                return self.unexpected_token(&[
                    Token::Identifier(String::new()),
                    Token::Number(String::new()),
                    Token::StringLiteral(String::new()),
                    Token::LParen,
                ])
            }
        };

        let primary = self.finish_parsing(SyntaxTree::new(
            Rule::Primary,
            start_loc,
            vec![inner],
        ));
        Ok(SyntaxNode::Tree(primary))
    }

    // `-5` becomes a single Number leaf with text "-5"
    pub(super) fn parse_negative_number(&mut self) -> Result<SyntaxNode, ParseError> {
        let (_, minus_loc) = self.expect_token(Token::Minus)?;
        match self.next_token()? {
            (Token::Number(text), _) => Ok(SyntaxNode::token(
                TokenKind::Number,
                format!("-{}", text),
                minus_loc,
            )),
            _ => self.unexpected_token(&[Token::Number(String::new())]),
        }
    }

    fn parse_function_call(&mut self) -> Result<SyntaxNode, ParseError> {
        let (start_loc, _span) = self.start_parsing("function call")?;

        let (name, name_loc) = self.expect_identifier()?;
        let mut children = vec![SyntaxNode::token(TokenKind::Ident, name, name_loc)];

        let (_, args_loc) = self.expect_token(Token::LParen)?;
        if self.peek_token()? != Token::RParen {
            let mut args = vec![self.parse_expression()?];
            while self.peek_token()? == Token::Comma {
                self.expect_token(Token::Comma)?;
                args.push(self.parse_expression()?);
            }
            children.push(SyntaxNode::tree(Rule::ArgList, args_loc, args));
        }
        self.expect_token(Token::RParen)?;

        let call = self.finish_parsing(SyntaxTree::new(
            Rule::FuncCall,
            start_loc,
            children,
        ));
        Ok(SyntaxNode::Tree(call))
    }

    fn parse_field_access(&mut self) -> Result<SyntaxNode, ParseError> {
        let (start_loc, _span) = self.start_parsing("field access")?;

        let (base, base_loc) = self.expect_identifier()?;
        let dot = self.expect_leaf(Token::Dot)?;
        let (field, field_loc) = self.expect_identifier()?;

        let access = self.finish_parsing(SyntaxTree::new(
            Rule::FieldAccess,
            start_loc,
            vec![
                SyntaxNode::token(TokenKind::Ident, base, base_loc),
                dot,
                SyntaxNode::token(TokenKind::Ident, field, field_loc),
            ],
        ));
        Ok(SyntaxNode::Tree(access))
    }

    fn parse_array_access(&mut self) -> Result<SyntaxNode, ParseError> {
        let (start_loc, _span) = self.start_parsing("array access")?;

        let (base, base_loc) = self.expect_identifier()?;
        let children = vec![
            SyntaxNode::token(TokenKind::Ident, base, base_loc),
            self.expect_leaf(Token::LBracket)?,
            self.parse_expression()?,
            self.expect_leaf(Token::RBracket)?,
        ];

        let access = self.finish_parsing(SyntaxTree::new(
            Rule::ArrayAccess,
            start_loc,
            children,
        ));
        Ok(SyntaxNode::Tree(access))
    }
}
