use crate::frontend::{
    lexer::token::Token,
    syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
};

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(super) fn parse_program(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("program")?;

        let mut items = Vec::new();
        loop {
            let item = match self.peek_token()? {
                Token::Eof => break,
                Token::Struct if self.lookahead_token(2)? == Token::LCurly => {
                    self.parse_struct_definition()?
                }
                _ => self.parse_declaration_or_function()?,
            };
            items.push(SyntaxNode::Tree(item));
        }

        let program = SyntaxTree::new(Rule::Program, start_loc, items);
        Ok(self.finish_parsing(program))
    }

    // struct NAME { (type NAME ;)* } ;
    fn parse_struct_definition(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("struct definition")?;

        self.expect_token(Token::Struct)?;
        let (name, name_loc) = self.expect_identifier()?;
        let open_brace = self.expect_leaf(Token::LCurly)?;

        let body_loc = self.peek_token_with_loc()?.1;
        let mut fields = Vec::new();
        while self.peek_token()? != Token::RCurly {
            fields.push(SyntaxNode::Tree(self.parse_type_specifier()?));
            let (field_name, field_loc) = self.expect_identifier()?;
            fields.push(SyntaxNode::token(TokenKind::Ident, field_name, field_loc));
            fields.push(self.expect_leaf(Token::Semicolon)?);
        }
        let close_brace = self.expect_leaf(Token::RCurly)?;
        self.expect_token(Token::Semicolon)?;

        let definition = SyntaxTree::new(
            Rule::StructDef,
            start_loc,
            vec![
                SyntaxNode::token(TokenKind::Ident, name, name_loc),
                open_brace,
                SyntaxNode::tree(Rule::StructBody, body_loc, fields),
                close_brace,
            ],
        );
        Ok(self.finish_parsing(definition))
    }

    // a run of type keywords collapses into a single TypeName leaf ("unsigned int")
    pub(super) fn parse_type_specifier(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("type specifier")?;

        let children = match self.peek_token()? {
            Token::Struct => {
                self.expect_token(Token::Struct)?;
                let (name, name_loc) = self.expect_identifier()?;
                vec![SyntaxNode::tree(
                    Rule::StructType,
                    start_loc,
                    vec![SyntaxNode::token(TokenKind::Ident, name, name_loc)],
                )]
            }
            token if token.is_type_name() => {
                let mut words = Vec::new();
                while self.peek_token()?.is_type_name() {
                    words.push(self.next_token()?.0.name());
                }
                vec![SyntaxNode::token(
                    TokenKind::TypeName,
                    words.join(" "),
                    start_loc,
                )]
            }
            _ => {
                return self.unexpected_token(&[
                    Token::Int,
                    Token::Char,
                    Token::Float,
                    Token::Double,
                    Token::Void,
                    Token::Struct,
                ])
            }
        };

        let type_specifier = SyntaxTree::new(Rule::TypeSpecifier, start_loc, children);
        Ok(self.finish_parsing(type_specifier))
    }

    fn parse_declaration_or_function(&mut self) -> Result<SyntaxTree, ParseError> {
        let type_specifier = self.parse_type_specifier()?;
        match (self.peek_token()?, self.lookahead_token(1)?) {
            (Token::Identifier(_), Token::LParen) => self.parse_function_definition(type_specifier),
            _ => self.parse_declaration_rest(type_specifier),
        }
    }

    pub(super) fn parse_declaration(&mut self) -> Result<SyntaxTree, ParseError> {
        let type_specifier = self.parse_type_specifier()?;
        self.parse_declaration_rest(type_specifier)
    }

    // everything after the type: declarator (, declarator)* ;
    fn parse_declaration_rest(
        &mut self,
        type_specifier: SyntaxTree,
    ) -> Result<SyntaxTree, ParseError> {
        let start_loc = type_specifier.loc;
        let (list_loc, _span) = self.start_parsing("declaration")?;

        let mut declarators = vec![SyntaxNode::Tree(self.parse_declarator()?)];
        while self.peek_token()? == Token::Comma {
            self.expect_token(Token::Comma)?;
            declarators.push(SyntaxNode::Tree(self.parse_declarator()?));
        }
        self.expect_token(Token::Semicolon)?;

        let declaration = SyntaxTree::new(
            Rule::Declaration,
            start_loc,
            vec![
                SyntaxNode::Tree(type_specifier),
                SyntaxNode::tree(Rule::DeclaratorList, list_loc, declarators),
            ],
        );
        Ok(self.finish_parsing(declaration))
    }

    // NAME ([ NUMBER ])*
    fn parse_declarator(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("declarator")?;

        let (name, name_loc) = self.expect_identifier()?;
        let mut children = vec![SyntaxNode::token(TokenKind::Ident, name, name_loc)];
        while self.peek_token()? == Token::LBracket {
            self.expect_token(Token::LBracket)?;
            match self.peek_token()? {
                Token::Number(_) => children.push(self.next_leaf()?),
                _ => return self.unexpected_token(&[Token::Number(String::new())]),
            }
            self.expect_token(Token::RBracket)?;
        }

        let declarator = SyntaxTree::new(Rule::Declarator, start_loc, children);
        Ok(self.finish_parsing(declarator))
    }

    fn parse_function_definition(
        &mut self,
        return_type: SyntaxTree,
    ) -> Result<SyntaxTree, ParseError> {
        let start_loc = return_type.loc;
        let (_, _span) = self.start_parsing("function definition")?;

        let (name, name_loc) = self.expect_identifier()?;
        let mut children = vec![
            SyntaxNode::Tree(return_type),
            SyntaxNode::token(TokenKind::Ident, name, name_loc),
            self.expect_leaf(Token::LParen)?,
        ];

        match (self.peek_token()?, self.lookahead_token(1)?) {
            (Token::RParen, _) => (),
            // f(void) takes no parameters
            (Token::Void, Token::RParen) => {
                self.expect_token(Token::Void)?;
            }
            _ => children.push(SyntaxNode::Tree(self.parse_param_list()?)),
        }

        children.push(self.expect_leaf(Token::RParen)?);
        children.push(SyntaxNode::Tree(self.parse_compound_statement()?));

        let definition = SyntaxTree::new(Rule::FunctionDef, start_loc, children);
        Ok(self.finish_parsing(definition))
    }

    fn parse_param_list(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("parameter list")?;

        let mut params = vec![SyntaxNode::Tree(self.parse_param()?)];
        while self.peek_token()? == Token::Comma {
            self.expect_token(Token::Comma)?;
            params.push(SyntaxNode::Tree(self.parse_param()?));
        }

        let param_list = SyntaxTree::new(Rule::ParamList, start_loc, params);
        Ok(self.finish_parsing(param_list))
    }

    fn parse_param(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("parameter")?;

        let type_specifier = self.parse_type_specifier()?;
        let (name, name_loc) = self.expect_identifier()?;

        let param = SyntaxTree::new(
            Rule::Param,
            start_loc,
            vec![
                SyntaxNode::Tree(type_specifier),
                SyntaxNode::token(TokenKind::Ident, name, name_loc),
            ],
        );
        Ok(self.finish_parsing(param))
    }
}
