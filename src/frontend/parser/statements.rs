use crate::frontend::{
    lexer::token::Token,
    syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
};

use super::{ParseError, Parser};

impl<'a> Parser<'a> {
    pub(super) fn parse_compound_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("compound statement")?;

        self.expect_token(Token::LCurly)?;
        let mut items = Vec::new();
        while self.peek_token()? != Token::RCurly {
            items.push(SyntaxNode::Tree(self.parse_block_item()?));
        }
        self.expect_token(Token::RCurly)?;

        let compound = SyntaxTree::new(Rule::CompoundStmt, start_loc, items);
        Ok(self.finish_parsing(compound))
    }

    fn parse_block_item(&mut self) -> Result<SyntaxTree, ParseError> {
        if self.peek_token()?.is_type_start() {
            self.parse_declaration()
        } else {
            self.parse_statement()
        }
    }

    pub(super) fn parse_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        match (self.peek_token()?, self.lookahead_token(1)?) {
            (Token::LCurly, _) => self.parse_compound_statement(),
            (Token::If, _) => self.parse_if_statement(),
            (Token::While, _) => self.parse_while_statement(),
            (Token::Do, _) => self.parse_do_while_statement(),
            (Token::For, _) => self.parse_for_statement(),
            (Token::Switch, _) => self.parse_switch_statement(),
            (Token::Break, _) => self.parse_break_statement(),
            (Token::Goto, _) => self.parse_goto_statement(),
            (Token::Return, _) => self.parse_return_statement(),
            (Token::Identifier(_), Token::Colon) => self.parse_labeled_statement(),
            // a lone semicolon is an empty block
            (Token::Semicolon, _) => {
                let (_, loc) = self.expect_token(Token::Semicolon)?;
                Ok(SyntaxTree::new(Rule::CompoundStmt, loc, Vec::new()))
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("expression statement")?;

        let expression = self.parse_expression()?;
        self.expect_token(Token::Semicolon)?;

        let statement = SyntaxTree::new(Rule::ExprStmt, start_loc, vec![expression]);
        Ok(self.finish_parsing(statement))
    }

    // children: ( cond ) then [else]
    fn parse_if_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("if statement")?;

        self.expect_token(Token::If)?;
        let mut children = vec![self.expect_leaf(Token::LParen)?];
        children.push(self.parse_expression()?);
        children.push(self.expect_leaf(Token::RParen)?);
        children.push(SyntaxNode::Tree(self.parse_statement()?));

        if self.peek_token()? == Token::Else {
            self.expect_token(Token::Else)?;
            children.push(SyntaxNode::Tree(self.parse_statement()?));
        }

        let if_statement = SyntaxTree::new(Rule::IfStmt, start_loc, children);
        Ok(self.finish_parsing(if_statement))
    }

    fn parse_while_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("while statement")?;

        self.expect_token(Token::While)?;
        let children = vec![
            self.expect_leaf(Token::LParen)?,
            self.parse_expression()?,
            self.expect_leaf(Token::RParen)?,
            SyntaxNode::Tree(self.parse_statement()?),
        ];

        let while_statement = SyntaxTree::new(Rule::WhileStmt, start_loc, children);
        Ok(self.finish_parsing(while_statement))
    }

    // do body while ( cond ) ;
    fn parse_do_while_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("do-while statement")?;

        self.expect_token(Token::Do)?;
        let body = self.parse_statement()?;
        self.expect_token(Token::While)?;
        let children = vec![
            SyntaxNode::Tree(body),
            self.expect_leaf(Token::LParen)?,
            self.parse_expression()?,
            self.expect_leaf(Token::RParen)?,
        ];
        self.expect_token(Token::Semicolon)?;

        let do_while = SyntaxTree::new(Rule::DoWhileStmt, start_loc, children);
        Ok(self.finish_parsing(do_while))
    }

    fn parse_for_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("for statement")?;

        self.expect_token(Token::For)?;
        let open_paren = self.expect_leaf(Token::LParen)?;
        let init = self.parse_for_clause(Rule::ForInit, Token::Semicolon)?;
        self.expect_token(Token::Semicolon)?;
        let condition = self.parse_for_clause(Rule::ForCond, Token::Semicolon)?;
        self.expect_token(Token::Semicolon)?;
        let update = self.parse_for_clause(Rule::ForUpdate, Token::RParen)?;
        let close_paren = self.expect_leaf(Token::RParen)?;
        let body = self.parse_statement()?;

        let for_statement = SyntaxTree::new(
            Rule::ForStmt,
            start_loc,
            vec![
                open_paren,
                SyntaxNode::Tree(init),
                SyntaxNode::Tree(condition),
                SyntaxNode::Tree(update),
                close_paren,
                SyntaxNode::Tree(body),
            ],
        );
        Ok(self.finish_parsing(for_statement))
    }

    // an empty clause is a childless tree so the positions in the for statement stay fixed
    fn parse_for_clause(&mut self, rule: Rule, terminator: Token) -> Result<SyntaxTree, ParseError> {
        let loc = self.peek_token_with_loc()?.1;
        let children = if self.peek_token()? == terminator {
            Vec::new()
        } else {
            vec![self.parse_expression()?]
        };
        Ok(SyntaxTree::new(rule, loc, children))
    }

    fn parse_switch_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("switch statement")?;

        self.expect_token(Token::Switch)?;
        let mut children = vec![
            self.expect_leaf(Token::LParen)?,
            self.parse_expression()?,
            self.expect_leaf(Token::RParen)?,
            self.expect_leaf(Token::LCurly)?,
        ];

        loop {
            match self.peek_token()? {
                Token::Case => children.push(SyntaxNode::Tree(self.parse_case_clause()?)),
                Token::Default => children.push(SyntaxNode::Tree(self.parse_default_clause()?)),
                Token::RCurly => break,
                _ => return self.unexpected_token(&[Token::Case, Token::Default, Token::RCurly]),
            }
        }
        children.push(self.expect_leaf(Token::RCurly)?);

        let switch = SyntaxTree::new(Rule::SwitchStmt, start_loc, children);
        Ok(self.finish_parsing(switch))
    }

    fn parse_case_clause(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("case clause")?;

        self.expect_token(Token::Case)?;
        let value = match self.peek_token()? {
            Token::Number(_) | Token::StringLiteral(_) => self.next_leaf()?,
            Token::Minus => self.parse_negative_number()?,
            _ => {
                return self.unexpected_token(&[
                    Token::Number(String::new()),
                    Token::StringLiteral(String::new()),
                ])
            }
        };

        let mut children = vec![value, self.expect_leaf(Token::Colon)?];
        children.extend(self.parse_clause_body()?);

        let case = SyntaxTree::new(Rule::CaseClause, start_loc, children);
        Ok(self.finish_parsing(case))
    }

    fn parse_default_clause(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("default clause")?;

        self.expect_token(Token::Default)?;
        let mut children = vec![self.expect_leaf(Token::Colon)?];
        children.extend(self.parse_clause_body()?);

        let default = SyntaxTree::new(Rule::DefaultClause, start_loc, children);
        Ok(self.finish_parsing(default))
    }

    // statements up to the next case label or the end of the switch
    fn parse_clause_body(&mut self) -> Result<Vec<SyntaxNode>, ParseError> {
        let mut statements = Vec::new();
        while !matches!(
            self.peek_token()?,
            Token::Case | Token::Default | Token::RCurly | Token::Eof
        ) {
            statements.push(SyntaxNode::Tree(self.parse_block_item()?));
        }
        Ok(statements)
    }

    fn parse_break_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("break statement")?;

        self.expect_token(Token::Break)?;
        self.expect_token(Token::Semicolon)?;

        let break_statement = SyntaxTree::new(Rule::BreakStmt, start_loc, Vec::new());
        Ok(self.finish_parsing(break_statement))
    }

    fn parse_goto_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("goto statement")?;

        self.expect_token(Token::Goto)?;
        let (label, label_loc) = self.expect_identifier()?;
        self.expect_token(Token::Semicolon)?;

        let goto = SyntaxTree::new(
            Rule::GotoStmt,
            start_loc,
            vec![SyntaxNode::token(TokenKind::Ident, label, label_loc)],
        );
        Ok(self.finish_parsing(goto))
    }

    fn parse_labeled_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("labeled statement")?;

        let (label, label_loc) = self.expect_identifier()?;
        let children = vec![
            SyntaxNode::token(TokenKind::Ident, label, label_loc),
            self.expect_leaf(Token::Colon)?,
            SyntaxNode::Tree(self.parse_statement()?),
        ];

        let labeled = SyntaxTree::new(Rule::LabeledStmt, start_loc, children);
        Ok(self.finish_parsing(labeled))
    }

    fn parse_return_statement(&mut self) -> Result<SyntaxTree, ParseError> {
        let (start_loc, _span) = self.start_parsing("return statement")?;

        self.expect_token(Token::Return)?;
        let children = if self.peek_token()? == Token::Semicolon {
            Vec::new()
        } else {
            vec![self.parse_expression()?]
        };
        self.expect_token(Token::Semicolon)?;

        let return_statement = SyntaxTree::new(Rule::ReturnStmt, start_loc, children);
        Ok(self.finish_parsing(return_statement))
    }
}
