use crate::{
    frontend::syntax_tree::{SyntaxNode, SyntaxTree, Token, TokenKind},
    midend::ir::{BinaryOperator, Expression, Literal, UnaryOperator},
};

use super::{IrBuilder, IrError, Reduced};

// assignment: [target, value]
const ASSIGNMENT_TARGET: usize = 0;
const ASSIGNMENT_VALUE: usize = 1;

// field_access: [Ident, Dot, Ident]; array_access: [Ident, LBracket, expr, RBracket]
const ACCESS_BASE: usize = 0;
const FIELD_NAME: usize = 2;
const ARRAY_INDEX: usize = 2;

// func_call: [Ident, arg_list?]
const CALL_NAME: usize = 0;
const CALL_ARGUMENTS: usize = 1;

impl IrBuilder {
    pub(super) fn reduce_assignment(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        if tree.children.len() == 1 {
            return self.reduce_child(tree, 0);
        }

        let target = self.child_expression(tree, ASSIGNMENT_TARGET)?;
        let value = self.child_expression(tree, ASSIGNMENT_VALUE)?;
        Ok(Reduced::Expression(Expression::assignment(target, value)))
    }

    /// Fold `[e0, op1, e1, op2, e2, ...]` into `((e0 op1 e1) op2 e2) ...`
    pub(super) fn reduce_chain(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        if tree.children.len() % 2 == 0 {
            return Err(IrError::malformed(
                tree.rule,
                tree.loc,
                format!(
                    "operator chain has {} elements, expected an odd count",
                    tree.children.len()
                ),
            ));
        }

        let mut folded = self.child_expression(tree, 0)?;
        for operator_index in (1..tree.children.len()).step_by(2) {
            let operator = Self::child_token(tree, operator_index)?;
            let op = BinaryOperator::from_symbol(&operator.text).ok_or_else(|| {
                IrError::malformed(
                    tree.rule,
                    operator.loc,
                    format!("unknown binary operator '{}'", operator.text),
                )
            })?;
            let right = self.child_expression(tree, operator_index + 1)?;
            folded = Expression::binary(op, folded, right);
        }

        Ok(Reduced::Expression(folded))
    }

    /// The operator's side of the operand decides prefix or postfix
    pub(super) fn reduce_unary(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let (operator, operand, is_postfix) = match tree.children.as_slice() {
            [only] => return self.reduce(only),
            [operand, SyntaxNode::Token(operator)] => (operator, operand, true),
            [SyntaxNode::Token(operator), operand] => (operator, operand, false),
            _ => {
                return Err(IrError::malformed(
                    tree.rule,
                    tree.loc,
                    "expected an operand and an operator token",
                ))
            }
        };

        let op = UnaryOperator::from_symbol(&operator.text).ok_or_else(|| {
            IrError::malformed(
                tree.rule,
                operator.loc,
                format!("unknown unary operator '{}'", operator.text),
            )
        })?;
        let operand = self.reduce(operand)?.into_expression(tree)?;

        Ok(Reduced::Expression(Expression::UnaryOp {
            op,
            operand: Box::new(operand),
            is_postfix,
        }))
    }

    pub(super) fn reduce_primary(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        match self.reduce_child(tree, 0)? {
            Reduced::Token(token) => Ok(Reduced::Expression(Self::token_expression(tree, token)?)),
            // calls and accesses are already built
            Reduced::Expression(expression) => Ok(Reduced::Expression(expression)),
            other => Err(other.mismatch(tree, "a literal, an identifier or an expression")),
        }
    }

    fn token_expression(tree: &SyntaxTree, token: Token) -> Result<Expression, IrError> {
        match token.kind {
            TokenKind::Ident => Ok(Expression::Identifier(token.text)),
            TokenKind::Number | TokenKind::String => {
                Ok(Expression::Literal(Self::token_literal(tree, token)?))
            }
            kind => Err(IrError::malformed(
                tree.rule,
                token.loc,
                format!("unexpected {:?} token '{}'", kind, token.text),
            )),
        }
    }

    /// Numbers are always floating point; strings lose their quotes
    pub(super) fn token_literal(tree: &SyntaxTree, token: Token) -> Result<Literal, IrError> {
        match token.kind {
            TokenKind::Number => token
                .text
                .parse::<f64>()
                .map(Literal::Number)
                .map_err(|_| IrError::InvalidNumber {
                    text: token.text.clone(),
                    loc: token.loc,
                }),
            TokenKind::String => {
                let text = token.text.as_str();
                let unquoted = text
                    .strip_prefix('"')
                    .and_then(|rest| rest.strip_suffix('"'))
                    .unwrap_or(text);
                Ok(Literal::String(unquoted.to_string()))
            }
            kind => Err(IrError::malformed(
                tree.rule,
                token.loc,
                format!("expected a literal, found {:?} token '{}'", kind, token.text),
            )),
        }
    }

    pub(super) fn reduce_field_access(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let base = Self::child_ident(tree, ACCESS_BASE)?;
        let field = Self::child_ident(tree, FIELD_NAME)?;
        Ok(Reduced::Expression(Expression::FieldAccess {
            base: Box::new(Expression::Identifier(base)),
            field,
        }))
    }

    pub(super) fn reduce_array_access(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let base = Self::child_ident(tree, ACCESS_BASE)?;
        let index = self.child_expression(tree, ARRAY_INDEX)?;
        Ok(Reduced::Expression(Expression::ArrayAccess {
            base: Box::new(Expression::Identifier(base)),
            index: Box::new(index),
        }))
    }

    pub(super) fn reduce_function_call(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let name = Self::child_ident(tree, CALL_NAME)?;

        let mut args = Vec::new();
        for index in CALL_ARGUMENTS..tree.children.len() {
            match self.reduce_child(tree, index)? {
                Reduced::Arguments(grouped) => args.extend(grouped),
                other => args.push(other.into_expression(tree)?),
            }
        }

        Ok(Reduced::Expression(Expression::FunctionCall { name, args }))
    }

    pub(super) fn reduce_arguments(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let mut args = Vec::new();
        for child in &tree.children {
            args.push(self.reduce(child)?.into_expression(tree)?);
        }
        Ok(Reduced::Arguments(args))
    }
}
