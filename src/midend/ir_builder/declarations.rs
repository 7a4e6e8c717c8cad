use indexmap::IndexMap;

use crate::{
    frontend::syntax_tree::{Rule, SyntaxNode, SyntaxTree, TokenKind},
    midend::{
        ir::{
            AttributeValue, Block, Declaration, Function, Program, Statement, Variable,
            ATTRIBUTE_DIMENSIONS, ATTRIBUTE_FIELDS, ATTRIBUTE_PARAMS,
        },
        symtab::{Symbol, STRUCT_KIND},
    },
    trace,
};

use super::{IrBuilder, IrError, Reduced};

// struct_def: [Ident, LBrace, struct_body, RBrace]
const STRUCT_NAME: usize = 0;
const STRUCT_BODY: usize = 2;

// function_def: [type_specifier, Ident, LParen, param_list?, RParen, compound_stmt]
const FUNCTION_RETURN_TYPE: usize = 0;
const FUNCTION_NAME: usize = 1;
const FUNCTION_PARAMS: usize = 3;
const FUNCTION_BODY_WITHOUT_PARAMS: usize = 4;
const FUNCTION_BODY_WITH_PARAMS: usize = 5;

// declaration: [type_specifier, declarator_list]
const DECLARATION_TYPE: usize = 0;
const DECLARATION_DECLARATORS: usize = 1;

// param: [type_specifier, Ident]
const PARAM_TYPE: usize = 0;
const PARAM_NAME: usize = 1;

impl IrBuilder {
    pub(super) fn reduce_program(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let mut declarations = Vec::new();

        for child in &tree.children {
            match self.reduce(child)? {
                Reduced::Function(function) => declarations.push(Declaration::Function(function)),
                // struct definitions only leave a symbol behind
                Reduced::Absent => (),
                other => {
                    for statement in other.into_statements(tree)? {
                        match statement {
                            Statement::Variable(global) => {
                                declarations.push(Declaration::Variable(global))
                            }
                            statement => {
                                return Err(IrError::malformed(
                                    tree.rule,
                                    tree.loc,
                                    format!("statement '{}' outside of a function", statement),
                                ))
                            }
                        }
                    }
                }
            }
        }

        Ok(Reduced::Program(Program { declarations }))
    }

    pub(super) fn reduce_struct_definition(
        &mut self,
        tree: &SyntaxTree,
    ) -> Result<Reduced, IrError> {
        let name = Self::child_ident(tree, STRUCT_NAME)?;
        let fields = match self.reduce_child(tree, STRUCT_BODY)? {
            Reduced::Fields(fields) => fields,
            other => return Err(other.mismatch(tree, "a struct body")),
        };

        trace::debug!("struct {} with {} fields", name, fields.len());
        let fields: IndexMap<String, String> = fields.into_iter().collect();
        self.symtab.define(
            Symbol::new(name, STRUCT_KIND)
                .with_attribute(ATTRIBUTE_FIELDS, AttributeValue::Fields(fields)),
        )?;

        Ok(Reduced::Absent)
    }

    // repeating (type_specifier, Ident, Semicolon)
    pub(super) fn reduce_struct_body(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let mut fields = Vec::new();
        for field in tree.children.chunks(3) {
            let [field_type, field_name, ..] = field else {
                return Err(IrError::malformed(
                    tree.rule,
                    tree.loc,
                    "field without a name",
                ));
            };

            let field_type = self.reduce(field_type)?.into_type_specifier(tree)?;
            let field_name = match field_name {
                SyntaxNode::Token(token) if token.kind == TokenKind::Ident => token.text.clone(),
                _ => {
                    return Err(IrError::malformed(
                        tree.rule,
                        tree.loc,
                        "expected a field name",
                    ))
                }
            };
            fields.push((field_name, field_type));
        }

        Ok(Reduced::Fields(fields))
    }

    /// `type_specifier` yields its type name, `struct_type` yields `struct NAME`
    pub(super) fn reduce_type_specifier(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        if tree.children.is_empty() {
            return Err(IrError::MalformedType(tree.loc));
        }

        let type_spec = match tree.rule {
            Rule::StructType => format!("struct {}", Self::child_ident(tree, 0)?),
            _ => match self.reduce_child(tree, 0)? {
                Reduced::Token(token) => token.text,
                Reduced::TypeSpecifier(type_spec) => type_spec,
                other => return Err(other.mismatch(tree, "a type name")),
            },
        };

        Ok(Reduced::TypeSpecifier(type_spec))
    }

    pub(super) fn reduce_declaration(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let type_spec = self
            .reduce_child(tree, DECLARATION_TYPE)?
            .into_type_specifier(tree)?;
        let declarators = self
            .reduce_child(tree, DECLARATION_DECLARATORS)?
            .into_variables(tree)?;

        let mut declared = Vec::new();
        for mut variable in declarators {
            // arrays are recorded under their element type
            let mut symbol = Symbol::new(variable.name.clone(), type_spec.clone());
            if let Some(dimensions) = variable.dimensions() {
                symbol = symbol.with_attribute(
                    ATTRIBUTE_DIMENSIONS,
                    AttributeValue::Dimensions(dimensions.to_vec()),
                );
            }
            self.symtab.define(symbol)?;

            variable.type_spec = Some(type_spec.clone());
            declared.push(Statement::Variable(variable));
        }

        Ok(Reduced::Statements(declared))
    }

    pub(super) fn reduce_variable_list(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let mut variables = Vec::new();
        for child in &tree.children {
            variables.extend(self.reduce(child)?.into_variables(tree)?);
        }
        Ok(Reduced::Variables(variables))
    }

    // [Ident] or [Ident, Number+]
    pub(super) fn reduce_declarator(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let mut variable = Variable::new(Self::child_ident(tree, 0)?);

        let mut dimensions = Vec::new();
        for index in 1..tree.children.len() {
            let token = Self::child_token(tree, index)?;
            let dimension = token
                .text
                .parse::<u64>()
                .map_err(|_| IrError::InvalidDimension {
                    text: token.text.clone(),
                    loc: token.loc,
                })?;
            dimensions.push(dimension);
        }

        if !dimensions.is_empty() {
            variable.attributes.insert(
                ATTRIBUTE_DIMENSIONS.into(),
                AttributeValue::Dimensions(dimensions),
            );
        }

        Ok(Reduced::Declarator(variable))
    }

    pub(super) fn reduce_param(&mut self, tree: &SyntaxTree) -> Result<Reduced, IrError> {
        let type_spec = self.reduce_child(tree, PARAM_TYPE)?.into_type_specifier(tree)?;
        let name = Self::child_ident(tree, PARAM_NAME)?;
        Ok(Reduced::Declarator(Variable::typed(name, type_spec)))
    }

    /// The function symbol goes into the enclosing scope; parameters and the
    /// body's top-level declarations share one new scope that lives until the
    /// body is built.
    pub(super) fn reduce_function_definition(
        &mut self,
        tree: &SyntaxTree,
    ) -> Result<Reduced, IrError> {
        let return_type = self
            .reduce_child(tree, FUNCTION_RETURN_TYPE)?
            .into_type_specifier(tree)?;
        let name = Self::child_ident(tree, FUNCTION_NAME)?;

        let _span = trace::span_auto!(trace::Level::DEBUG, "Build function", function = %name);

        let (params, body_index) = if tree.children.len() > FUNCTION_BODY_WITH_PARAMS {
            let params = self
                .reduce_child(tree, FUNCTION_PARAMS)?
                .into_variables(tree)?;
            (params, FUNCTION_BODY_WITH_PARAMS)
        } else {
            (Vec::new(), FUNCTION_BODY_WITHOUT_PARAMS)
        };

        let body_tree = match Self::child(tree, body_index)? {
            SyntaxNode::Tree(body) if body.rule == Rule::CompoundStmt => body,
            _ => {
                return Err(IrError::malformed(
                    tree.rule,
                    tree.loc,
                    format!("expected a compound statement body at child {}", body_index),
                ))
            }
        };

        self.symtab.define(
            Symbol::new(name.clone(), return_type.clone())
                .with_attribute(ATTRIBUTE_PARAMS, AttributeValue::Params(params.clone())),
        )?;

        self.symtab.push_scope();
        let body = self.reduce_function_body(&params, body_tree);
        self.symtab.pop_scope()?;

        Ok(Reduced::Function(Function {
            return_type,
            name,
            params,
            body: body?,
        }))
    }

    fn reduce_function_body(
        &mut self,
        params: &[Variable],
        body: &SyntaxTree,
    ) -> Result<Block, IrError> {
        for param in params {
            self.symtab.define(Symbol::new(
                param.name.clone(),
                param.type_spec.clone().unwrap_or_default(),
            ))?;
        }

        self.reduce_block_items(body)
    }
}
