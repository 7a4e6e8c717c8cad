//! End-to-end entry points: source text or an external syntax tree in,
//! IR and per-function control-flow graphs out.

use std::path::Path;

use crate::{
    errors::CompileError,
    frontend::{
        preprocessor::{Preprocessor, PreprocessorOptions},
        syntax_tree::SyntaxTree,
        Parser,
    },
    midend::{
        control_flow::{CfgError, ControlFlowGraph},
        ir::{Declaration, Program},
        ir_builder::IrBuilder,
        symtab::SymbolTable,
    },
    trace,
};

#[cfg(test)]
mod tests;

pub const SOURCE_EXTENSION: &str = "hz";
pub const SYNTAX_TREE_EXTENSION: &str = "json";

#[derive(Debug)]
pub struct Compilation {
    pub syntax_tree: SyntaxTree,
    pub program: Program,
    /// What is left of the symbol table once every function scope is popped
    pub globals: SymbolTable,
}

/// Parse and reduce already preprocessed source text
pub fn compile_source(source: &str) -> Result<Compilation, CompileError> {
    let syntax_tree = {
        let _span = trace::span_auto!(trace::Level::DEBUG, "Parse");
        Parser::from_string(source).parse()?
    };

    compile_syntax_tree(syntax_tree)
}

/// Compile a `.hz` file, or reduce a `.json` syntax tree produced elsewhere
pub fn compile_file(path: &Path, options: PreprocessorOptions) -> Result<Compilation, CompileError> {
    match path.extension().and_then(|extension| extension.to_str()) {
        Some(SOURCE_EXTENSION) => {
            let source = {
                let _span = trace::span_auto!(trace::Level::DEBUG, "Preprocess", path = %path.display());
                Preprocessor::new(options).preprocess_file(path)?
            };
            compile_source(&source)
        }
        Some(SYNTAX_TREE_EXTENSION) => {
            let json = std::fs::read_to_string(path).map_err(|error| CompileError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            let syntax_tree: SyntaxTree = serde_json::from_str(&json)?;
            compile_syntax_tree(syntax_tree)
        }
        _ => Err(CompileError::NotHintzSource(path.to_path_buf())),
    }
}

pub fn compile_syntax_tree(syntax_tree: SyntaxTree) -> Result<Compilation, CompileError> {
    let mut builder = IrBuilder::new();
    let program = builder.build_program(&syntax_tree)?;

    Ok(Compilation {
        syntax_tree,
        program,
        globals: builder.into_symbol_table().into_global(),
    })
}

/// One graph per function, in declaration order. The program must open with a
/// function; global variables may only follow it.
pub fn control_flow_graphs(program: &Program) -> Result<Vec<ControlFlowGraph<'_>>, CfgError> {
    match program.declarations.first() {
        None => Err(CfgError::NoFunction),
        Some(Declaration::Variable(variable)) => Err(CfgError::FirstDeclarationNotFunction {
            found: variable.name.clone(),
        }),
        Some(Declaration::Function(_)) => {
            let _span = trace::span_auto!(trace::Level::DEBUG, "Build CFGs");
            Ok(program.functions().map(ControlFlowGraph::build).collect())
        }
    }
}
