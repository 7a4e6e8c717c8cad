use std::path::PathBuf;

use crate::{
    frontend::{parser::ParseError, preprocessor::PreprocessError},
    midend::{control_flow::CfgError, ir_builder::IrError},
};

/// Any failure along the pipeline, tagged by the stage it came from
pub enum CompileError {
    NotHintzSource(PathBuf),
    Io { path: PathBuf, error: std::io::Error },
    Preprocess(PreprocessError),
    Parse(ParseError),
    Ir(IrError),
    ControlFlow(CfgError),
    SyntaxTreeJson(serde_json::Error),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotHintzSource(path) => write!(
                f,
                "{} is not a Hintz source file (expected a .hz extension)",
                path.display()
            ),
            Self::Io { path, error } => write!(f, "Error reading {}: {}", path.display(), error),
            Self::Preprocess(error) => write!(f, "Preprocessing failed: {}", error),
            Self::Parse(error) => write!(f, "Parsing failed: {}", error),
            Self::Ir(error) => write!(f, "IR generation failed: {}", error),
            Self::ControlFlow(error) => write!(f, "CFG generation failed: {}", error),
            Self::SyntaxTreeJson(error) => write!(f, "Invalid syntax tree JSON: {}", error),
        }
    }
}

impl std::fmt::Debug for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<PreprocessError> for CompileError {
    fn from(error: PreprocessError) -> Self {
        Self::Preprocess(error)
    }
}

impl From<ParseError> for CompileError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

impl From<IrError> for CompileError {
    fn from(error: IrError) -> Self {
        Self::Ir(error)
    }
}

impl From<CfgError> for CompileError {
    fn from(error: CfgError) -> Self {
        Self::ControlFlow(error)
    }
}

impl From<serde_json::Error> for CompileError {
    fn from(error: serde_json::Error) -> Self {
        Self::SyntaxTreeJson(error)
    }
}
