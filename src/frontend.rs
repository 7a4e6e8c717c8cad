pub mod lexer;
pub mod parser;
pub mod preprocessor;
pub mod sourceloc;
pub mod syntax_tree;

pub use lexer::Lexer;
pub use parser::Parser;
pub use preprocessor::{Preprocessor, PreprocessorOptions};
