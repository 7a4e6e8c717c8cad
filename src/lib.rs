//! Middle section of the Hintz compiler: a generic syntax tree is reduced into
//! a typed IR under a scoped symbol table, and every function of the IR gets a
//! statement-level control-flow graph.

pub mod driver;
pub mod errors;
pub mod frontend;
pub mod midend;
mod trace;

pub use driver::{compile_file, compile_source, compile_syntax_tree, control_flow_graphs, Compilation};
pub use errors::CompileError;
