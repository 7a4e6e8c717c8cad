pub mod control_flow;
pub mod ir;
pub mod ir_builder;
pub mod symtab;
