use std::path::PathBuf;

use crate::{
    driver::{compile_file, compile_source, compile_syntax_tree, control_flow_graphs},
    errors::CompileError,
    frontend::{
        parser::ParseError, preprocessor::PreprocessorOptions, sourceloc::SourceLoc,
        syntax_tree::{Rule, SyntaxTree},
    },
    midend::{control_flow::CfgError, ir_builder::IrError, symtab::SymbolError},
};

fn scratch_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "hintz-driver-{}-{}",
        test_name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn compiles_source_to_graphs() {
    let compilation =
        compile_source("int main(){ int x; int i; for(i=0;i<5;i++){x=i;} return x; }").unwrap();

    assert_eq!(compilation.syntax_tree.rule, Rule::Program);
    assert!(compilation.globals.lookup("main").is_some());
    // locals were popped with the function scope
    assert!(compilation.globals.lookup("x").is_none());

    let graphs = control_flow_graphs(&compilation.program).unwrap();
    assert_eq!(graphs.len(), 1);
    assert_eq!(graphs[0].function(), "main");
    assert_eq!(graphs[0].nodes().len(), 8);
}

#[test]
fn one_graph_per_function() {
    let compilation = compile_source(
        "struct P { int x; }; void f() { return; } int g; int h(int a) { return a; }",
    )
    .unwrap();

    let graphs = control_flow_graphs(&compilation.program).unwrap();
    let names: Vec<&str> = graphs.iter().map(|graph| graph.function()).collect();
    assert_eq!(names, vec!["f", "h"]);
}

#[test]
fn graphs_need_a_leading_function() {
    let empty = compile_source("").unwrap();
    assert_eq!(control_flow_graphs(&empty.program).unwrap_err(), CfgError::NoFunction);

    let global_first = compile_source("int g; void f() { }").unwrap();
    assert_eq!(
        control_flow_graphs(&global_first.program).unwrap_err(),
        CfgError::FirstDeclarationNotFunction {
            found: "g".into()
        }
    );
}

#[test]
fn stage_errors_convert() {
    assert!(matches!(
        compile_source("int x"),
        Err(CompileError::Parse(ParseError::UnexpectedToken(_)))
    ));
    assert!(matches!(
        compile_source("int x; float x;"),
        Err(CompileError::Ir(IrError::Symbol(
            SymbolError::DuplicateSymbol { .. }
        )))
    ));
}

#[test]
fn compiles_preprocessed_files() {
    let dir = scratch_dir("preprocessed");
    std::fs::write(dir.join("limits.hz"), "#define LIMIT 5\nint counter;\n").unwrap();
    std::fs::write(
        dir.join("main.hz"),
        "#include \"limits.hz\"\nint main() { return LIMIT; }\n",
    )
    .unwrap();

    let compilation = compile_file(&dir.join("main.hz"), PreprocessorOptions::default()).unwrap();
    assert!(compilation.globals.lookup("counter").is_some());

    // the global pulled in by the include comes first
    assert!(matches!(
        control_flow_graphs(&compilation.program),
        Err(CfgError::FirstDeclarationNotFunction { .. })
    ));
    let main = compilation.program.functions().next().unwrap();
    assert_eq!(main.body.statements[0].to_string(), "return 5.0");
}

#[test]
fn rejects_other_extensions() {
    let dir = scratch_dir("extension");
    let path = dir.join("main.c");
    std::fs::write(&path, "int main() { }").unwrap();

    assert!(matches!(
        compile_file(&path, PreprocessorOptions::default()),
        Err(CompileError::NotHintzSource(rejected)) if rejected == path
    ));
}

#[test]
fn compiles_json_syntax_trees() {
    let dir = scratch_dir("json");
    let source = compile_source("void f() { a = 1; }").unwrap();
    let path = dir.join("tree.json");
    std::fs::write(&path, serde_json::to_string(&source.syntax_tree).unwrap()).unwrap();

    let from_json = compile_file(&path, PreprocessorOptions::default()).unwrap();
    assert_eq!(from_json.program, source.program);

    std::fs::write(&path, "{ \"rule\": \"not_a_rule\" }").unwrap();
    assert!(matches!(
        compile_file(&path, PreprocessorOptions::default()),
        Err(CompileError::SyntaxTreeJson(_))
    ));
}

#[test]
fn compiles_handmade_trees() {
    let tree = SyntaxTree::new(Rule::Program, SourceLoc::none(), Vec::new());
    let compilation = compile_syntax_tree(tree).unwrap();
    assert!(compilation.program.declarations.is_empty());
    assert!(compilation.globals.is_empty());
}
