use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use hintz::{
    driver, frontend::PreprocessorOptions, midend::control_flow::CfgError, CompileError,
};

const TRACE_FILE: &str = "most_recent";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TraceLocation {
    None,
    Stdout,
    File,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TraceLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<TraceLevel> for tracing::Level {
    fn from(level: TraceLevel) -> Self {
        match level {
            TraceLevel::Trace => tracing::Level::TRACE,
            TraceLevel::Debug => tracing::Level::DEBUG,
            TraceLevel::Info => tracing::Level::INFO,
            TraceLevel::Warn => tracing::Level::WARN,
            TraceLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Build the IR and per-function control-flow graphs of a Hintz program
#[derive(Debug, Parser)]
#[command(name = "hintz", version)]
struct CompilerArguments {
    /// Hintz source file (.hz) or a serialized syntax tree (.json)
    source: PathBuf,

    /// Additional directory to search for #include files
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    include_paths: Vec<PathBuf>,

    /// Print the IR as JSON
    #[arg(long)]
    emit_ir: bool,

    /// Print the control-flow graph of every function
    #[arg(long)]
    cfg: bool,

    /// Write one graphviz file per function into this directory
    #[arg(long, value_name = "DIR")]
    dot: Option<PathBuf>,

    /// Print the syntax tree and the global symbol table
    #[arg(long)]
    debug: bool,

    #[arg(long, value_enum, default_value_t = TraceLocation::None)]
    trace: TraceLocation,

    #[arg(long, value_enum, default_value_t = TraceLevel::Warn)]
    trace_level: TraceLevel,
}

enum CliError {
    Compile(CompileError),
    Write { path: PathBuf, error: std::io::Error },
    Serialize(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compile(error) => write!(f, "{}", error),
            Self::Write { path, error } => write!(f, "Error writing {}: {}", path.display(), error),
            Self::Serialize(error) => write!(f, "Error serializing output: {}", error),
        }
    }
}

impl std::fmt::Debug for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl From<CompileError> for CliError {
    fn from(error: CompileError) -> Self {
        Self::Compile(error)
    }
}

impl From<CfgError> for CliError {
    fn from(error: CfgError) -> Self {
        Self::Compile(CompileError::from(error))
    }
}

fn init_tracing(arguments: &CompilerArguments) -> Result<(), CliError> {
    let level = tracing::Level::from(arguments.trace_level);

    match arguments.trace {
        TraceLocation::None => (),
        TraceLocation::Stdout => {
            tracing_subscriber::fmt()
                .pretty()
                .with_writer(std::io::stdout)
                .with_max_level(level)
                .init();
        }
        TraceLocation::File => {
            let outfile = std::fs::File::create(TRACE_FILE).map_err(|error| CliError::Write {
                path: PathBuf::from(TRACE_FILE),
                error,
            })?;
            let writer =
                tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::sync::Mutex::new(outfile));
            tracing_subscriber::fmt()
                .with_writer(writer)
                .with_max_level(level)
                .init();
        }
    }

    Ok(())
}

fn run(arguments: &CompilerArguments) -> Result<(), CliError> {
    let options = PreprocessorOptions {
        include_paths: arguments.include_paths.clone(),
    };
    let compilation = driver::compile_file(&arguments.source, options)?;

    if arguments.debug {
        print!("{}", compilation.syntax_tree.pretty());
        println!(
            "{}",
            serde_json::to_string_pretty(&compilation.globals).map_err(CliError::Serialize)?
        );
    }

    if arguments.emit_ir {
        println!(
            "{}",
            serde_json::to_string_pretty(&compilation.program).map_err(CliError::Serialize)?
        );
    }

    if !arguments.cfg && arguments.dot.is_none() {
        return Ok(());
    }

    if let Some(dir) = &arguments.dot {
        std::fs::create_dir_all(dir).map_err(|error| CliError::Write {
            path: dir.clone(),
            error,
        })?;
    }

    for graph in driver::control_flow_graphs(&compilation.program)? {
        for warning in graph.warnings() {
            eprintln!("warning: in {}: {}", graph.function(), warning);
        }

        if arguments.cfg {
            print!("{}", graph);
        }

        if let Some(dir) = &arguments.dot {
            let path = dir.join(graph.function()).with_extension("dot");
            std::fs::write(&path, graph.graphviz_string())
                .map_err(|error| CliError::Write { path, error })?;
        }
    }

    Ok(())
}

fn main() {
    let arguments = CompilerArguments::parse();

    let result = init_tracing(&arguments).and_then(|()| run(&arguments));
    if let Err(error) = result {
        eprintln!("hintz: {}", error);
        std::process::exit(1);
    }
}
