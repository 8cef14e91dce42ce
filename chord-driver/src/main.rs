//! Chord Compiler Driver
//!
//! Reads a program in the parser's JSON AST format, lowers it to IR, and
//! writes the module as textual IR or JSON. `--run` executes a function of
//! the lowered module with the reference interpreter.

use chord_common::CompilerError;
use chord_frontend::ir::{Interpreter, Module};
use chord_frontend::Frontend;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EmitFormat {
    /// Textual IR
    Ir,
    /// The module serialized as JSON
    Json,
}

impl EmitFormat {
    fn extension(self) -> &'static str {
        match self {
            EmitFormat::Ir => "ir",
            EmitFormat::Json => "json",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "chordc")]
#[command(about = "Chord Compiler")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input program (JSON AST)
    input: PathBuf,

    /// Output file; defaults to the input path with the emit format's extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Artifact format
    #[arg(long, value_enum, default_value_t = EmitFormat::Ir)]
    emit: EmitFormat,

    /// Print IR to stdout
    #[arg(long)]
    print_ir: bool,

    /// Execute FUNCTION (no arguments) with the IR interpreter and print its result
    #[arg(long, value_name = "FUNCTION")]
    run: Option<String>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = compile(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn compile(cli: &Cli) -> Result<(), CompilerError> {
    info!("Compiling {}", cli.input.display());
    let source = fs::read_to_string(&cli.input)?;

    let program = Frontend::parse_ast_json(&source)?;
    debug!("Decoded {} top-level item(s)", program.items.len());

    let module = Frontend::lower_program(&program, &module_name(&cli.input))?;
    info!("Lowered {} function(s)", module.functions.len());

    if cli.print_ir {
        println!("{module}");
    }

    if let Some(function) = &cli.run {
        let mut interpreter = Interpreter::new(&module);
        match interpreter.call(function, &[])? {
            Some(value) => println!("{function}() = {value}"),
            None => println!("{function}() returned"),
        }
    }

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input, cli.emit));
    fs::write(&output_path, render(&module, cli.emit)?)?;
    info!("Wrote {}", output_path.display());

    Ok(())
}

fn module_name(input: &Path) -> String {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string())
}

/// Input path with the format's extension; never the input itself
fn default_output(input: &Path, format: EmitFormat) -> PathBuf {
    let path = input.with_extension(format.extension());
    if path == input {
        input.with_extension(format!("module.{}", format.extension()))
    } else {
        path
    }
}

fn render(module: &Module, format: EmitFormat) -> Result<String, CompilerError> {
    match format {
        EmitFormat::Ir => Ok(module.to_string()),
        EmitFormat::Json => serde_json::to_string_pretty(module)
            .map_err(|e| CompilerError::InternalError { message: e.to_string() }),
    }
}
