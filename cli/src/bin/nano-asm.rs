//! Assemble a source file into bytecode

use anyhow::{Context, Result};
use clap::Parser;
use nano_assembler::{assemble_file, output_path};
use std::path::PathBuf;
use std::process::ExitCode;

/// Assemble Nano source into a headerless bytecode file
#[derive(Parser)]
#[command(name = "nano-asm", version)]
struct Args {
    /// Assembly source file
    source: PathBuf,

    /// Output path (defaults to the source path with a `.bin` extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    let program = assemble_file(&args.source)
        .with_context(|| format!("failed to assemble {}", args.source.display()))?;

    let out = args.output.clone().unwrap_or_else(|| output_path(&args.source));
    program
        .write_to(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;

    tracing::info!(bytes = program.len(), path = %out.display(), "wrote bytecode");
    println!("Bytecode assembled!");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    nano_cli::init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
