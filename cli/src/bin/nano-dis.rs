//! Print a listing of a bytecode file

use anyhow::{Context, Result};
use clap::Parser;
use nano_disassembler::disassemble;
use nano_spec::Program;
use std::path::PathBuf;
use std::process::ExitCode;

/// Disassemble Nano bytecode
#[derive(Parser)]
#[command(name = "nano-dis", version)]
struct Args {
    /// Bytecode file
    bytecode: PathBuf,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(args: &Args) -> Result<()> {
    let program = Program::read_from(&args.bytecode)
        .with_context(|| format!("Unable to open file: {}", args.bytecode.display()))?;
    print!("{}", disassemble(&program));
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
