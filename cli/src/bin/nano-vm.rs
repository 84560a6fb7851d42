//! Run a bytecode file on the Nano VM

use anyhow::Result;
use clap::Parser;
use nano_runtime::{IOHandler, VMConfig, VMState, VM};
use nano_spec::Program;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Execute Nano bytecode and print the final machine status
#[derive(Parser)]
#[command(name = "nano-vm", version)]
struct Args {
    /// Bytecode file produced by nano-asm
    bytecode: PathBuf,

    /// Fault after this many instructions
    #[arg(long)]
    max_cycles: Option<u64>,

    /// Stack size in pages
    #[arg(long, default_value_t = 1)]
    stack_pages: usize,

    /// Print the final status as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    state: &'a VMState,
    outputs: &'a [u64],
    error: Option<String>,
}

fn run(args: &Args, program: &Program) -> Result<bool> {
    let config = VMConfig {
        layout: nano_cli::layout_with_stack_pages(args.stack_pages)?,
        max_cycles: args.max_cycles,
    };

    // JSON mode carries the outputs in the report instead of echoing them
    let io = if args.json {
        IOHandler::new()
    } else {
        IOHandler::with_echo(std::io::stdout())
    };
    let mut vm = VM::new(program, config)?.with_io(io);
    let result = vm.run();

    if args.json {
        let report = Report {
            state: vm.state(),
            outputs: vm.io().outputs(),
            error: result.as_ref().err().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &result {
            Ok(_) => println!("VM halted!"),
            Err(e) => println!("{e}"),
        }
        print!("{}", vm.state());
    }

    Ok(result.is_ok())
}

fn main() -> ExitCode {
    let args = Args::parse();
    nano_cli::init_tracing(args.verbose);

    let program = match Program::read_from(&args.bytecode) {
        Ok(program) => program,
        Err(e) => {
            tracing::debug!("{}: {}", args.bytecode.display(), e);
            eprintln!("Unable to open file: {}", args.bytecode.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&args, &program) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
