//! `ls8` - run an LS-8 program from the command line.
//!
//! Exit status:
//! - 0: program halted normally
//! - 1: usage error
//! - 2: program file missing, unreadable or malformed
//! - 3: the program faulted while running

use clap::Parser;
use log::LevelFilter;
use ls8::{disassemble, format_listing, load_program_file, FlatMemory, RunOptions, CPU};
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_USAGE: u8 = 1;
const EXIT_LOAD: u8 = 2;
const EXIT_EXECUTION: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "ls8", version, about = "Run an LS-8 program.")]
struct Args {
    /// Program file: one binary byte per line, `#` starts a comment.
    #[arg(value_name = "PROGRAM")]
    program: PathBuf,

    /// Print a TRACE line with PC, upcoming bytes and registers before every instruction.
    #[arg(long, default_value_t = false)]
    trace: bool,

    /// Stop with an error if the program has not halted after N instructions.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,

    /// Print a disassembly listing of the program instead of running it.
    #[arg(long, default_value_t = false)]
    disassemble: bool,

    /// Log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version also arrive here and are not failures
            let code = if e.use_stderr() { EXIT_USAGE } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    if let Err(e) = SimpleLogger::new().with_level(log_level(args.verbose)).env().init() {
        eprintln!("warning: logging disabled: {}", e);
    }

    let program = match load_program_file(&args.program) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_LOAD);
        }
    };

    if args.disassemble {
        print!("{}", format_listing(&disassemble(&program, 0)));
        return ExitCode::SUCCESS;
    }

    let mut cpu = CPU::new(FlatMemory::new());
    if let Err(e) = cpu.load(&program, 0) {
        eprintln!("error: {}", e);
        return ExitCode::from(EXIT_LOAD);
    }

    if args.trace {
        cpu.set_trace_callback(|snapshot| println!("{}", snapshot));
    }

    let options = RunOptions {
        max_steps: args.max_steps,
        trace: args.verbose >= 3,
    };

    match cpu.run_with_options(&options) {
        Ok(steps) => {
            log::info!("halted after {} instructions", steps);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", cpu.fault_report(&e));
            ExitCode::from(EXIT_EXECUTION)
        }
    }
}
