use std::env;
use std::fs;
use std::io::{self, IsTerminal, Write};

use clap::Parser;

use bfc::{DEFAULT_TAPE_LEN, Machine, cli_util, compile, config, term::RawModeGuard};

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage: {0} [OPTIONS] <FILE>

Runs the Brainfuck program in FILE.

Options:
  -d, --debug              Trace execution step by step instead of performing I/O
      --dump               Print the compiled bytecode listing and exit
      --tape-size <CELLS>  Number of tape cells to allocate (default {1})
  -h, --help               Show this help

Notes:
  The tape starts zeroed with the pointer on cell 0. Cell arithmetic wraps
  modulo 256, moving the pointer off the tape aborts the run, and reading
  past the end of input stores a zero byte.

Exit status:
  0    the program ran to completion
  1    the file could not be read or the terminal could not be prepared
  2    the command line was malformed
  130  interrupted
  255  the program failed to compile or aborted at run time"#,
        program, DEFAULT_TAPE_LEN
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfc", disable_help_flag = true)]
struct Cli {
    /// Brainfuck source file to run.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Trace execution step by step without performing I/O.
    #[arg(short = 'd', long)]
    debug: bool,

    /// Print the compiled bytecode listing and exit.
    #[arg(long)]
    dump: bool,

    /// Number of tape cells to allocate.
    #[arg(long, value_name = "CELLS")]
    tape_size: Option<usize>,

    /// Show usage.
    #[arg(short = 'h', long, action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn main() {
    let program = env::args().next().unwrap_or_else(|| String::from("bfc"));
    let cli = Cli::parse();
    std::process::exit(run_with_args(&program, cli));
}

fn run_with_args(program: &str, args: Cli) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let Cli {
        file,
        debug,
        dump,
        tape_size,
        ..
    } = args;

    let Some(path) = file else {
        usage_and_exit(program, 2);
    };

    let tape_len = match tape_size {
        Some(0) => {
            eprintln!("{program}: --tape-size must be at least 1");
            usage_and_exit(program, 2);
        }
        Some(cells) => cells,
        None => config::settings().tape_size.unwrap_or(DEFAULT_TAPE_LEN),
    };

    let source = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{program}: failed to read {path}: {e}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    let compiled = match compile(&source) {
        Ok(compiled) => compiled,
        Err(e) => {
            cli_util::report_compile_error(program, &source, &e);
            return 255;
        }
    };

    if dump {
        for (index, instruction) in compiled.instructions().iter().enumerate() {
            println!("{index:>5}: {instruction}");
        }
        let _ = io::stdout().flush();
        return 0;
    }

    if debug {
        let mut machine = Machine::new_with_tape(&compiled, io::empty(), io::sink(), tape_len);
        return match machine.run_debug() {
            Ok(()) => {
                let _ = io::stdout().flush();
                0
            }
            Err(e) => {
                cli_util::report_runtime_error(program, &source, &compiled, &e);
                255
            }
        };
    }

    // Raw mode only matters when the program reads keys from a real
    // terminal; piped input runs cooked.
    let raw_guard = if compiled.reads_input() && io::stdin().is_terminal() {
        if let Err(e) = ctrlc::set_handler(|| {
            let _ = crossterm::terminal::disable_raw_mode();
            let _ = io::stdout().flush();
            std::process::exit(130);
        }) {
            eprintln!("{program}: failed to install the interrupt handler: {e}");
            return 1;
        }
        match RawModeGuard::acquire() {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("{program}: failed to switch the terminal to raw mode: {e}");
                return 1;
            }
        }
    } else {
        None
    };

    let mut machine =
        Machine::new_with_tape(&compiled, io::stdin().lock(), io::stdout().lock(), tape_len);
    let result = machine.run();
    // Restore the terminal before anything else prints.
    drop(raw_guard);
    drop(machine);

    match result {
        Ok(()) => {
            // Keep the shell prompt off the program's last output line.
            println!();
            let _ = io::stdout().flush();
            0
        }
        Err(e) => {
            cli_util::report_runtime_error(program, &source, &compiled, &e);
            255
        }
    }
}
