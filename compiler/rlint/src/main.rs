//! rlint CLI
//!
//! Static analysis for R source files.

use std::path::Path;
use std::process::ExitCode;

use rlint::commands::{lex_file, parse_check_args, parse_file, run_check};
use rlint::tracing_setup::init_tracing;
use rlint::CliError;
use rlint_parse::ParseOptions;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let command = args[1].as_str();
    let result = match command {
        "check" => parse_check_args(&args[2..]).and_then(|config| run_check(&config)).map(
            |summary| {
                if summary.is_failure() {
                    ExitCode::FAILURE
                } else {
                    ExitCode::SUCCESS
                }
            },
        ),
        "parse" => match args.get(2) {
            Some(path) => {
                let options = if args[3..].iter().any(|arg| arg == "--style") {
                    ParseOptions::default().with_style(true)
                } else {
                    ParseOptions::default()
                };
                parse_file(Path::new(path), &options).map(|()| ExitCode::SUCCESS)
            }
            None => Err(CliError::usage("Usage: rlint parse <file.R> [--style]")),
        },
        "lex" => match args.get(2) {
            Some(path) => lex_file(Path::new(path)).map(|()| ExitCode::SUCCESS),
            None => Err(CliError::usage("Usage: rlint lex <file.R>")),
        },
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(ExitCode::SUCCESS)
        }
        "version" | "--version" | "-V" => {
            println!("rlint {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
        _ => Err(CliError::usage(format!("Unknown command: {command}"))),
    };

    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            if error.is_usage() {
                eprintln!();
                print_usage();
            }
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("rlint - static analysis for R");
    println!();
    println!("Usage: rlint <command> [options]");
    println!();
    println!("Commands:");
    println!("  check [paths...]     Lint R files and directories (default: .)");
    println!("  parse <file.R>       Show the scope tree and structural lint");
    println!("  lex <file.R>         Tokenize and display tokens");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check options:");
    println!("  --json               Emit lint as JSON");
    println!("  --style              Also report whitespace style lint");
    println!("  --all                Enable every check, unused definitions included");
    println!("  --syntax-only        Only report structural problems");
    println!("  --globals=a,b        Treat names as defined everywhere");
    println!("  --color=<mode>       auto, always or never");
    println!("  --no-parallel        Check files one at a time");
    println!();
    println!("Logging:");
    println!("  RUST_LOG=rlint_parse=debug   Enable tracing output");
    println!("  RLINT_LOG_TREE=1             Indented span tree instead of flat lines");
}
