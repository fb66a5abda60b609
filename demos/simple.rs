//  SIMPLE.rs
//    by Lut99
//
//  Created:
//    16 Jun 2025, 14:21:09
//  Last edited:
//    18 Jun 2025, 11:15:30
//  Auto updated?
//    Yes
//
//  Description:
//!   Checks the syntax of SIMPLE source files by tokenizing them and
//!   running the tokens through the pushdown parser.
//

use std::fs;
use std::path::PathBuf;

use clap::Parser as _;
use computation::simple::lexer::LexicalAnalyzer;
use computation::simple::parser::Parser;
use console::style;
use error_trace::toplevel;
use humanlog::{DebugMode, HumanLogger};
use log::{debug, error, info};


/***** ARGUMENTS *****/
/// Defines arguments to the checker.
#[derive(Debug, clap::Parser)]
pub struct Arguments {
    /// If given, enables more verbose logging.
    #[clap(long, global = true)]
    debug: bool,
    /// If given, prints the tokens found in every file.
    #[clap(short, long)]
    tokens: bool,

    /// The path(s) to the file(s) to check.
    #[clap(name = "PATHS")]
    paths: Vec<PathBuf>,
}





/***** ENTRYPOINT *****/
fn main() {
    // Parse the CLI arguments
    let args = Arguments::parse();

    // Setup the logger
    if let Err(err) = HumanLogger::terminal(if args.debug { DebugMode::Full } else { DebugMode::HumanFriendly }).init() {
        eprintln!("WARNING: Failed to setup logger: {err} (no logging for this session)");
    }
    info!("computation {} - v{}", env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"));

    // Early quit if no files are given
    if args.paths.is_empty() {
        println!("No files are given; nothing to do.");
        std::process::exit(0);
    }

    // Build the machinery once
    let lexer = LexicalAnalyzer::simple();
    let parser = Parser::simple();

    // Check the files one-by-one
    let mut failures: usize = 0;
    for path in &args.paths {
        debug!("Reading input file '{}'...", path.display());
        let source: String = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                error!("{}", toplevel!(("Failed to load input file '{}'", path.display()), err));
                failures += 1;
                continue;
            },
        };

        debug!("Tokenizing file '{}'...", path.display());
        let tokens: Vec<char> = match lexer.analyze(&source) {
            Ok(tokens) => tokens,
            Err(err) => {
                error!("{}", toplevel!(("Failed to tokenize input file '{}'", path.display()), err));
                failures += 1;
                continue;
            },
        };
        if args.tokens {
            println!("{}: {}", style(path.display()).bold(), tokens.iter().collect::<String>());
        }

        debug!("Parsing {} token(s) of file '{}'...", tokens.len(), path.display());
        if parser.accepts(tokens) {
            println!("{} {}", style("OK  ").green().bold(), path.display());
        } else {
            println!("{} {}", style("FAIL").red().bold(), path.display());
            failures += 1;
        }
    }

    // Report
    if failures > 0 {
        error!("{failures} out of {} file(s) did not check out", args.paths.len());
        std::process::exit(1);
    }
}
