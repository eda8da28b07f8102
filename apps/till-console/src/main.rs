//! # Till Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Console                                 │
//! │                                                                         │
//! │  main.rs ────► parse arguments, report fatal errors, exit code         │
//! │                                                                         │
//! │  lib.rs ─────► logging, config, store, session                         │
//! │                                                                         │
//! │  exit 0: session ended (completed, nothing available or abandoned)     │
//! │  exit 1: configuration, store or console I/O failure                   │
//! │  exit 2: bad command line                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process;

use till_console::error::AppError;
use till_console::{CliArgs, USAGE};

fn main() {
    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            eprintln!();
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    if let Err(err) = till_console::run(args) {
        tracing::error!(error = %err, "Till stopped");
        eprintln!("Error: {}", err);
        let code = if matches!(err, AppError::Usage(_)) { 2 } else { 1 };
        process::exit(code);
    }
}
