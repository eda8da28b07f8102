//! # Till Console Library
//!
//! The counter application: configuration, the customer conversation and
//! receipt printing. `main.rs` only parses arguments and calls [`run`].
//!
//! ## Module Organization
//! ```text
//! till_console/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── till.toml + TILL_* environment
//! ├── session.rs      ◄─── The customer conversation
//! ├── prompt.rs       ◄─── Line I/O seam (stdin/stdout or in-memory)
//! ├── receipt.rs      ◄─── Receipt lines
//! └── error.rs        ◄─── AppError
//! ```

pub mod config;
pub mod error;
pub mod prompt;
pub mod receipt;
pub mod session;

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use config::TillConfig;
use error::{AppError, AppResult};
use prompt::Terminal;
use session::{Session, SessionOutcome};
use till_store::Store;

pub const USAGE: &str = "\
Till POS counter console

Usage: till [OPTIONS]

Options:
  -c, --config <PATH>   Config file (default: platform config dir, till.toml)
  -d, --data <DIR>      Data directory, overrides [data].dir
      --init-config     Write the effective configuration and exit
  -h, --help            Show this help message";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub init_config: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses arguments, program name excluded.
    pub fn parse<I, S>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let value = args
                        .next()
                        .ok_or_else(|| AppError::Usage(format!("{} needs a path", arg)))?;
                    parsed.config_path = Some(PathBuf::from(value));
                }
                "--data" | "-d" => {
                    let value = args
                        .next()
                        .ok_or_else(|| AppError::Usage(format!("{} needs a directory", arg)))?;
                    parsed.data_dir = Some(PathBuf::from(value));
                }
                "--init-config" => parsed.init_config = true,
                "--help" | "-h" => parsed.help = true,
                other => return Err(AppError::Usage(format!("Unknown argument: {}", other))),
            }
        }

        Ok(parsed)
    }
}

/// Runs one customer session.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or "warn,till=info")          │
/// │  2. Load Config (defaults → till.toml → TILL_* → --data)               │
/// │  3. Open Store (products.json validated once)                          │
/// │  4. Session over stdin/stdout                                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(args: CliArgs) -> AppResult<()> {
    init_tracing();

    let mut config = TillConfig::load(args.config_path.clone())?;
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }

    if args.init_config {
        let path = config.save(args.config_path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    info!(
        store = %config.store.name,
        data_dir = %config.data.dir.display(),
        loyalty_mode = ?config.discounts.loyalty_mode,
        "Starting Till POS console"
    );

    let store = Store::open(config.store_config())?;
    let mut session = Session::new(&store, &config, Terminal::stdio());

    match session.run()? {
        SessionOutcome::Completed(order) => {
            info!(order_id = %order.id, "Session completed")
        }
        SessionOutcome::NothingAvailable => info!("Session ended, nothing available"),
        SessionOutcome::Abandoned => info!("Session abandoned"),
    }

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_store=debug` - Show every file read and write
/// - Default: warnings, plus info from the till crates
///
/// Logs go to stderr so they never interleave with prompts.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,till=info"));

    // A subscriber may already be installed (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
