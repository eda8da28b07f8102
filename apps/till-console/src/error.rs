//! # Application Error Type
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  CoreError (bad quantity, stock moved)  ── message, re-prompt          │
//! │  StoreError::Core(..)                   ── message, re-prompt          │
//! │  StoreError (I/O, parse)                ── AppError, exit 1            │
//! │  ConfigError                            ── AppError, exit 1            │
//! │  io::Error on stdin/stdout              ── AppError, exit 1            │
//! │  End of input                           ── SessionOutcome::Abandoned   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use thiserror::Error;
use till_core::CoreError;
use till_store::StoreError;

use crate::config::ConfigError;

/// Errors that end a console run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Bad command line.
    #[error("{0}")]
    Usage(String),
}

pub type AppResult<T> = Result<T, AppError>;
