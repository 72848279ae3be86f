//! # Logging
//!
//! Installs the global `tracing` subscriber once, in `main`.
//!
//! ```text
//! info!/debug!/warn! (all crates)
//!        │
//!        ▼
//! EnvFilter  (RUST_LOG, or "info,coffee=debug,sqlx=warn")
//!        │
//!        ▼
//! fmt layer, no ANSI ──► coffee_shop.log (append)
//!
//! 2026-10-18T09:14:03.120Z  INFO coffee_cli::session: Beverage "Latte" was chosen
//! ```
//!
//! Nothing is logged to the terminal: stdout and stderr belong to the
//! operator.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,coffee=debug,sqlx=warn";

/// Opens the log file for appending and installs the subscriber.
pub fn init_tracing(log_path: &Path) -> CliResult<()> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::io(format!("cannot create {}", parent.display()), e)
            })?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| CliError::io(format!("cannot open log file {}", log_path.display()), e))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
