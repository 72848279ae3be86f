//! # Coffee POS Terminal
//!
//! Library behind the `coffee-pos` binary. `main.rs` only parses flags and
//! maps the outcome to an exit code; everything else lives here so tests can
//! drive a session with a scripted console.
//!
//! ## Module Organization
//! ```text
//! coffee_cli/
//! ├── lib.rs          ◄─── You are here (run one session)
//! ├── cli.rs          ◄─── clap flags, usage errors
//! ├── config.rs       ◄─── defaults → config.toml → env → flags
//! ├── logging.rs      ◄─── tracing into the log file
//! ├── context.rs      ◄─── Database + resolved config
//! ├── prompt.rs       ◄─── Console: questions, menus, y/n
//! ├── session.rs      ◄─── role → user → action
//! ├── report.rs       ◄─── bill file, statistics table
//! └── error.rs        ◄─── CliError and exit codes
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       One Invocation                                    │
//! │                                                                         │
//! │  1. Parse flags (clap) ──────────────── syntax errors exit 2            │
//! │  2. Validate flag combinations ──────── rejections exit 2, no DB opened │
//! │  3. Load AppConfig ──────────────────── bad config.toml exits 1         │
//! │  4. Initialize logging to the log file                                  │
//! │  5. Open database, run migrations                                       │
//! │  6. Run the session on stdin/stdout                                     │
//! │  7. Close the pool                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod report;
pub mod session;

use tracing::info;

use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::prompt::Console;
use coffee_core::validation::SessionFlags;

/// Opens the database and runs one interactive session on the terminal.
///
/// `flags` must already have passed
/// [`validate_session_flags`](coffee_core::validation::validate_session_flags).
pub async fn run(config: AppConfig, flags: &SessionFlags) -> CliResult<()> {
    let ctx = AppContext::connect(config).await?;
    let mut console = Console::stdio();

    let outcome = session::run(&ctx, flags, &mut console).await;

    ctx.close().await;
    info!(ok = outcome.is_ok(), "Session finished");
    outcome
}
