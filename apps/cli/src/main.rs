//! # coffee-pos
//!
//! Terminal for a coffee shop: salesmen record sales and print bills,
//! managers look at sales statistics.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use coffee_cli::cli::Cli;
use coffee_cli::config::AppConfig;
use coffee_cli::error::CliError;
use coffee_cli::logging::init_tracing;
use coffee_core::validation::validate_session_flags;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let overrides = cli.config_overrides();

    // Usage errors exit 2 even when config.toml is broken.
    let flags = match validate_session_flags(cli.session_flags()) {
        Ok(flags) => flags,
        Err(e) => {
            if let Ok(config) = AppConfig::load(&overrides) {
                if init_tracing(&config.log_path).is_ok() {
                    error!(args = ?cli, error = %e, "Rejected command line");
                }
            }
            Cli::usage_error(&e).exit();
        }
    };

    let config = match AppConfig::load(&overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return CliError::from(e).exit_code();
        }
    };

    if let Err(e) = init_tracing(&config.log_path) {
        eprintln!("{e}");
        return e.exit_code();
    }

    info!(
        args = ?cli,
        db = %config.database_path.display(),
        "Starting coffee-pos"
    );

    match coffee_cli::run(config, &flags).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Aborted) => {
            info!("Session aborted by operator");
            CliError::Aborted.exit_code()
        }
        Err(e) => {
            error!(error = %e, "Session failed");
            eprintln!("{e}");
            e.exit_code()
        }
    }
}
