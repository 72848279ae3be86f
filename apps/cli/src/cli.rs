//! # Command Line
//!
//! ```text
//! coffee-pos [--name N] [--position salesman|manager]
//!            [--beverage B] [--ingredient I] [--save_bill FILE]
//!            [--db PATH] [--log-file PATH] [--config PATH]
//! ```
//!
//! clap only checks syntax here. Which flags go with which `--position` is
//! decided by [`coffee_core::validation::validate_session_flags`], and a
//! rejection is reported through [`Cli::usage_error`] so it looks and exits
//! like any other clap error.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use crate::config::ConfigOverrides;
use coffee_core::validation::SessionFlags;
use coffee_core::ValidationError;

#[derive(Debug, Clone, Parser)]
#[command(name = "coffee-pos", version, about)]
pub struct Cli {
    /// Name of the user
    #[arg(long)]
    pub name: Option<String>,

    /// Position of the user (salesman or manager)
    #[arg(long)]
    pub position: Option<String>,

    /// Beverage to sell (salesman only)
    #[arg(long)]
    pub beverage: Option<String>,

    /// Ingredient to add (salesman only)
    #[arg(long)]
    pub ingredient: Option<String>,

    /// File to save the bill to (salesman only)
    #[arg(long = "save_bill", value_name = "FILE_TO_SAVE")]
    pub save_bill: Option<String>,

    /// Database file [env: COFFEE_DB_PATH]
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log file [env: COFFEE_LOG_PATH]
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// TOML config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// The flags that shape the session.
    pub fn session_flags(&self) -> SessionFlags {
        SessionFlags {
            name: self.name.clone(),
            position: self.position.clone(),
            beverage: self.beverage.clone(),
            ingredient: self.ingredient.clone(),
            save_bill: self.save_bill.clone(),
        }
    }

    /// The flags that shape configuration.
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            database_path: self.db.clone(),
            log_path: self.log_file.clone(),
        }
    }

    /// Builds a clap usage error (exit code 2) from a validation failure.
    pub fn usage_error(err: &ValidationError) -> clap::Error {
        let kind = match err {
            ValidationError::NotAllowed { .. } => ErrorKind::InvalidValue,
            ValidationError::ManagerAction { .. } | ValidationError::PositionRequired { .. } => {
                ErrorKind::ArgumentConflict
            }
            _ => ErrorKind::ValueValidation,
        };
        Cli::command().error(kind, err)
    }
}
