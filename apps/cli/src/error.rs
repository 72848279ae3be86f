//! # CLI Error Type
//!
//! Every session flow returns `Result<T, CliError>`; only `main` turns the
//! outcome into an exit code.
//!
//! ## Exit Codes
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┬──────┐
//! │ Source                       │ Variant                      │ Exit │
//! ├──────────────────────────────┼──────────────────────────────┼──────┤
//! │ ValidationError              │ CliError::Usage              │  2   │
//! │ CoreError::ProductNotFound   │ CliError::NotFound           │  1   │
//! │ operator typed q / n         │ CliError::Aborted            │  1   │
//! │ DbError                      │ CliError::Database           │  1   │
//! │ bill file / console          │ CliError::Io                 │  1   │
//! │ config.toml                  │ CliError::Config             │  1   │
//! └──────────────────────────────┴──────────────────────────────┴──────┘
//! ```

use std::process::ExitCode;
use thiserror::Error;

use crate::config::ConfigError;
use coffee_core::{CoreError, ValidationError};
use coffee_db::DbError;

/// Exit code clap uses for usage errors.
pub const USAGE_EXIT: u8 = 2;

/// Exit code for every other failure, including an abort.
pub const FAILURE_EXIT: u8 = 1;

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum CliError {
    /// Flags no session could honour.
    #[error("{0}")]
    Usage(#[from] ValidationError),

    /// A menu item named on the command line (or any menu item at all) is
    /// missing.
    #[error("{0}")]
    NotFound(CoreError),

    /// The operator quit, or declined to continue.
    #[error("aborted by operator")]
    Aborted,

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot start logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Core(CoreError),
}

impl CliError {
    /// Wraps an I/O error with what was being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CliError::Io {
            context: context.into(),
            source,
        }
    }

    /// Numeric process status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::Usage(_) => USAGE_EXIT,
            _ => FAILURE_EXIT,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound { .. } | CoreError::EmptyCatalog { .. } => {
                CliError::NotFound(err)
            }
            CoreError::Validation(v) => CliError::Usage(v),
            other => CliError::Core(other),
        }
    }
}

/// Console reads and writes.
impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        CliError::io("console", source)
    }
}

/// Result type for session flows.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use coffee_core::ProductKind;

    #[test]
    fn test_core_errors_are_classified() {
        let err: CliError = CoreError::ProductNotFound {
            kind: ProductKind::Beverage,
            name: "Mocha".into(),
        }
        .into();
        assert!(matches!(err, CliError::NotFound(_)));
        assert_eq!(err.to_string(), "There is no such beverage on the menu: 'Mocha'");

        let err: CliError = CoreError::TotalOverflow {
            salesman: "Alice".into(),
        }
        .into();
        assert!(matches!(err, CliError::Core(_)));
    }

    #[test]
    fn test_exit_codes() {
        let usage = CliError::Usage(ValidationError::Required {
            field: "name".into(),
        });
        assert_eq!(usage.exit_status(), 2);
        assert_eq!(CliError::Aborted.exit_status(), 1);
        assert_eq!(CliError::Database(DbError::PoolExhausted).exit_status(), 1);
    }
}
