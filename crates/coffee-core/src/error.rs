//! # Error Types
//!
//! Domain-specific error types for coffee-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  coffee-core errors (this file)                                        │
//! │  ├── CoreError        - Domain failures (missing menu item, overflow)  │
//! │  └── ValidationError  - Flag and input validation failures             │
//! │                                                                         │
//! │  coffee-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What decides the exit code                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (flag, name, kind)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to an operator-facing message

use thiserror::Error;

use crate::types::ProductKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A product named on the command line is not on the menu.
    ///
    /// ## When This Occurs
    /// ```text
    /// coffee-pos --position salesman --beverage Mocha
    ///      │
    ///      ▼
    /// lookup "Mocha" in beverage table → nothing
    ///      │
    ///      ▼
    /// ProductNotFound { kind: Beverage, name: "Mocha" }
    ///      │
    ///      ▼
    /// "There is no such beverage on the menu: 'Mocha'" + exit 1
    /// ```
    #[error("There is no such {kind} on the menu: '{name}'")]
    ProductNotFound { kind: ProductKind, name: String },

    /// The picker was opened over an empty table.
    #[error("There is no {kind} on the menu to choose from")]
    EmptyCatalog { kind: ProductKind },

    /// Beverage plus ingredient price does not fit in an i64.
    #[error("Price of {beverage} with {ingredient} overflowed")]
    PriceOverflow { beverage: String, ingredient: String },

    /// A salesman's running total no longer fits in an i64.
    #[error("Sales total for {salesman} overflowed")]
    TotalOverflow { salesman: String },

    /// The sum of every salesman's total no longer fits in an i64.
    #[error("Grand total of all sales overflowed")]
    GrandTotalOverflow,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when flags or typed input don't meet requirements.
/// Used for early validation before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value is not in allowed set.
    #[error("unavailable {field} '{value}', available: {}", .allowed.join(", "))]
    NotAllowed {
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A salesman-only flag was given together with `--position manager`.
    #[error("--{flag} is not an available action for manager")]
    ManagerAction { flag: String },

    /// A role-scoped flag was given without `--position`.
    #[error("--{flag} requires --position to be chosen first")]
    PositionRequired { flag: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound {
            kind: ProductKind::Beverage,
            name: "Mocha".to_string(),
        };
        assert_eq!(err.to_string(), "There is no such beverage on the menu: 'Mocha'");

        let err = CoreError::EmptyCatalog {
            kind: ProductKind::Ingredient,
        };
        assert_eq!(err.to_string(), "There is no ingredient on the menu to choose from");

        let err = CoreError::PriceOverflow {
            beverage: "Latte".to_string(),
            ingredient: "Syrup".to_string(),
        };
        assert_eq!(err.to_string(), "Price of Latte with Syrup overflowed");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::ManagerAction {
            flag: "beverage".to_string(),
        };
        assert_eq!(err.to_string(), "--beverage is not an available action for manager");

        let err = ValidationError::NotAllowed {
            field: "position".to_string(),
            value: "barista".to_string(),
            allowed: vec!["salesman".to_string(), "manager".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unavailable position 'barista', available: salesman, manager"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
