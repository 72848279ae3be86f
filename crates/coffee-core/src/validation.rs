//! # Validation Module
//!
//! Input validation utilities for Coffee POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: clap (apps/cli)                                              │
//! │  ├── Flag syntax, unknown flags                                        │
//! │  └── Usage text on stderr, exit 2                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Which flags may be combined with which --position                 │
//! │  └── Names and prices                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── PRIMARY KEY on names                                              │
//! │  ├── CHECK (price >= 0)                                                │
//! │  └── Foreign key constraints on sale                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coffee_core::validation::{validate_session_flags, SessionFlags};
//!
//! let flags = SessionFlags {
//!     position: Some("manager".to_string()),
//!     beverage: Some("Espresso".to_string()),
//!     ..SessionFlags::default()
//! };
//! assert!(validate_session_flags(flags).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Role;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted account or menu item name.
pub const MAX_NAME_LEN: usize = 100;

// =============================================================================
// Session Flags
// =============================================================================

/// The optional command-line flags that shape one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFlags {
    pub name: Option<String>,
    pub position: Option<String>,
    pub beverage: Option<String>,
    pub ingredient: Option<String>,
    pub save_bill: Option<String>,
}

impl SessionFlags {
    /// Names of the salesman-only flags that are set, in declaration order.
    pub fn salesman_flags(&self) -> Vec<&'static str> {
        [
            ("beverage", self.beverage.is_some()),
            ("ingredient", self.ingredient.is_some()),
            ("save_bill", self.save_bill.is_some()),
        ]
        .into_iter()
        .filter_map(|(flag, set)| set.then_some(flag))
        .collect()
    }

    /// Parses `--position`, if given.
    pub fn role(&self) -> ValidationResult<Option<Role>> {
        self.position.as_deref().map(str::parse).transpose()
    }
}

/// Rejects flag combinations no session could honour.
///
/// ## Rules
/// ```text
/// ┌──────────────────┬──────────────────────────────┬──────────┐
/// │ --position       │ --beverage/--ingredient/     │ Result   │
/// │                  │ --save_bill                  │          │
/// ├──────────────────┼──────────────────────────────┼──────────┤
/// │ manager          │ any set                      │ rejected │
/// │ (absent)         │ any set                      │ rejected │
/// │ not a role       │ any                          │ rejected │
/// │ salesman         │ any                          │ accepted │
/// └──────────────────┴──────────────────────────────┴──────────┘
/// ```
///
/// `--position` is matched case-insensitively and returned lower-cased;
/// every other flag comes back untouched.
pub fn validate_session_flags(mut flags: SessionFlags) -> ValidationResult<SessionFlags> {
    let role_scoped = flags.salesman_flags();

    if let Some(name) = flags.name.as_deref() {
        validate_name("name", name)?;
    }

    match flags.role()? {
        Some(Role::Manager) => {
            if let Some(flag) = role_scoped.first() {
                return Err(ValidationError::ManagerAction {
                    flag: flag.to_string(),
                });
            }
        }
        None => {
            if let Some(flag) = role_scoped.first() {
                return Err(ValidationError::PositionRequired {
                    flag: flag.to_string(),
                });
            }
        }
        Some(Role::Salesman) => {}
    }

    flags.position = flags.position.map(|p| p.trim().to_lowercase());
    Ok(flags)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an account or menu item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - At most [`MAX_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use coffee_core::validation::validate_name;
///
/// assert!(validate_name("name", "Alice").is_ok());
/// assert!(validate_name("name", "   ").is_err());
/// ```
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a menu price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free add-ons such as sugar)
///
/// ## Example
/// ```rust
/// use coffee_core::money::Money;
/// use coffee_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_units(3)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_units(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(position: Option<&str>) -> SessionFlags {
        SessionFlags {
            position: position.map(str::to_string),
            ..SessionFlags::default()
        }
    }

    #[test]
    fn test_manager_with_salesman_flags_is_rejected() {
        for set in ["beverage", "ingredient", "save_bill"] {
            let mut f = flags(Some("manager"));
            match set {
                "beverage" => f.beverage = Some("Espresso".into()),
                "ingredient" => f.ingredient = Some("Milk".into()),
                _ => f.save_bill = Some("out.txt".into()),
            }
            let err = validate_session_flags(f).unwrap_err();
            assert!(matches!(err, ValidationError::ManagerAction { ref flag } if flag == set));
        }
    }

    #[test]
    fn test_role_scoped_flags_without_position_are_rejected() {
        let f = SessionFlags {
            beverage: Some("Latte".into()),
            ..SessionFlags::default()
        };
        let err = validate_session_flags(f).unwrap_err();
        assert!(matches!(err, ValidationError::PositionRequired { .. }));

        let f = SessionFlags {
            save_bill: Some("bill.txt".into()),
            ..SessionFlags::default()
        };
        assert!(validate_session_flags(f).is_err());
    }

    #[test]
    fn test_unknown_position_is_rejected() {
        let err = validate_session_flags(flags(Some("barista"))).unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_salesman_with_everything_is_accepted() {
        for beverage in ["Espresso", "Mocha", "anything at all"] {
            let f = SessionFlags {
                name: Some("Alice".into()),
                position: Some("salesman".into()),
                beverage: Some(beverage.into()),
                ingredient: Some("Milk".into()),
                save_bill: Some("out.txt".into()),
            };
            let validated = validate_session_flags(f.clone()).unwrap();
            assert_eq!(validated, f);
        }
    }

    #[test]
    fn test_position_is_normalised() {
        let validated = validate_session_flags(flags(Some("Manager"))).unwrap();
        assert_eq!(validated.position.as_deref(), Some("manager"));
        assert_eq!(validated.role().unwrap(), Some(Role::Manager));
    }

    #[test]
    fn test_no_flags_is_accepted() {
        let validated = validate_session_flags(SessionFlags::default()).unwrap();
        assert_eq!(validated.role().unwrap(), None);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let f = SessionFlags {
            name: Some("  ".into()),
            ..SessionFlags::default()
        };
        assert!(matches!(
            validate_session_flags(f),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Alice").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_units(5)).is_ok());
        assert!(validate_price(Money::from_units(-5)).is_err());
    }
}
