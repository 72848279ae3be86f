//! # Domain Types
//!
//! Core domain types used throughout Coffee POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Role (closed tag)              ProductKind (closed tag)               │
//! │  ├── Salesman ──► Salesman      ├── Beverage   ──► Beverage            │
//! │  └── Manager  ──► Manager       └── Ingredient ──► Ingredient          │
//! │         │                                │                              │
//! │         ▼                                ▼                              │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │   User (union)  │   │                 Sale                    │     │
//! │  │  Salesman(..)   │   │  id (UUID)         salesman_name (FK)   │     │
//! │  │  Manager(..)    │   │  beverage_name     ingredient_name?     │     │
//! │  └─────────────────┘   │  price = beverage + ingredient          │     │
//! │                        └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Accounts and catalog entries are keyed by their exact, case-sensitive
//! name. Sales get a UUID v4 so they can be created without a round trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Who is using the terminal. Decides which actions are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Records sales and writes bills.
    Salesman,
    /// Views per-salesman statistics.
    Manager,
}

impl Role {
    /// Every role, in the order the role prompt lists them.
    pub const ALL: [Role; 2] = [Role::Salesman, Role::Manager];

    /// Lower-case name, as accepted by `--position` and stored in logs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Salesman => "salesman",
            Role::Manager => "manager",
        }
    }

    /// Table holding accounts of this role.
    pub const fn table(&self) -> &'static str {
        match self {
            Role::Salesman => "salesman",
            Role::Manager => "manager",
        }
    }

    /// Builds a (not yet persisted) account of this role.
    pub fn account(&self, name: impl Into<String>) -> User {
        match self {
            Role::Salesman => User::Salesman(Salesman::new(name)),
            Role::Manager => User::Manager(Manager::new(name)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Case-insensitive: `Salesman`, `SALESMAN` and `salesman` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "salesman" => Ok(Role::Salesman),
            "manager" => Ok(Role::Manager),
            _ => Err(ValidationError::NotAllowed {
                field: "position".to_string(),
                value: s.to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// What kind of menu item a catalog entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Beverage,
    Ingredient,
}

impl ProductKind {
    /// Lower-case name used in logs and messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Beverage => "beverage",
            ProductKind::Ingredient => "ingredient",
        }
    }

    /// Table holding entries of this kind.
    pub const fn table(&self) -> &'static str {
        match self {
            ProductKind::Beverage => "beverage",
            ProductKind::Ingredient => "ingredient",
        }
    }

    /// Capitalised label for log lines (`Beverage "Latte" was chosen`).
    pub const fn label(&self) -> &'static str {
        match self {
            ProductKind::Beverage => "Beverage",
            ProductKind::Ingredient => "Ingredient",
        }
    }

    /// Builds a (not yet persisted) catalog entry of this kind.
    pub fn product(&self, name: impl Into<String>, price: Money) -> Product {
        match self {
            ProductKind::Beverage => Product::Beverage(Beverage::new(name, price)),
            ProductKind::Ingredient => Product::Ingredient(Ingredient::new(name, price)),
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Record Traits
// =============================================================================

/// A person who can log in under a [`Role`].
pub trait Account: Sized + fmt::Display {
    /// The role this record type belongs to.
    const ROLE: Role;

    fn new(name: impl Into<String>) -> Self;

    fn name(&self) -> &str;

    /// Wraps the record in the [`User`] union.
    fn into_user(self) -> User;
}

/// A priced entry on the menu.
pub trait CatalogItem: Sized + fmt::Display {
    /// The kind this record type belongs to.
    const KIND: ProductKind;

    fn new(name: impl Into<String>, price: Money) -> Self;

    fn name(&self) -> &str;

    fn price(&self) -> Money;
}

// =============================================================================
// Accounts
// =============================================================================

/// A salesman account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Salesman {
    pub name: String,
}

impl Account for Salesman {
    const ROLE: Role = Role::Salesman;

    fn new(name: impl Into<String>) -> Self {
        Salesman { name: name.into() }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn into_user(self) -> User {
        User::Salesman(self)
    }
}

impl fmt::Display for Salesman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A manager account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Manager {
    pub name: String,
}

impl Account for Manager {
    const ROLE: Role = Role::Manager;

    fn new(name: impl Into<String>) -> Self {
        Manager { name: name.into() }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn into_user(self) -> User {
        User::Manager(self)
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The resolved operator of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum User {
    Salesman(Salesman),
    Manager(Manager),
}

impl User {
    pub fn name(&self) -> &str {
        match self {
            User::Salesman(s) => &s.name,
            User::Manager(m) => &m.name,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            User::Salesman(_) => Role::Salesman,
            User::Manager(_) => Role::Manager,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A drink on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Beverage {
    pub name: String,
    pub price: Money,
}

impl CatalogItem for Beverage {
    const KIND: ProductKind = ProductKind::Beverage;

    fn new(name: impl Into<String>, price: Money) -> Self {
        Beverage {
            name: name.into(),
            price,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Money {
        self.price
    }
}

impl fmt::Display for Beverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} price: {}", self.name, self.price)
    }
}

/// An add-on that can go into a beverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub name: String,
    pub price: Money,
}

impl CatalogItem for Ingredient {
    const KIND: ProductKind = ProductKind::Ingredient;

    fn new(name: impl Into<String>, price: Money) -> Self {
        Ingredient {
            name: name.into(),
            price,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Money {
        self.price
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -- price: {}", self.name, self.price)
    }
}

/// Either kind of catalog entry, as produced by [`ProductKind::product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Product {
    Beverage(Beverage),
    Ingredient(Ingredient),
}

impl Product {
    pub fn kind(&self) -> ProductKind {
        match self {
            Product::Beverage(_) => ProductKind::Beverage,
            Product::Ingredient(_) => ProductKind::Ingredient,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Product::Beverage(b) => &b.name,
            Product::Ingredient(i) => &i.name,
        }
    }

    pub fn price(&self) -> Money {
        match self {
            Product::Beverage(b) => b.price,
            Product::Ingredient(i) => i.price,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded transaction: a beverage, maybe an ingredient, and who sold it.
///
/// Fields are private: the price is derived once in [`Sale::new`] and the
/// record is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    id: String,
    salesman_name: String,
    beverage_name: String,
    ingredient_name: Option<String>,
    price: Money,
    created_at: DateTime<Utc>,
}

impl Sale {
    /// Records a sale. `price = beverage.price + ingredient.price (if any)`.
    ///
    /// ## Errors
    /// [`CoreError::PriceOverflow`] if the sum does not fit in an i64.
    ///
    /// ## Example
    /// ```rust
    /// use coffee_core::{Account, Beverage, CatalogItem, Ingredient, Money, Sale, Salesman};
    ///
    /// let alice = Salesman::new("Alice");
    /// let latte = Beverage::new("Latte", Money::from_units(5));
    /// let syrup = Ingredient::new("Syrup", Money::from_units(2));
    ///
    /// assert_eq!(Sale::new(&alice, &latte, Some(&syrup)).unwrap().price().units(), 7);
    /// assert_eq!(Sale::new(&alice, &latte, None).unwrap().price().units(), 5);
    /// ```
    pub fn new(
        salesman: &Salesman,
        beverage: &Beverage,
        ingredient: Option<&Ingredient>,
    ) -> CoreResult<Self> {
        let price = match ingredient {
            Some(i) => beverage
                .price
                .checked_add(i.price)
                .ok_or_else(|| CoreError::PriceOverflow {
                    beverage: beverage.name.clone(),
                    ingredient: i.name.clone(),
                })?,
            None => beverage.price,
        };

        Ok(Sale {
            id: Uuid::new_v4().to_string(),
            salesman_name: salesman.name.clone(),
            beverage_name: beverage.name.clone(),
            ingredient_name: ingredient.map(|i| i.name.clone()),
            price,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn salesman_name(&self) -> &str {
        &self.salesman_name
    }

    pub fn beverage_name(&self) -> &str {
        &self.beverage_name
    }

    pub fn ingredient_name(&self) -> Option<&str> {
        self.ingredient_name.as_deref()
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("salesman".parse::<Role>().unwrap(), Role::Salesman);
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("SALESMAN".parse::<Role>().unwrap(), Role::Salesman);
        assert!("barista".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_tables_and_constructors() {
        assert_eq!(Role::Salesman.table(), "salesman");
        assert_eq!(Role::Manager.table(), "manager");

        let user = Role::Manager.account("Bob");
        assert_eq!(user.role(), Role::Manager);
        assert_eq!(user.name(), "Bob");
        assert_eq!(user, User::Manager(Manager::new("Bob")));
    }

    #[test]
    fn test_product_kind_constructor() {
        let product = ProductKind::Ingredient.product("Milk", Money::from_units(1));
        assert_eq!(product.kind(), ProductKind::Ingredient);
        assert_eq!(product.name(), "Milk");
        assert_eq!(product.price(), Money::from_units(1));
        assert_eq!(ProductKind::Beverage.table(), "beverage");
    }

    #[test]
    fn test_account_constants_match_tags() {
        assert_eq!(Salesman::ROLE, Role::Salesman);
        assert_eq!(Manager::ROLE, Role::Manager);
        assert_eq!(Beverage::KIND, ProductKind::Beverage);
        assert_eq!(Ingredient::KIND, ProductKind::Ingredient);
    }

    #[test]
    fn test_sale_price_is_flat_sum() {
        let salesman = Salesman::new("Alice");

        for beverage_price in [0, 1, 3, 5, 250] {
            let beverage = Beverage::new("B", Money::from_units(beverage_price));

            let plain = Sale::new(&salesman, &beverage, None).unwrap();
            assert_eq!(plain.price().units(), beverage_price);
            assert_eq!(plain.ingredient_name(), None);

            for ingredient_price in [0, 1, 2, 99] {
                let ingredient = Ingredient::new("I", Money::from_units(ingredient_price));
                let sale = Sale::new(&salesman, &beverage, Some(&ingredient)).unwrap();
                assert_eq!(sale.price().units(), beverage_price + ingredient_price);
                assert_eq!(sale.ingredient_name(), Some("I"));
            }
        }
    }

    #[test]
    fn test_sale_price_overflow_is_an_error() {
        let salesman = Salesman::new("Alice");
        let beverage = Beverage::new("B", Money::from_units(i64::MAX));
        let ingredient = Ingredient::new("I", Money::from_units(1));

        assert!(matches!(
            Sale::new(&salesman, &beverage, Some(&ingredient)),
            Err(CoreError::PriceOverflow { .. })
        ));
        // No ingredient, nothing to add.
        assert_eq!(
            Sale::new(&salesman, &beverage, None).unwrap().price(),
            Money::from_units(i64::MAX)
        );
    }

    #[test]
    fn test_sale_ids_are_unique() {
        let salesman = Salesman::new("Alice");
        let beverage = Beverage::new("Espresso", Money::from_units(3));
        let a = Sale::new(&salesman, &beverage, None).unwrap();
        let b = Sale::new(&salesman, &beverage, None).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.salesman_name(), "Alice");
        assert_eq!(a.beverage_name(), "Espresso");
    }

    #[test]
    fn test_display_formats() {
        assert_eq!(Beverage::new("Latte", Money::from_units(5)).to_string(), "Latte price: 5");
        assert_eq!(
            Ingredient::new("Milk", Money::from_units(1)).to_string(),
            "Milk -- price: 1"
        );
        assert_eq!(Salesman::new("Alice").to_string(), "Alice");
    }
}
