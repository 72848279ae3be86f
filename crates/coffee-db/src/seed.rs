//! # Menu Seeding
//!
//! Stocks the `beverage` and `ingredient` tables, either with the house
//! menu or with a TOML menu file:
//!
//! ```toml
//! [[beverage]]
//! name = "Flat White"
//! price = 5
//!
//! [[ingredient]]
//! name = "Oat Milk"
//! price = 1
//! ```
//!
//! Seeding is additive: names already on the menu are skipped, so running
//! it twice is harmless.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::DbError;
use crate::pool::Database;
use coffee_core::validation::{validate_name, validate_price};
use coffee_core::{Beverage, CatalogItem, Ingredient, Money, ProductKind, ValidationError};

/// The house menu used when no menu file is given.
pub const DEFAULT_BEVERAGES: &[(&str, i64)] = &[
    ("Espresso", 3),
    ("Americano", 4),
    ("Latte", 5),
    ("Cappuccino", 5),
    ("Mocha", 6),
];

/// Add-ons on the house menu.
pub const DEFAULT_INGREDIENTS: &[(&str, i64)] = &[
    ("Milk", 1),
    ("Sugar", 0),
    ("Syrup", 2),
    ("Whipped Cream", 2),
    ("Extra Shot", 2),
];

/// Errors raised while loading or applying a menu.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read menu file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid menu file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {kind} '{name}': {source}")]
    Invalid {
        kind: ProductKind,
        name: String,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Database(#[from] DbError),
}

/// One line of a menu file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub price: i64,
}

/// A whole menu: beverages and ingredients in the order they should appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Menu {
    #[serde(default, rename = "beverage")]
    pub beverages: Vec<MenuEntry>,
    #[serde(default, rename = "ingredient")]
    pub ingredients: Vec<MenuEntry>,
}

impl Menu {
    /// The house menu.
    pub fn house() -> Self {
        let entries = |items: &[(&str, i64)]| {
            items
                .iter()
                .map(|(name, price)| MenuEntry {
                    name: name.to_string(),
                    price: *price,
                })
                .collect()
        };

        Menu {
            beverages: entries(DEFAULT_BEVERAGES),
            ingredients: entries(DEFAULT_INGREDIENTS),
        }
    }

    /// Parses a menu from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, SeedError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a menu file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let text = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Checks every entry before anything is written.
    pub fn validate(&self) -> Result<(), SeedError> {
        let all = self
            .beverages
            .iter()
            .map(|e| (ProductKind::Beverage, e))
            .chain(self.ingredients.iter().map(|e| (ProductKind::Ingredient, e)));

        for (kind, entry) in all {
            validate_name("name", &entry.name)
                .and_then(|_| validate_price(Money::from_units(entry.price)))
                .map_err(|source| SeedError::Invalid {
                    kind,
                    name: entry.name.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

/// How many entries were written and skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub skipped: usize,
}

/// Writes every menu entry that is not on the menu yet.
pub async fn seed_menu(db: &Database, menu: &Menu) -> Result<SeedReport, SeedError> {
    menu.validate()?;

    let mut report = SeedReport::default();

    for entry in &menu.beverages {
        let item = Beverage::new(entry.name.trim(), Money::from_units(entry.price));
        stock(db, &item, &mut report).await?;
    }
    for entry in &menu.ingredients {
        let item = Ingredient::new(entry.name.trim(), Money::from_units(entry.price));
        stock(db, &item, &mut report).await?;
    }

    info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Menu seeded"
    );
    Ok(report)
}

async fn stock<P: CatalogItem>(
    db: &Database,
    item: &P,
    report: &mut SeedReport,
) -> Result<(), SeedError> {
    match db.products().insert(item).await {
        Ok(()) => report.inserted += 1,
        Err(e) if e.is_duplicate() => {
            warn!(kind = %P::KIND, name = %item.name(), "Already on the menu, skipped");
            report.skipped += 1;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DbConfig;

    #[tokio::test]
    async fn test_house_menu_is_seeded_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let first = seed_menu(&db, &Menu::house()).await.unwrap();
        assert_eq!(first.inserted, 10);
        assert_eq!(first.skipped, 0);

        let second = seed_menu(&db, &Menu::house()).await.unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.skipped, 10);

        let espresso = db
            .products()
            .get_by_name::<Beverage>("Espresso")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(espresso.price, Money::from_units(3));

        let sugar = db
            .products()
            .get_by_name::<Ingredient>("Sugar")
            .await
            .unwrap()
            .unwrap();
        assert!(sugar.price.is_zero());
    }

    #[test]
    fn test_menu_from_toml() {
        let menu = Menu::from_toml(
            r#"
            [[beverage]]
            name = "Flat White"
            price = 5

            [[ingredient]]
            name = "Oat Milk"
            price = 1
            "#,
        )
        .unwrap();

        assert_eq!(menu.beverages.len(), 1);
        assert_eq!(menu.beverages[0].name, "Flat White");
        assert_eq!(menu.ingredients[0].price, 1);

        let empty = Menu::from_toml("").unwrap();
        assert_eq!(empty, Menu::default());
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let negative = Menu {
            beverages: vec![MenuEntry {
                name: "Latte".into(),
                price: -1,
            }],
            ..Menu::default()
        };
        assert!(matches!(negative.validate(), Err(SeedError::Invalid { .. })));

        let blank = Menu {
            ingredients: vec![MenuEntry {
                name: " ".into(),
                price: 1,
            }],
            ..Menu::default()
        };
        assert!(blank.validate().is_err());
        assert!(Menu::house().validate().is_ok());
    }

    #[test]
    fn test_bad_toml_is_a_parse_error() {
        assert!(matches!(
            Menu::from_toml("[[beverage]]\nname = 5"),
            Err(SeedError::Parse(_))
        ));
    }
}
