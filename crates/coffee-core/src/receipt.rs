//! # Receipt Text
//!
//! The bill a salesman can save after a sale.
//!
//! ```text
//! Salesman: Alice
//! Beverage: Espresso
//! Ingredient: none
//! Total Price: 3
//! ```

use std::fmt;

use crate::types::Sale;

/// Shown on the ingredient line when the sale has none.
pub const NO_INGREDIENT: &str = "none";

/// Borrowing view of a [`Sale`] that renders as a receipt.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a>(pub &'a Sale);

impl fmt::Display for Receipt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sale = self.0;
        writeln!(f, "Salesman: {}", sale.salesman_name())?;
        writeln!(f, "Beverage: {}", sale.beverage_name())?;
        writeln!(
            f,
            "Ingredient: {}",
            sale.ingredient_name().unwrap_or(NO_INGREDIENT)
        )?;
        writeln!(f, "Total Price: {}", sale.price())
    }
}

/// Renders the receipt text for a sale.
pub fn render_receipt(sale: &Sale) -> String {
    Receipt(sale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{Account, Beverage, CatalogItem, Ingredient, Salesman};

    #[test]
    fn test_receipt_without_ingredient() {
        let sale = Sale::new(
            &Salesman::new("Alice"),
            &Beverage::new("Espresso", Money::from_units(3)),
            None,
        )
        .unwrap();
        assert_eq!(
            render_receipt(&sale),
            "Salesman: Alice\nBeverage: Espresso\nIngredient: none\nTotal Price: 3\n"
        );
    }

    #[test]
    fn test_receipt_with_ingredient() {
        let sale = Sale::new(
            &Salesman::new("Bob"),
            &Beverage::new("Latte", Money::from_units(5)),
            Some(&Ingredient::new("Syrup", Money::from_units(2))),
        )
        .unwrap();
        let text = render_receipt(&sale);
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("Ingredient: Syrup\n"));
        assert!(text.ends_with("Total Price: 7\n"));
    }
}
