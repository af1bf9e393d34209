// src/cart.rs
//! A customer's pending purchase

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product, ProductId};
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    /// Line total at the product's current price
    pub fn total_price(&self, catalog: &Catalog) -> Result<Decimal> {
        let product = catalog.get(self.product_id)?;
        Ok(product.unit_price * Decimal::from(self.quantity))
    }
}

/// Ordered cart lines. Adding the same product twice keeps two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Err(CoreError::InvalidQuantity(quantity));
        }
        self.lines.push(CartLine {
            product_id: product.id,
            quantity,
        });
        Ok(())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `unit_price * quantity` using each product's current price
    pub fn compute_total(&self, catalog: &Catalog) -> Result<Decimal> {
        self.lines
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| Ok(acc + line.total_price(catalog)?))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
