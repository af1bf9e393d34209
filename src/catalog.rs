// src/catalog.rs
//! Sellable products and their stock levels
//!
//! After creation a product's quantity only changes through
//! [`Catalog::decrement_quantity`] and, when a checkout rolls back,
//! [`Catalog::restock`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity_on_hand: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    products: BTreeMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<&Product> {
        if unit_price < Decimal::ZERO {
            return Err(CoreError::NegativePrice);
        }
        if self.products.contains_key(&id) {
            return Err(CoreError::DuplicateProductId(id));
        }
        let product = Product {
            id,
            name: name.into(),
            unit_price,
            quantity_on_hand: quantity,
        };
        Ok(self.products.entry(id).or_insert(product))
    }

    pub fn get(&self, id: ProductId) -> Result<&Product> {
        self.products.get(&id).ok_or(CoreError::NotFound(id))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.products.contains_key(&id)
    }

    /// Products in id order
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Remove `amount` units from stock; returns the remaining quantity
    pub fn decrement_quantity(&mut self, id: ProductId, amount: u32) -> Result<u32> {
        if amount == 0 {
            return Err(CoreError::InvalidQuantity(amount));
        }
        let product = self.products.get_mut(&id).ok_or(CoreError::NotFound(id))?;
        let available = product.quantity_on_hand;
        product.quantity_on_hand =
            available
                .checked_sub(amount)
                .ok_or(CoreError::InsufficientStock {
                    product_id: id,
                    requested: amount,
                    available,
                })?;
        Ok(product.quantity_on_hand)
    }

    /// Return `amount` units to stock; returns the new quantity
    pub fn restock(&mut self, id: ProductId, amount: u32) -> Result<u32> {
        let product = self.products.get_mut(&id).ok_or(CoreError::NotFound(id))?;
        product.quantity_on_hand = product
            .quantity_on_hand
            .checked_add(amount)
            .ok_or(CoreError::InvalidQuantity(amount))?;
        Ok(product.quantity_on_hand)
    }
}
