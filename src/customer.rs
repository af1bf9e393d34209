// src/customer.rs
//! Customers with encrypted contact details
//!
//! Name and email are sealed at registration; only ciphertext is kept.

use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::Product;
use crate::crypto::{FieldCipher, SealedField};
use crate::error::Result;

pub type CustomerId = u32;

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: SealedField,
    email: SealedField,
    #[serde(skip)]
    cart: Cart,
}

impl Customer {
    pub fn register(
        id: CustomerId,
        name: &str,
        email: &str,
        cipher: &dyn FieldCipher,
    ) -> Result<Self> {
        Ok(Self {
            id,
            name: cipher.seal(name)?,
            email: cipher.seal(email)?,
            cart: Cart::new(),
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn encrypted_name(&self) -> &SealedField {
        &self.name
    }

    pub fn encrypted_email(&self) -> &SealedField {
        &self.email
    }

    pub fn name(&self, cipher: &dyn FieldCipher) -> Result<String> {
        cipher.open(&self.name)
    }

    pub fn email(&self, cipher: &dyn FieldCipher) -> Result<String> {
        cipher.open(&self.email)
    }

    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<()> {
        self.cart.add_item(product, quantity)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }
}
