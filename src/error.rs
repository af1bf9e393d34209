// src/error.rs
//! Public error type for the entire crate

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::ProductId;
use crate::customer::CustomerId;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("no field key has been generated or loaded")]
    KeyUnavailable,

    // Deliberately carries no detail: which check failed is not exposed
    #[error("field decryption failed")]
    DecryptionFailed,

    #[error("field encryption failed: {0}")]
    Encryption(String),

    #[error("invalid key material: {0}")]
    InvalidKey(String),

    #[error("product {0} already exists")]
    DuplicateProductId(ProductId),

    #[error("customer {0} already exists")]
    DuplicateCustomerId(CustomerId),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    #[error("unit price must not be negative")]
    NegativePrice,

    #[error("cart is empty")]
    EmptyCart,

    #[error("payment of {amount} declined")]
    PaymentDeclined { amount: Decimal },

    #[error("shared state poisoned by a panicked checkout")]
    StatePoisoned,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::Config(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for CoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        CoreError::StatePoisoned
    }
}
