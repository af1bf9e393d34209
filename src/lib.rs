// src/lib.rs
//! encrypted-checkout: an in-memory shop with encrypted customer fields
//!
//! Features:
//! - AES-256-GCM / XChaCha20-Poly1305 field tokens
//! - RSA-OAEP (SHA-256) hybrid variant with per-field keys
//! - All-or-nothing checkout with stock rollback
//! - Append-only order ledger, JSON and row exports
//! - secure-gate wrapped key material

pub mod aliases;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod customer;
pub mod enums;
pub mod error;
pub mod export;
pub mod key_ops;
pub mod ledger;
pub mod payment;
pub mod shop;

// Re-export everything users need at the crate root
pub use aliases::{FieldKey32, KeyPassphrase};
pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, Product, ProductId};
pub use checkout::{CheckoutCoordinator, CheckoutOutcome, Quote, Receipt};
pub use config::load as load_config;
pub use crypto::{
    decrypt_field, encrypt_field, EncryptedField, FieldCipher, HybridField, HybridFieldCipher,
    SealedField, SymmetricFieldCipher,
};
pub use customer::{Customer, CustomerId};
pub use enums::{FieldAlgorithm, WrapScheme};
pub use error::{CoreError, Result};
pub use key_ops::{HybridKeyProvider, KeyProvider};
pub use ledger::{Order, OrderLedger, OrderLine, OrderNumber};
pub use payment::{DecliningGateway, LimitGateway, PaymentGateway, SimulatedGateway, TimeoutGateway};
pub use shop::{OrderSummary, Shop};
