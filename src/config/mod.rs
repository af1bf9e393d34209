// src/config/mod.rs
//! Configuration system for encrypted-checkout
//!
//! Central, lazy-loaded global config with TOML + env overrides.

pub use app::{from_path, from_str, load, CheckoutSettings, Config, CryptoSettings, GatewaySettings};

mod app;
mod defaults;
