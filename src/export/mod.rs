// src/export/mod.rs
//! Export utilities for encrypted-checkout
//!
//! JSON snapshots and row-oriented order/product records.
//! Customer fields stay sealed in every export.

pub use json::{export_to_json, write_json};
pub use rows::{order_rows, product_rows, OrderRow, ProductRow};

pub mod json;
pub mod rows;
