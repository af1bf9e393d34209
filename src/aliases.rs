// src/aliases.rs
//! Re-exports secure-gate's ergonomic secret types
//!
//! These are the canonical secret types used throughout encrypted-checkout.

pub use secure_gate::{dynamic_alias, fixed_alias};

// Fixed-size secrets
fixed_alias!(FieldKey32, 32); // 256-bit AEAD key protecting customer fields

// Dynamic secrets
dynamic_alias!(KeyPassphrase, String); // Unlocks a PKCS#8-encrypted private key
