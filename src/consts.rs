// src/consts.rs
//! Shared constants: token layout and defaults

/// Length of a field key in bytes
pub const FIELD_KEY_LEN: usize = 32;

/// Token version byte for AES-256-GCM sealed fields
pub const TOKEN_VERSION_AES256_GCM: u8 = 0xA1;

/// Token version byte for XChaCha20-Poly1305 sealed fields
pub const TOKEN_VERSION_XCHACHA20: u8 = 0xC1;

/// AES-GCM nonce length
pub const AES_GCM_NONCE_LEN: usize = 12;

/// XChaCha20 extended nonce length
pub const XCHACHA_NONCE_LEN: usize = 24;

/// Poly1305 / GHASH tag length
pub const AEAD_TAG_LEN: usize = 16;

/// version byte + big-endian u64 timestamp
pub const TOKEN_HEADER_LEN: usize = 1 + 8;

/// Default environment variable holding the base64url field key
pub const DEFAULT_KEY_ENV_VAR: &str = "ECO_FIELD_KEY";

/// Environment variable pointing at the TOML config file
pub const CONFIG_ENV_VAR: &str = "ECO_CONFIG";

/// Config file used when `ECO_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "checkout-config.toml";

/// Default RSA modulus size for the hybrid variant
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Default payment authorization timeout
pub const DEFAULT_PAYMENT_TIMEOUT_MS: u64 = 5_000;

/// Currency label attached to checkout log events
pub const DEFAULT_CURRENCY: &str = "AED";

/// Name of the always-approving simulated gateway
pub const DEFAULT_GATEWAY_NAME: &str = "SecurePaymentGateway";

/// Separator between items in a row-oriented order export
pub const ORDER_ITEMS_SEPARATOR: &str = "; ";
