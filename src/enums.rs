// src/enums.rs
//! Public enum types used throughout the crate
//!
//! Central location for all #[derive(...)] enums that represent
//! user-visible choices: field algorithms, key wrapping, export formats.

use serde::{Deserialize, Serialize};

use crate::consts::{
    AES_GCM_NONCE_LEN, TOKEN_VERSION_AES256_GCM, TOKEN_VERSION_XCHACHA20, XCHACHA_NONCE_LEN,
};

/// Supported field encryption algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum FieldAlgorithm {
    #[default]
    #[serde(rename = "aes256-gcm")]
    Aes256Gcm,
    #[serde(rename = "xchacha20-poly1305")]
    XChaCha20Poly1305,
}

impl FieldAlgorithm {
    /// Version byte written at the front of every token
    pub const fn version_byte(self) -> u8 {
        match self {
            Self::Aes256Gcm => TOKEN_VERSION_AES256_GCM,
            Self::XChaCha20Poly1305 => TOKEN_VERSION_XCHACHA20,
        }
    }

    pub const fn from_version_byte(byte: u8) -> Option<Self> {
        match byte {
            TOKEN_VERSION_AES256_GCM => Some(Self::Aes256Gcm),
            TOKEN_VERSION_XCHACHA20 => Some(Self::XChaCha20Poly1305),
            _ => None,
        }
    }

    pub const fn nonce_len(self) -> usize {
        match self {
            Self::Aes256Gcm => AES_GCM_NONCE_LEN,
            Self::XChaCha20Poly1305 => XCHACHA_NONCE_LEN,
        }
    }
}

/// Asymmetric scheme used to wrap per-field keys in the hybrid variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum WrapScheme {
    /// RSA-OAEP, SHA-256 for both the label hash and MGF1
    #[default]
    RsaOaepSha256,
}

/// Snapshot export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum ExportFormat {
    #[default]
    JsonV1,
}

impl ExportFormat {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::JsonV1 => "encrypted-checkout-v1",
        }
    }
}
