// src/crypto/hybrid.rs
//! Hybrid field encryption
//!
//! Every call draws a fresh field key, seals the payload with it and wraps
//! the key for the recipient's RSA public key. The wrapped key and the
//! ciphertext travel together in a [`HybridField`].

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use rsa::RsaPublicKey;
use serde::{Deserialize, Serialize};

use crate::enums::{FieldAlgorithm, WrapScheme};
use crate::error::{CoreError, Result};
use crate::key_ops::{generate_key, wrap_key_for, HybridKeyProvider};

use super::{decrypt_field, encrypt_field, EncryptedField};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HybridField {
    pub scheme: WrapScheme,
    /// base64url of the RSA-OAEP wrapped field key
    pub wrapped_key: String,
    pub ciphertext: EncryptedField,
}

pub fn encrypt_field_hybrid(
    plaintext: &str,
    recipient: &RsaPublicKey,
    algorithm: FieldAlgorithm,
) -> Result<HybridField> {
    let key = generate_key();
    let ciphertext = encrypt_field(plaintext, &key, algorithm)?;
    let wrapped = wrap_key_for(recipient, &key)?;
    Ok(HybridField {
        scheme: WrapScheme::RsaOaepSha256,
        wrapped_key: URL_SAFE.encode(wrapped),
        ciphertext,
    })
}

pub fn decrypt_field_hybrid(field: &HybridField, keys: &HybridKeyProvider) -> Result<String> {
    if field.scheme != keys.scheme() {
        return Err(CoreError::DecryptionFailed);
    }
    let wrapped = URL_SAFE_NO_PAD
        .decode(field.wrapped_key.trim_end_matches('='))
        .map_err(|_| CoreError::DecryptionFailed)?;
    let key = keys.unwrap_symmetric_key(&wrapped)?;
    decrypt_field(&field.ciphertext, &key)
}
