// src/crypto/decrypt.rs
use std::time::Duration;

use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use chrono::Utc;
use zeroize::Zeroizing;

use crate::aliases::FieldKey32;
use crate::enums::FieldAlgorithm;
use crate::error::{CoreError, Result};

use super::token::{EncryptedField, TokenParts};

/// Tokens stamped further than this into the future fail a TTL check
const MAX_CLOCK_SKEW_SECS: u64 = 60;

/// Decrypt a sealed field → plaintext.
///
/// Wrong key, truncation, tampering and non-UTF-8 output all surface as
/// [`CoreError::DecryptionFailed`].
pub fn decrypt_field(field: &EncryptedField, key: &FieldKey32) -> Result<String> {
    let bytes = field.decode()?;
    let parts = TokenParts::split(&bytes)?;
    open(&parts, key)
}

/// Decrypt and additionally reject tokens older than `ttl`
pub fn decrypt_field_with_ttl(
    field: &EncryptedField,
    key: &FieldKey32,
    ttl: Duration,
) -> Result<String> {
    let bytes = field.decode()?;
    let parts = TokenParts::split(&bytes)?;
    let plaintext = open(&parts, key)?;

    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    if parts.issued_at > now.saturating_add(MAX_CLOCK_SKEW_SECS)
        || parts.issued_at.saturating_add(ttl.as_secs()) < now
    {
        return Err(CoreError::DecryptionFailed);
    }
    Ok(plaintext)
}

fn open(parts: &TokenParts<'_>, key: &FieldKey32) -> Result<String> {
    let payload = Payload {
        msg: parts.ciphertext,
        aad: parts.header,
    };
    let plain = match parts.algorithm {
        FieldAlgorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key.expose_secret())
            .map_err(|_| CoreError::DecryptionFailed)?
            .decrypt(aes_gcm::Nonce::from_slice(parts.nonce), payload),
        FieldAlgorithm::XChaCha20Poly1305 => {
            XChaCha20Poly1305::new_from_slice(key.expose_secret())
                .map_err(|_| CoreError::DecryptionFailed)?
                .decrypt(XNonce::from_slice(parts.nonce), payload)
        }
    }
    .map_err(|_| CoreError::DecryptionFailed)?;

    let plain = Zeroizing::new(plain);
    std::str::from_utf8(&plain)
        .map(str::to_owned)
        .map_err(|_| CoreError::DecryptionFailed)
}
