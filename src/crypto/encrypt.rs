// src/crypto/encrypt.rs
use aes_gcm::aead::{Aead, KeyInit, Payload};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use chrono::Utc;
use rand::RngCore;

use crate::aliases::FieldKey32;
use crate::enums::FieldAlgorithm;
use crate::error::{CoreError, Result};

use super::token::{header, EncryptedField};

/// Encrypt a customer field → base64url token carrying timestamp, nonce and tag
pub fn encrypt_field(
    plaintext: &str,
    key: &FieldKey32,
    algorithm: FieldAlgorithm,
) -> Result<EncryptedField> {
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or_default();
    encrypt_field_at(plaintext, key, algorithm, now)
}

/// Same as [`encrypt_field`] with an explicit issue time (unix seconds)
pub fn encrypt_field_at(
    plaintext: &str,
    key: &FieldKey32,
    algorithm: FieldAlgorithm,
    issued_at: u64,
) -> Result<EncryptedField> {
    let header = header(algorithm, issued_at);
    let mut nonce = vec![0u8; algorithm.nonce_len()];
    rand::thread_rng().fill_bytes(&mut nonce);

    let payload = Payload {
        msg: plaintext.as_bytes(),
        aad: &header,
    };
    let sealed = match algorithm {
        FieldAlgorithm::Aes256Gcm => Aes256Gcm::new_from_slice(key.expose_secret())
            .map_err(|e| CoreError::Encryption(e.to_string()))?
            .encrypt(aes_gcm::Nonce::from_slice(&nonce), payload),
        FieldAlgorithm::XChaCha20Poly1305 => {
            XChaCha20Poly1305::new_from_slice(key.expose_secret())
                .map_err(|e| CoreError::Encryption(e.to_string()))?
                .encrypt(XNonce::from_slice(&nonce), payload)
        }
    }
    .map_err(|e| CoreError::Encryption(e.to_string()))?;

    let mut token = Vec::with_capacity(header.len() + nonce.len() + sealed.len());
    token.extend_from_slice(&header);
    token.extend_from_slice(&nonce);
    token.extend_from_slice(&sealed);
    Ok(EncryptedField::from_bytes(&token))
}
