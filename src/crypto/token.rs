// src/crypto/token.rs
//! Sealed field token layout
//!
//! `base64url( version | issued_at (u64 BE) | nonce | ciphertext + tag )`
//!
//! The version byte and timestamp are authenticated as associated data.

use std::fmt;

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::consts::{AEAD_TAG_LEN, TOKEN_HEADER_LEN};
use crate::enums::FieldAlgorithm;
use crate::error::{CoreError, Result};

/// A customer field sealed under a symmetric key
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedField(String);

impl EncryptedField {
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        Self(URL_SAFE.encode(bytes))
    }

    /// Wrap a token string received from elsewhere (an export, a database)
    pub fn from_token(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub(crate) fn decode(&self) -> Result<Vec<u8>> {
        URL_SAFE_NO_PAD
            .decode(self.0.trim_end_matches('='))
            .map_err(|_| CoreError::DecryptionFailed)
    }

    /// Algorithm named by the version byte, if the token is well formed
    pub fn algorithm(&self) -> Option<FieldAlgorithm> {
        let bytes = self.decode().ok()?;
        bytes.first().copied().and_then(FieldAlgorithm::from_version_byte)
    }

    /// Embedded creation time. Unauthenticated until the token is decrypted.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        let bytes = self.decode().ok()?;
        let parts = TokenParts::split(&bytes).ok()?;
        DateTime::from_timestamp(i64::try_from(parts.issued_at).ok()?, 0)
    }
}

impl fmt::Debug for EncryptedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncryptedField({} chars)", self.0.len())
    }
}

impl fmt::Display for EncryptedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn header(algorithm: FieldAlgorithm, issued_at: u64) -> [u8; TOKEN_HEADER_LEN] {
    let mut header = [0u8; TOKEN_HEADER_LEN];
    header[0] = algorithm.version_byte();
    header[1..].copy_from_slice(&issued_at.to_be_bytes());
    header
}

/// Borrowed view over a decoded token
pub(crate) struct TokenParts<'a> {
    pub algorithm: FieldAlgorithm,
    pub issued_at: u64,
    pub header: &'a [u8],
    pub nonce: &'a [u8],
    pub ciphertext: &'a [u8],
}

impl<'a> TokenParts<'a> {
    pub fn split(bytes: &'a [u8]) -> Result<Self> {
        let algorithm = bytes
            .first()
            .copied()
            .and_then(FieldAlgorithm::from_version_byte)
            .ok_or(CoreError::DecryptionFailed)?;
        let nonce_end = TOKEN_HEADER_LEN + algorithm.nonce_len();
        if bytes.len() < nonce_end + AEAD_TAG_LEN {
            return Err(CoreError::DecryptionFailed);
        }

        let (header, rest) = bytes.split_at(TOKEN_HEADER_LEN);
        let (nonce, ciphertext) = rest.split_at(algorithm.nonce_len());
        let ts: [u8; 8] = header[1..]
            .try_into()
            .map_err(|_| CoreError::DecryptionFailed)?;

        Ok(Self {
            algorithm,
            issued_at: u64::from_be_bytes(ts),
            header,
            nonce,
            ciphertext,
        })
    }
}
