// src/crypto/mod.rs
//! Field encryption for customer PII
//!
//! Free functions do the work on explicit keys; [`FieldCipher`] is the seam
//! the rest of the crate seals and opens customer fields through.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CryptoSettings;
use crate::enums::FieldAlgorithm;
use crate::error::{CoreError, Result};
use crate::key_ops::{HybridKeyProvider, KeyProvider};

pub mod decrypt;
pub mod encrypt;
pub mod hybrid;
pub mod rotate;
pub mod token;

pub use decrypt::{decrypt_field, decrypt_field_with_ttl};
pub use encrypt::{encrypt_field, encrypt_field_at};
pub use hybrid::{decrypt_field_hybrid, encrypt_field_hybrid, HybridField};
pub use rotate::rotate_field;
pub use token::EncryptedField;

/// A stored customer field, in whichever scheme sealed it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SealedField {
    Symmetric(EncryptedField),
    Hybrid(HybridField),
}

pub trait FieldCipher: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<SealedField>;

    fn open(&self, field: &SealedField) -> Result<String>;
}

/// Seals fields under the process field key
#[derive(Debug, Clone)]
pub struct SymmetricFieldCipher {
    keys: Arc<KeyProvider>,
    algorithm: FieldAlgorithm,
}

impl SymmetricFieldCipher {
    pub fn new(keys: Arc<KeyProvider>, algorithm: FieldAlgorithm) -> Self {
        Self { keys, algorithm }
    }

    /// Key from the configured environment variable, configured algorithm
    pub fn from_settings(settings: &CryptoSettings) -> Result<Self> {
        let keys = KeyProvider::from_env(&settings.key_env_var)?;
        Ok(Self::new(Arc::new(keys), settings.algorithm))
    }

    pub fn algorithm(&self) -> FieldAlgorithm {
        self.algorithm
    }
}

impl FieldCipher for SymmetricFieldCipher {
    fn seal(&self, plaintext: &str) -> Result<SealedField> {
        let key = self.keys.current_key()?;
        encrypt_field(plaintext, key, self.algorithm).map(SealedField::Symmetric)
    }

    fn open(&self, field: &SealedField) -> Result<String> {
        match field {
            SealedField::Symmetric(token) => decrypt_field(token, self.keys.current_key()?),
            SealedField::Hybrid(_) => Err(CoreError::DecryptionFailed),
        }
    }
}

/// Seals fields with a fresh key per call, wrapped for the RSA key pair
#[derive(Debug, Clone)]
pub struct HybridFieldCipher {
    keys: Arc<HybridKeyProvider>,
    algorithm: FieldAlgorithm,
}

impl HybridFieldCipher {
    pub fn new(keys: Arc<HybridKeyProvider>, algorithm: FieldAlgorithm) -> Self {
        Self { keys, algorithm }
    }

    /// Fresh key pair of the configured size
    pub fn from_settings(settings: &CryptoSettings) -> Result<Self> {
        let keys = HybridKeyProvider::generate(settings.rsa_bits)?;
        Ok(Self::new(Arc::new(keys), settings.algorithm))
    }

    pub fn algorithm(&self) -> FieldAlgorithm {
        self.algorithm
    }

    pub fn keys(&self) -> &Arc<HybridKeyProvider> {
        &self.keys
    }
}

impl FieldCipher for HybridFieldCipher {
    fn seal(&self, plaintext: &str) -> Result<SealedField> {
        encrypt_field_hybrid(plaintext, self.keys.public_key(), self.algorithm)
            .map(SealedField::Hybrid)
    }

    fn open(&self, field: &SealedField) -> Result<String> {
        match field {
            SealedField::Hybrid(sealed) => decrypt_field_hybrid(sealed, &self.keys),
            SealedField::Symmetric(_) => Err(CoreError::DecryptionFailed),
        }
    }
}
