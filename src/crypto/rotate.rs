// src/crypto/rotate.rs
use zeroize::Zeroizing;

use crate::aliases::FieldKey32;
use crate::enums::FieldAlgorithm;
use crate::error::Result;

use super::{decrypt_field, encrypt_field, EncryptedField};

/// Pure in-memory key rotation: re-seal a field under `new_key`
pub fn rotate_field(
    field: &EncryptedField,
    old_key: &FieldKey32,
    new_key: &FieldKey32,
    algorithm: FieldAlgorithm,
) -> Result<EncryptedField> {
    let plaintext = Zeroizing::new(decrypt_field(field, old_key)?);
    encrypt_field(&plaintext, new_key, algorithm)
}
