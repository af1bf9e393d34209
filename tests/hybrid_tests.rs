// tests/hybrid_tests.rs
mod common;

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use encrypted_checkout::aliases::KeyPassphrase;
use encrypted_checkout::crypto::{decrypt_field_hybrid, encrypt_field_hybrid};
use encrypted_checkout::error::CoreError;
use encrypted_checkout::key_ops::generate_key;
use encrypted_checkout::{
    FieldAlgorithm, FieldCipher, HybridFieldCipher, HybridKeyProvider, SealedField,
};
use rsa::Oaep;

use common::{hybrid_keys, symmetric_cipher};

#[test]
fn test_hybrid_roundtrip() {
    let keys = hybrid_keys();
    let field =
        encrypt_field_hybrid("alice@customer.com", keys.public_key(), FieldAlgorithm::Aes256Gcm)
            .unwrap();
    assert_eq!(
        decrypt_field_hybrid(&field, &keys).unwrap(),
        "alice@customer.com"
    );
}

#[test]
fn test_each_call_uses_a_fresh_symmetric_key() {
    let keys = hybrid_keys();
    let a = encrypt_field_hybrid("Bob", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();
    let b = encrypt_field_hybrid("Bob", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();

    let key_a = keys
        .unwrap_symmetric_key(&URL_SAFE.decode(&a.wrapped_key).unwrap())
        .unwrap();
    let key_b = keys
        .unwrap_symmetric_key(&URL_SAFE.decode(&b.wrapped_key).unwrap())
        .unwrap();
    assert_ne!(key_a.expose_secret(), key_b.expose_secret());
}

#[test]
fn test_wrapped_key_and_ciphertext_must_travel_together() {
    let keys = hybrid_keys();
    let a = encrypt_field_hybrid("Alice", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();
    let b = encrypt_field_hybrid("Bob", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();

    let mut mixed = a.clone();
    mixed.wrapped_key = b.wrapped_key;
    assert!(matches!(
        decrypt_field_hybrid(&mixed, &keys),
        Err(CoreError::DecryptionFailed)
    ));
}

#[test]
fn test_tampered_wrapped_key_fails() {
    let keys = hybrid_keys();
    let mut field =
        encrypt_field_hybrid("Alice", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();
    let mut raw = URL_SAFE.decode(&field.wrapped_key).unwrap();
    raw[10] ^= 0xFF;
    field.wrapped_key = URL_SAFE.encode(raw);
    assert!(matches!(
        decrypt_field_hybrid(&field, &keys),
        Err(CoreError::DecryptionFailed)
    ));
}

#[test]
fn test_other_key_pair_cannot_decrypt() {
    let keys = hybrid_keys();
    let other = HybridKeyProvider::generate(1024).unwrap();
    let field =
        encrypt_field_hybrid("Alice", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();
    assert!(matches!(
        decrypt_field_hybrid(&field, &other),
        Err(CoreError::DecryptionFailed)
    ));
}

#[test]
fn test_mismatched_oaep_hash_is_a_hard_failure() {
    let keys = hybrid_keys();
    let key = generate_key();
    let wrapped_sha512 = keys
        .public_key()
        .encrypt(
            &mut rand::thread_rng(),
            Oaep::new::<sha2::Sha512>(),
            key.expose_secret(),
        )
        .unwrap();
    assert!(matches!(
        keys.unwrap_symmetric_key(&wrapped_sha512),
        Err(CoreError::DecryptionFailed)
    ));
}

#[test]
fn test_wrap_unwrap_symmetric_key() {
    let keys = hybrid_keys();
    let key = generate_key();
    let wrapped = keys.wrap_symmetric_key(&key).unwrap();
    let unwrapped = keys.unwrap_symmetric_key(&wrapped).unwrap();
    assert_eq!(unwrapped.expose_secret(), key.expose_secret());
}

#[test]
fn test_pem_roundtrip_without_passphrase() {
    let keys = hybrid_keys();
    let public_pem = keys.public_key_pem().unwrap();
    let private_pem = keys.private_key_pem(None).unwrap();
    assert!(public_pem.starts_with("-----BEGIN PUBLIC KEY-----"));

    let loaded = HybridKeyProvider::from_pem(&public_pem, &private_pem, None).unwrap();
    let field =
        encrypt_field_hybrid("Dana", keys.public_key(), FieldAlgorithm::Aes256Gcm).unwrap();
    assert_eq!(decrypt_field_hybrid(&field, &loaded).unwrap(), "Dana");
}

#[test]
fn test_pem_with_passphrase_requires_the_passphrase() {
    let keys = hybrid_keys();
    let passphrase = KeyPassphrase::new("correct horse".to_string());
    let public_pem = keys.public_key_pem().unwrap();
    let private_pem = keys.private_key_pem(Some(&passphrase)).unwrap();
    assert!(private_pem.contains("ENCRYPTED PRIVATE KEY"));

    assert!(HybridKeyProvider::from_pem(&public_pem, &private_pem, Some(&passphrase)).is_ok());

    let wrong = KeyPassphrase::new("battery staple".to_string());
    assert!(matches!(
        HybridKeyProvider::from_pem(&public_pem, &private_pem, Some(&wrong)),
        Err(CoreError::InvalidKey(_))
    ));
}

#[test]
fn test_pem_pair_must_match() {
    let keys = hybrid_keys();
    let other = HybridKeyProvider::generate(1024).unwrap();
    let result = HybridKeyProvider::from_pem(
        &other.public_key_pem().unwrap(),
        &keys.private_key_pem(None).unwrap(),
        None,
    );
    assert!(matches!(result, Err(CoreError::InvalidKey(_))));
}

#[test]
fn test_field_cipher_variants_do_not_cross() {
    let hybrid = HybridFieldCipher::new(hybrid_keys(), FieldAlgorithm::XChaCha20Poly1305);
    let symmetric = symmetric_cipher();

    let sealed_hybrid = hybrid.seal("Erin").unwrap();
    let sealed_symmetric = symmetric.seal("Erin").unwrap();
    assert!(matches!(sealed_hybrid, SealedField::Hybrid(_)));
    assert!(matches!(sealed_symmetric, SealedField::Symmetric(_)));

    assert_eq!(hybrid.open(&sealed_hybrid).unwrap(), "Erin");
    assert!(matches!(
        hybrid.open(&sealed_symmetric),
        Err(CoreError::DecryptionFailed)
    ));
    assert!(matches!(
        symmetric.open(&sealed_hybrid),
        Err(CoreError::DecryptionFailed)
    ));
}

#[test]
fn test_hybrid_cipher_shares_provider() {
    let keys = hybrid_keys();
    let a = HybridFieldCipher::new(Arc::clone(&keys), FieldAlgorithm::Aes256Gcm);
    let b = HybridFieldCipher::new(keys, FieldAlgorithm::Aes256Gcm);
    let sealed = a.seal("shared").unwrap();
    assert_eq!(b.open(&sealed).unwrap(), "shared");
}
