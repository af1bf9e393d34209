// src/key_ops.rs
//! Key generation, loading and representation
//!
//! [`KeyProvider`] holds the single symmetric field key of a process.
//! [`HybridKeyProvider`] holds an RSA key pair used to wrap per-field keys.

use std::fmt;
use std::sync::OnceLock;

use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::RngCore;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

use crate::aliases::{FieldKey32, KeyPassphrase};
use crate::consts::FIELD_KEY_LEN;
use crate::enums::WrapScheme;
use crate::error::{CoreError, Result};

/// Generate a new random 256-bit field key from the OS CSPRNG
pub fn generate_key() -> FieldKey32 {
    let mut bytes = [0u8; FIELD_KEY_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    let key = FieldKey32::new(bytes);
    bytes.zeroize();
    key
}

/// Decode a base64url key (padded or not) into a field key
pub fn decode_key(encoded: &str) -> Result<FieldKey32> {
    let raw = Zeroizing::new(
        URL_SAFE_NO_PAD
            .decode(encoded.trim().trim_end_matches('='))
            .map_err(|e| CoreError::InvalidKey(e.to_string()))?,
    );
    let mut bytes: [u8; FIELD_KEY_LEN] = raw.as_slice().try_into().map_err(|_| {
        CoreError::InvalidKey(format!(
            "expected {FIELD_KEY_LEN} key bytes, got {}",
            raw.len()
        ))
    })?;
    let key = FieldKey32::new(bytes);
    bytes.zeroize();
    Ok(key)
}

/// Padded base64url form, suitable for an environment variable
pub fn encode_key(key: &FieldKey32) -> String {
    URL_SAFE.encode(key.expose_secret())
}

/// Multiple string representations of a key for export/display
#[derive(Debug, Clone)]
pub struct KeyRepr {
    pub hex: String,
    pub base64: String,
    pub base64url_no_pad: String,
}

pub fn key_representations(key: &FieldKey32) -> KeyRepr {
    KeyRepr {
        hex: hex::encode(key.expose_secret()),
        base64: STANDARD.encode(key.expose_secret()),
        base64url_no_pad: URL_SAFE_NO_PAD.encode(key.expose_secret()),
    }
}

/// Process-scoped holder of the symmetric field key.
///
/// The key is set at most once and never persisted by this type.
#[derive(Default)]
pub struct KeyProvider {
    key: OnceLock<FieldKey32>,
}

impl KeyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider already holding a freshly generated key
    pub fn generated() -> Self {
        let provider = Self::new();
        provider.generate();
        provider
    }

    /// Load the key from an environment variable holding its base64url form
    pub fn from_env(var: &str) -> Result<Self> {
        let encoded = std::env::var(var).map_err(|_| CoreError::KeyUnavailable)?;
        let provider = Self::from_encoded(&encoded)?;
        info!(var, "field key loaded from environment");
        Ok(provider)
    }

    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let provider = Self::new();
        provider.install(decode_key(encoded)?)?;
        Ok(provider)
    }

    /// Generate a key unless one is already held; returns the held key either way
    pub fn generate(&self) -> &FieldKey32 {
        self.key.get_or_init(|| {
            info!("field key generated");
            generate_key()
        })
    }

    pub fn install(&self, key: FieldKey32) -> Result<()> {
        self.key
            .set(key)
            .map_err(|_| CoreError::InvalidKey("a field key is already installed".into()))
    }

    pub fn current_key(&self) -> Result<&FieldKey32> {
        self.key.get().ok_or(CoreError::KeyUnavailable)
    }

    pub fn has_key(&self) -> bool {
        self.key.get().is_some()
    }
}

impl fmt::Debug for KeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyProvider")
            .field("has_key", &self.has_key())
            .finish()
    }
}

fn oaep() -> Oaep {
    // SHA-256 for the label hash and MGF1 on both wrap and unwrap
    Oaep::new::<Sha256>()
}

/// Wrap a field key for the holder of `public`
pub fn wrap_key_for(public: &RsaPublicKey, key: &FieldKey32) -> Result<Vec<u8>> {
    public
        .encrypt(&mut rand::thread_rng(), oaep(), key.expose_secret())
        .map_err(|e| CoreError::Encryption(e.to_string()))
}

/// RSA key pair for the hybrid variant
pub struct HybridKeyProvider {
    public: RsaPublicKey,
    private: RsaPrivateKey,
}

impl HybridKeyProvider {
    pub fn generate(bits: usize) -> Result<Self> {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), bits)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))?;
        let public = RsaPublicKey::from(&private);
        info!(bits, "RSA key pair generated");
        Ok(Self { public, private })
    }

    /// Load a PKCS#8 key pair from PEM text.
    ///
    /// With a passphrase the private key must be an encrypted PKCS#8 document.
    pub fn from_pem(
        public_pem: &str,
        private_pem: &str,
        passphrase: Option<&KeyPassphrase>,
    ) -> Result<Self> {
        let public = RsaPublicKey::from_public_key_pem(public_pem)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))?;
        let private = match passphrase {
            Some(pass) => {
                RsaPrivateKey::from_pkcs8_encrypted_pem(private_pem, pass.expose_secret().as_bytes())
            }
            None => RsaPrivateKey::from_pkcs8_pem(private_pem),
        }
        .map_err(|e| CoreError::InvalidKey(e.to_string()))?;

        if RsaPublicKey::from(&private) != public {
            return Err(CoreError::InvalidKey(
                "public key does not belong to the private key".into(),
            ));
        }
        debug!(bits = public.size() * 8, "RSA key pair loaded from PEM");
        Ok(Self { public, private })
    }

    pub fn scheme(&self) -> WrapScheme {
        WrapScheme::RsaOaepSha256
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key_pem(&self) -> Result<String> {
        self.public
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    /// PKCS#8 PEM of the private key, encrypted when a passphrase is given
    pub fn private_key_pem(&self, passphrase: Option<&KeyPassphrase>) -> Result<Zeroizing<String>> {
        match passphrase {
            Some(pass) => self.private.to_pkcs8_encrypted_pem(
                &mut rand::thread_rng(),
                pass.expose_secret().as_bytes(),
                LineEnding::LF,
            ),
            None => self.private.to_pkcs8_pem(LineEnding::LF),
        }
        .map_err(|e| CoreError::InvalidKey(e.to_string()))
    }

    pub fn wrap_symmetric_key(&self, key: &FieldKey32) -> Result<Vec<u8>> {
        wrap_key_for(&self.public, key)
    }

    pub fn unwrap_symmetric_key(&self, wrapped: &[u8]) -> Result<FieldKey32> {
        let raw = Zeroizing::new(
            self.private
                .decrypt(oaep(), wrapped)
                .map_err(|_| CoreError::DecryptionFailed)?,
        );
        let mut bytes: [u8; FIELD_KEY_LEN] = raw
            .as_slice()
            .try_into()
            .map_err(|_| CoreError::DecryptionFailed)?;
        let key = FieldKey32::new(bytes);
        bytes.zeroize();
        Ok(key)
    }
}

impl fmt::Debug for HybridKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HybridKeyProvider")
            .field("scheme", &self.scheme())
            .field("bits", &(self.public.size() * 8))
            .finish_non_exhaustive()
    }
}
