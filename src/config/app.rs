// src/config/app.rs
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

use crate::consts::{CONFIG_ENV_VAR, DEFAULT_CONFIG_PATH};
use crate::enums::FieldAlgorithm;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crypto: CryptoSettings,
    pub checkout: CheckoutSettings,
    pub gateway: GatewaySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CryptoSettings {
    pub algorithm: FieldAlgorithm,
    pub key_env_var: String,
    pub rsa_bits: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    pub allow_empty_cart: bool,
    pub payment_timeout_ms: u64,
    pub currency: String,
}

impl CheckoutSettings {
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub name: String,
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Parse a TOML document; absent sections and keys fall back to defaults
pub fn from_str(content: &str) -> Result<Config> {
    let conf: Config = toml::from_str(content)?;
    if conf.crypto.key_env_var.is_empty() {
        return Err(CoreError::Config("crypto.key_env_var must not be empty".into()));
    }
    Ok(conf)
}

pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    from_str(&content)
}

/// Load config once per process; falls back to defaults if the file is missing
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }

    let config_path =
        std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let conf = if Path::new(&config_path).exists() {
        from_path(&config_path)?
    } else {
        tracing::warn!(path = %config_path, "config file not found, using built-in defaults");
        Config::default()
    };

    Ok(CONFIG.get_or_init(|| conf))
}
