// src/config/defaults.rs
use crate::config::app::{CheckoutSettings, CryptoSettings, GatewaySettings};
use crate::consts::{
    DEFAULT_CURRENCY, DEFAULT_GATEWAY_NAME, DEFAULT_KEY_ENV_VAR, DEFAULT_PAYMENT_TIMEOUT_MS,
    DEFAULT_RSA_BITS,
};
use crate::enums::FieldAlgorithm;

impl Default for CryptoSettings {
    fn default() -> Self {
        Self {
            algorithm: FieldAlgorithm::default(),
            key_env_var: DEFAULT_KEY_ENV_VAR.into(),
            rsa_bits: DEFAULT_RSA_BITS,
        }
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            // Reference behaviour: an empty cart checks out for a zero total
            allow_empty_cart: true,
            payment_timeout_ms: DEFAULT_PAYMENT_TIMEOUT_MS,
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_GATEWAY_NAME.into(),
        }
    }
}
