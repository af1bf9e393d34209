// src/payment.rs
//! Payment authorization collaborators
//!
//! Any non-approval is a decline. Nothing here retries.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::config::{CheckoutSettings, GatewaySettings};
use crate::consts::DEFAULT_GATEWAY_NAME;

pub trait PaymentGateway: Send + Sync {
    fn name(&self) -> &str;

    /// `true` when the amount is authorized
    fn process_payment(&self, amount: Decimal) -> bool;
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for Arc<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        (**self).process_payment(amount)
    }
}

impl<G: PaymentGateway + ?Sized> PaymentGateway for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        (**self).process_payment(amount)
    }
}

/// Approves every payment
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    name: String,
}

impl SimulatedGateway {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn from_settings(settings: &GatewaySettings) -> Self {
        Self::new(settings.name.clone())
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_NAME)
    }
}

impl PaymentGateway for SimulatedGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        info!(gateway = %self.name, %amount, "processing payment");
        true
    }
}

/// Declines every payment
#[derive(Debug, Clone)]
pub struct DecliningGateway {
    name: String,
}

impl DecliningGateway {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl PaymentGateway for DecliningGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        info!(gateway = %self.name, %amount, "payment declined");
        false
    }
}

/// Approves amounts up to a ceiling
#[derive(Debug, Clone)]
pub struct LimitGateway {
    name: String,
    limit: Decimal,
}

impl LimitGateway {
    pub fn new(name: impl Into<String>, limit: Decimal) -> Self {
        Self {
            name: name.into(),
            limit,
        }
    }
}

impl PaymentGateway for LimitGateway {
    fn name(&self) -> &str {
        &self.name
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        let approved = amount <= self.limit;
        info!(gateway = %self.name, %amount, approved, "processing payment");
        approved
    }
}

/// Bounds another gateway's authorization time; a timeout is a decline.
///
/// The call runs on a worker thread. A timed-out call keeps running in the
/// background and its answer is discarded.
#[derive(Debug)]
pub struct TimeoutGateway<G> {
    inner: Arc<G>,
    timeout: Duration,
}

impl<G: PaymentGateway + 'static> TimeoutGateway<G> {
    pub fn new(inner: G, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            timeout,
        }
    }

    /// Bound `inner` by `[checkout] payment_timeout_ms`
    pub fn from_settings(inner: G, settings: &CheckoutSettings) -> Self {
        Self::new(inner, settings.payment_timeout())
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<G: PaymentGateway + 'static> PaymentGateway for TimeoutGateway<G> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn process_payment(&self, amount: Decimal) -> bool {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let spawned = thread::Builder::new()
            .name("payment-auth".into())
            .spawn(move || {
                // Receiver may already be gone after a timeout
                let _ = tx.send(inner.process_payment(amount));
            });
        if let Err(err) = spawned {
            warn!(%err, "could not start payment authorization");
            return false;
        }

        match rx.recv_timeout(self.timeout) {
            Ok(approved) => approved,
            Err(_) => {
                warn!(
                    gateway = %self.inner.name(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "payment authorization timed out, treating as declined"
                );
                false
            }
        }
    }
}
