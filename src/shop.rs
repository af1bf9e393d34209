// src/shop.rs
//! The shop facade: catalog, customers, ledger and checkout wired together
//!
//! Every collaborator is injected; nothing reads ambient state.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use crate::catalog::{Catalog, Product, ProductId};
use crate::checkout::{CheckoutCoordinator, CheckoutOutcome};
use crate::config::Config;
use crate::crypto::FieldCipher;
use crate::customer::{Customer, CustomerId};
use crate::error::{CoreError, Result};
use crate::export;
use crate::ledger::{Order, OrderLedger, OrderNumber};
use crate::payment::{PaymentGateway, TimeoutGateway};

/// Order with the customer's name decrypted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub order_number: OrderNumber,
    pub customer_name: String,
    pub total: Decimal,
    pub items: Vec<String>,
}

pub struct Shop<G> {
    catalog: Arc<Mutex<Catalog>>,
    ledger: Arc<Mutex<OrderLedger>>,
    customers: BTreeMap<CustomerId, Customer>,
    cipher: Box<dyn FieldCipher>,
    coordinator: CheckoutCoordinator<TimeoutGateway<G>>,
}

impl<G: PaymentGateway + 'static> Shop<G> {
    pub fn new(cipher: Box<dyn FieldCipher>, gateway: G) -> Self {
        Self::with_config(&Config::default(), cipher, gateway)
    }

    /// Authorization is bounded by `[checkout] payment_timeout_ms`
    pub fn with_config(config: &Config, cipher: Box<dyn FieldCipher>, gateway: G) -> Self {
        let catalog = Arc::new(Mutex::new(Catalog::new()));
        let ledger = Arc::new(Mutex::new(OrderLedger::new()));
        let gateway = TimeoutGateway::from_settings(gateway, &config.checkout);
        let coordinator =
            CheckoutCoordinator::new(Arc::clone(&catalog), Arc::clone(&ledger), gateway)
                .with_settings(&config.checkout);
        Self {
            catalog,
            ledger,
            customers: BTreeMap::new(),
            cipher,
            coordinator,
        }
    }

    pub fn currency(&self) -> &str {
        self.coordinator.currency()
    }

    pub fn gateway(&self) -> &G {
        self.coordinator.gateway().inner()
    }

    pub fn cipher(&self) -> &dyn FieldCipher {
        self.cipher.as_ref()
    }

    /// Shared catalog handle for read-only reporting
    pub fn catalog(&self) -> Arc<Mutex<Catalog>> {
        Arc::clone(&self.catalog)
    }

    pub fn ledger(&self) -> Arc<Mutex<OrderLedger>> {
        Arc::clone(&self.ledger)
    }

    pub fn add_product(
        &self,
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<()> {
        self.catalog
            .lock()?
            .add_product(id, name, unit_price, quantity)?;
        Ok(())
    }

    pub fn register_customer(&mut self, id: CustomerId, name: &str, email: &str) -> Result<()> {
        if self.customers.contains_key(&id) {
            return Err(CoreError::DuplicateCustomerId(id));
        }
        let customer = Customer::register(id, name, email, self.cipher.as_ref())?;
        self.customers.insert(id, customer);
        info!(customer = id, "customer registered");
        Ok(())
    }

    pub fn customer(&self, id: CustomerId) -> Result<&Customer> {
        self.customers
            .get(&id)
            .ok_or(CoreError::CustomerNotFound(id))
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    pub fn customer_name(&self, id: CustomerId) -> Result<String> {
        self.customer(id)?.name(self.cipher.as_ref())
    }

    pub fn customer_email(&self, id: CustomerId) -> Result<String> {
        self.customer(id)?.email(self.cipher.as_ref())
    }

    pub fn add_to_cart(
        &mut self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<()> {
        let catalog = self.catalog.lock()?;
        let product = catalog.get(product_id)?;
        self.customers
            .get_mut(&customer_id)
            .ok_or(CoreError::CustomerNotFound(customer_id))?
            .add_to_cart(product, quantity)
    }

    pub fn checkout(&mut self, customer_id: CustomerId) -> Result<CheckoutOutcome> {
        let customer = self
            .customers
            .get_mut(&customer_id)
            .ok_or(CoreError::CustomerNotFound(customer_id))?;
        self.coordinator.checkout(customer)
    }

    /// Snapshot of every product in id order
    pub fn inventory(&self) -> Result<Vec<Product>> {
        Ok(self.catalog.lock()?.products().cloned().collect())
    }

    pub fn orders(&self) -> Result<Vec<Order>> {
        Ok(self.ledger.lock()?.orders().to_vec())
    }

    pub fn order_summaries(&self) -> Result<Vec<OrderSummary>> {
        let ledger = self.ledger.lock()?;
        ledger
            .orders()
            .iter()
            .map(|order| {
                Ok(OrderSummary {
                    order_number: order.number,
                    customer_name: self.customer_name(order.customer_id)?,
                    total: order.total,
                    items: order
                        .lines
                        .iter()
                        .map(|l| format!("{} x {}", l.product_name, l.quantity))
                        .collect(),
                })
            })
            .collect()
    }

    /// JSON snapshot of catalog, customers (still sealed) and orders
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        let catalog = self.catalog.lock()?;
        let ledger = self.ledger.lock()?;
        export::json::write_json(writer, &catalog, &ledger, self.customers.values())
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let catalog = self.catalog.lock()?;
        let ledger = self.ledger.lock()?;
        export::json::export_to_json(path, &catalog, &ledger, self.customers.values())
    }
}
