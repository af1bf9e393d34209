// src/checkout.rs
//! Checkout: quote → authorize → fulfil
//!
//! Fulfilment (stock decrements, ledger append) runs with the catalog and
//! ledger locks held, always taken in that order. Either every line is
//! deducted and the order recorded, or nothing changes.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::cart::{Cart, CartLine};
use crate::catalog::{Catalog, ProductId};
use crate::config::CheckoutSettings;
use crate::customer::Customer;
use crate::error::{CoreError, Result};
use crate::ledger::{NewOrder, OrderLedger, OrderLine, OrderNumber};
use crate::payment::PaymentGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_number: OrderNumber,
    pub total: Decimal,
}

/// Terminal state of one checkout attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Paid(Receipt),
    /// Business outcome, not a fault: cart and stock are untouched
    Declined { total: Decimal },
}

impl CheckoutOutcome {
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::Paid(_))
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match self {
            Self::Paid(receipt) => Some(receipt),
            Self::Declined { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<Receipt> {
        match self {
            Self::Paid(receipt) => Ok(receipt),
            Self::Declined { total } => Err(CoreError::PaymentDeclined { amount: total }),
        }
    }
}

/// Priced snapshot of a cart taken at quote time
#[derive(Debug, Clone)]
pub struct Quote {
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

pub struct CheckoutCoordinator<G> {
    catalog: Arc<Mutex<Catalog>>,
    ledger: Arc<Mutex<OrderLedger>>,
    gateway: G,
    allow_empty_cart: bool,
    currency: String,
}

impl<G: PaymentGateway> CheckoutCoordinator<G> {
    pub fn new(catalog: Arc<Mutex<Catalog>>, ledger: Arc<Mutex<OrderLedger>>, gateway: G) -> Self {
        Self {
            catalog,
            ledger,
            gateway,
            allow_empty_cart: CheckoutSettings::default().allow_empty_cart,
            currency: CheckoutSettings::default().currency,
        }
    }

    /// Applies the empty-cart policy and currency label. The payment timeout
    /// is the gateway's concern, see [`TimeoutGateway::from_settings`].
    ///
    /// [`TimeoutGateway::from_settings`]: crate::payment::TimeoutGateway::from_settings
    pub fn with_settings(mut self, settings: &CheckoutSettings) -> Self {
        self.allow_empty_cart = settings.allow_empty_cart;
        self.currency = settings.currency.clone();
        self
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Price the cart against current catalog prices and check stock
    pub fn quote(&self, cart: &Cart) -> Result<Quote> {
        if cart.is_empty() && !self.allow_empty_cart {
            return Err(CoreError::EmptyCart);
        }
        let catalog = self.catalog.lock()?;
        ensure_stock(&catalog, cart.lines())?;
        let lines = cart
            .lines()
            .iter()
            .map(|line| {
                let product = catalog.get(line.product_id)?;
                Ok(OrderLine {
                    product_id: product.id,
                    product_name: product.name.clone(),
                    unit_price: product.unit_price,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let total = cart.compute_total(&catalog)?;
        Ok(Quote { lines, total })
    }

    /// Quote, authorize, then fulfil.
    ///
    /// Stock that runs out between the quote and fulfilment fails the checkout
    /// with `InsufficientStock` after the payment was approved. Decrements are
    /// rolled back and the cart is kept, but the charge is not reversed:
    /// [`PaymentGateway`] has no void operation.
    pub fn checkout(&self, customer: &mut Customer) -> Result<CheckoutOutcome> {
        let currency = self.currency.as_str();
        let quote = self.quote(customer.cart())?;
        debug!(customer = customer.id(), total = %quote.total, currency, lines = quote.lines.len(), "quoted");

        if !self.gateway.process_payment(quote.total) {
            info!(
                customer = customer.id(),
                gateway = self.gateway.name(),
                total = %quote.total,
                currency,
                "payment declined, order not placed"
            );
            return Ok(CheckoutOutcome::Declined { total: quote.total });
        }

        let order_number = {
            let mut catalog = self.catalog.lock()?;
            let mut ledger = self.ledger.lock()?;
            if let Err(err) = apply_decrements(&mut catalog, customer.cart().lines()) {
                // Stock moved between quote and fulfilment
                error!(
                    customer = customer.id(),
                    gateway = self.gateway.name(),
                    total = %quote.total,
                    currency,
                    %err,
                    "authorized checkout could not be fulfilled, charge not reversed"
                );
                return Err(err);
            }
            ledger.append(NewOrder {
                customer_id: customer.id(),
                lines: quote.lines,
                total: quote.total,
            })
        };
        customer.cart_mut().clear();

        info!(order = order_number, customer = customer.id(), total = %quote.total, currency, "order placed");
        Ok(CheckoutOutcome::Paid(Receipt {
            order_number,
            total: quote.total,
        }))
    }
}

/// Demand per product; repeated lines for one product add up
fn demand(lines: &[CartLine]) -> Result<BTreeMap<ProductId, u32>> {
    let mut demand = BTreeMap::new();
    for line in lines {
        let wanted = demand.entry(line.product_id).or_insert(0u32);
        *wanted = wanted
            .checked_add(line.quantity)
            .ok_or(CoreError::InvalidQuantity(line.quantity))?;
    }
    Ok(demand)
}

fn ensure_stock(catalog: &Catalog, lines: &[CartLine]) -> Result<()> {
    for (product_id, requested) in demand(lines)? {
        let available = catalog.get(product_id)?.quantity_on_hand;
        if requested > available {
            return Err(CoreError::InsufficientStock {
                product_id,
                requested,
                available,
            });
        }
    }
    Ok(())
}

/// Decrement every line, undoing the ones already applied on failure
fn apply_decrements(catalog: &mut Catalog, lines: &[CartLine]) -> Result<()> {
    let mut applied: Vec<&CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Err(err) = catalog.decrement_quantity(line.product_id, line.quantity) {
            for done in applied.iter().rev() {
                if let Err(restock_err) = catalog.restock(done.product_id, done.quantity) {
                    error!(product = done.product_id, %restock_err, "rollback restock failed");
                }
            }
            return Err(err);
        }
        applied.push(line);
    }
    Ok(())
}
