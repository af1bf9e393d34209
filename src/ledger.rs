// src/ledger.rs
//! Append-only record of completed orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::ProductId;
use crate::customer::CustomerId;

pub type OrderNumber = u64;

/// A cart line frozen at checkout time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order ready to be recorded; the ledger assigns its number
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub number: OrderNumber,
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

/// Orders in append order, numbered densely from 1
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderLedger {
    orders: Vec<Order>,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, order: NewOrder) -> OrderNumber {
        let number = self.next_number();
        self.orders.push(Order {
            number,
            customer_id: order.customer_id,
            lines: order.lines,
            total: order.total,
            placed_at: Utc::now(),
        });
        number
    }

    pub fn next_number(&self) -> OrderNumber {
        self.orders.len() as OrderNumber + 1
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, number: OrderNumber) -> Option<&Order> {
        let index = usize::try_from(number.checked_sub(1)?).ok()?;
        self.orders.get(index)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Sum of all recorded order totals
    pub fn revenue(&self) -> Decimal {
        self.orders.iter().map(|o| o.total).sum()
    }
}
