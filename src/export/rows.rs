// src/export/rows.rs
//! Row-oriented records, one per product and one per order

use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::{Catalog, ProductId};
use crate::consts::ORDER_ITEMS_SEPARATOR;
use crate::customer::CustomerId;
use crate::ledger::{Order, OrderLedger, OrderNumber};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRow {
    pub order_number: OrderNumber,
    pub customer_id: CustomerId,
    /// `"Name x qty"` entries joined by `"; "`
    pub items: String,
    pub total: Decimal,
}

impl OrderRow {
    pub const COLUMNS: [&'static str; 4] = ["Order ID", "Customer ID", "Items", "Total Amount"];

    pub fn from_order(order: &Order) -> Self {
        let items = order
            .lines
            .iter()
            .map(|line| format!("{} x {}", line.product_name, line.quantity))
            .collect::<Vec<_>>()
            .join(ORDER_ITEMS_SEPARATOR);
        Self {
            order_number: order.number,
            customer_id: order.customer_id,
            items,
            total: order.total,
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> [String; 4] {
        [
            self.order_number.to_string(),
            self.customer_id.to_string(),
            self.items.clone(),
            self.total.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity_on_hand: u32,
}

impl ProductRow {
    pub const COLUMNS: [&'static str; 4] = ["Product ID", "Name", "Price", "Quantity"];

    pub fn cells(&self) -> [String; 4] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.unit_price.to_string(),
            self.quantity_on_hand.to_string(),
        ]
    }
}

pub fn order_rows(ledger: &OrderLedger) -> Vec<OrderRow> {
    ledger.orders().iter().map(OrderRow::from_order).collect()
}

pub fn product_rows(catalog: &Catalog) -> Vec<ProductRow> {
    catalog
        .products()
        .map(|p| ProductRow {
            id: p.id,
            name: p.name.clone(),
            unit_price: p.unit_price,
            quantity_on_hand: p.quantity_on_hand,
        })
        .collect()
}
