// src/export/json.rs
use std::io::Write;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::customer::Customer;
use crate::enums::ExportFormat;
use crate::error::Result;
use crate::ledger::{Order, OrderLedger};

use super::rows::{order_rows, product_rows, OrderRow, ProductRow};

#[derive(Serialize)]
struct Snapshot<'a> {
    export_format: &'static str,
    exported_at: String,
    exporter_version: &'static str,
    total_products: usize,
    total_customers: usize,
    total_orders: usize,
    products: Vec<ProductRow>,
    customers: Vec<&'a Customer>,
    orders: &'a [Order],
    order_rows: Vec<OrderRow>,
}

/// Write a portable JSON snapshot of the shop.
///
/// Customer names and emails are written as ciphertext; the key is needed
/// to read them back.
pub fn write_json<'a, W, I>(
    mut writer: W,
    catalog: &Catalog,
    ledger: &OrderLedger,
    customers: I,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Customer>,
{
    let customers: Vec<&Customer> = customers.into_iter().collect();
    let export = Snapshot {
        export_format: ExportFormat::JsonV1.tag(),
        exported_at: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        exporter_version: env!("CARGO_PKG_VERSION"),
        total_products: catalog.len(),
        total_customers: customers.len(),
        total_orders: ledger.len(),
        products: product_rows(catalog),
        customers,
        orders: ledger.orders(),
        order_rows: order_rows(ledger),
    };

    serde_json::to_writer_pretty(&mut writer, &export)?;
    writer.flush()?;
    Ok(())
}

pub fn export_to_json<'a, P, I>(
    path: P,
    catalog: &Catalog,
    ledger: &OrderLedger,
    customers: I,
) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Customer>,
{
    let file = std::fs::File::create(path.as_ref())?;
    write_json(std::io::BufWriter::new(file), catalog, ledger, customers)?;
    info!(
        path = %path.as_ref().display(),
        orders = ledger.len(),
        "exported snapshot"
    );
    Ok(())
}
