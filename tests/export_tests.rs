// tests/export_tests.rs
mod common;

use encrypted_checkout::export::{order_rows, product_rows, write_json, OrderRow, ProductRow};
use encrypted_checkout::ledger::NewOrder;
use encrypted_checkout::{
    Catalog, Customer, FieldCipher, OrderLedger, OrderLine, SimulatedGateway,
};
use serde_json::Value;
use tempfile::tempdir;

use common::{dec, seed_catalog, symmetric_cipher, Fixture, MANGOES, PINEAPPLES};

fn line(id: u32, name: &str, price: &str, quantity: u32) -> OrderLine {
    OrderLine {
        product_id: id,
        product_name: name.into(),
        unit_price: dec(price),
        quantity,
    }
}

#[test]
fn test_ledger_numbers_from_one_without_gaps() {
    let mut ledger = OrderLedger::new();
    assert!(ledger.is_empty());
    assert_eq!(ledger.next_number(), 1);

    for expected in 1..=4u64 {
        let number = ledger.append(NewOrder {
            customer_id: 101,
            lines: vec![line(1, "Mangoes", "2.5", 2)],
            total: dec("5"),
        });
        assert_eq!(number, expected);
    }

    assert_eq!(ledger.len(), 4);
    assert!(ledger.get(0).is_none());
    assert_eq!(ledger.get(4).unwrap().number, 4);
    assert!(ledger.get(5).is_none());
    assert_eq!(ledger.revenue(), dec("20"));
}

#[test]
fn test_order_line_total() {
    assert_eq!(line(1, "Peaches", "2.8", 3).line_total(), dec("8.4"));
}

#[test]
fn test_order_rows_follow_column_order() {
    let mut ledger = OrderLedger::new();
    ledger.append(NewOrder {
        customer_id: 101,
        lines: vec![
            line(1, "Mangoes", "2.5", 5),
            line(2, "Pineapples", "3.0", 3),
        ],
        total: dec("21.5"),
    });

    let rows = order_rows(&ledger);
    assert_eq!(
        rows,
        vec![OrderRow {
            order_number: 1,
            customer_id: 101,
            items: "Mangoes x 5; Pineapples x 3".into(),
            total: dec("21.5"),
        }]
    );
    assert_eq!(
        OrderRow::COLUMNS,
        ["Order ID", "Customer ID", "Items", "Total Amount"]
    );
    assert_eq!(
        rows[0].cells(),
        [
            "1".to_string(),
            "101".to_string(),
            "Mangoes x 5; Pineapples x 3".to_string(),
            "21.5".to_string(),
        ]
    );
}

#[test]
fn test_product_rows_one_per_product() {
    let mut catalog = Catalog::new();
    seed_catalog(&mut catalog);
    let rows = product_rows(&catalog);
    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].cells()[1], "Mangoes");
    assert_eq!(ProductRow::COLUMNS[3], "Quantity");
}

#[test]
fn test_json_snapshot_keeps_customer_fields_sealed() {
    let fx = Fixture::new(SimulatedGateway::default());
    let mut alice = fx.customer(101, "Alice");
    fx.add(&mut alice, MANGOES, 5);
    fx.add(&mut alice, PINEAPPLES, 3);
    fx.coordinator.checkout(&mut alice).unwrap();

    let mut out = Vec::new();
    write_json(
        &mut out,
        &fx.catalog.lock().unwrap(),
        &fx.ledger.lock().unwrap(),
        [&alice],
    )
    .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("Alice"));
    assert!(!text.contains("alice@customer.com"));

    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["export_format"], "encrypted-checkout-v1");
    assert_eq!(json["total_orders"], 1);
    assert_eq!(json["total_customers"], 1);
    assert_eq!(json["customers"][0]["id"], 101);
    assert_eq!(json["customers"][0]["name"]["kind"], "symmetric");
    assert_eq!(json["order_rows"][0]["items"], "Mangoes x 5; Pineapples x 3");
    assert_eq!(json["orders"][0]["total"], "21.5");
    assert_eq!(json["products"][0]["quantity_on_hand"], 45);
}

#[test]
fn test_exported_ciphertext_still_decrypts() {
    let cipher = symmetric_cipher();
    let customer = Customer::register(7, "Grace", "grace@customer.com", &cipher).unwrap();

    let mut out = Vec::new();
    write_json(&mut out, &Catalog::new(), &OrderLedger::new(), [&customer]).unwrap();
    let json: Value = serde_json::from_slice(&out).unwrap();

    let sealed = serde_json::from_value(json["customers"][0]["email"].clone()).unwrap();
    assert_eq!(cipher.open(&sealed).unwrap(), "grace@customer.com");
}

#[test]
fn test_export_to_json_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let mut catalog = Catalog::new();
    seed_catalog(&mut catalog);

    encrypted_checkout::export::export_to_json(
        &path,
        &catalog,
        &OrderLedger::new(),
        std::iter::empty(),
    )
    .unwrap();

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["total_products"], 8);
    assert_eq!(json["total_orders"], 0);
}
