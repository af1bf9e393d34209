// tests/common.rs
//! Shared test utilities: logging setup and seeded fixtures
#![allow(dead_code)]

use std::sync::{Arc, Mutex, OnceLock};

use encrypted_checkout::{
    Catalog, CheckoutCoordinator, Customer, FieldAlgorithm, HybridKeyProvider, KeyProvider,
    OrderLedger, PaymentGateway, SymmetricFieldCipher,
};
use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const MANGOES: u32 = 1;
pub const PINEAPPLES: u32 = 2;
pub const POMEGRANATES: u32 = 3;

/// Initialize test-friendly logging
/// Call once at the start of any test that needs logs
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer()) // works in `cargo test`
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok(); // idempotent
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn symmetric_cipher() -> SymmetricFieldCipher {
    SymmetricFieldCipher::new(Arc::new(KeyProvider::generated()), FieldAlgorithm::Aes256Gcm)
}

/// One RSA key pair per test binary; generation is the slow part
pub fn hybrid_keys() -> Arc<HybridKeyProvider> {
    static KEYS: OnceLock<Arc<HybridKeyProvider>> = OnceLock::new();
    KEYS.get_or_init(|| Arc::new(HybridKeyProvider::generate(2048).unwrap()))
        .clone()
}

/// The reference fruit stand
pub fn seed_catalog(catalog: &mut Catalog) {
    let products = [
        (MANGOES, "Mangoes", "2.5", 50),
        (PINEAPPLES, "Pineapples", "3.0", 30),
        (POMEGRANATES, "Pomegranates", "4.0", 20),
        (4, "Cherries", "5.0", 15),
        (5, "Watermelons", "7.0", 10),
        (6, "Peaches", "2.8", 25),
        (7, "Blueberries", "6.5", 40),
        (8, "Grapes", "3.5", 35),
    ];
    for (id, name, price, qty) in products {
        catalog.add_product(id, name, dec(price), qty).unwrap();
    }
}

pub struct Fixture<G> {
    pub catalog: Arc<Mutex<Catalog>>,
    pub ledger: Arc<Mutex<OrderLedger>>,
    pub coordinator: CheckoutCoordinator<G>,
    pub cipher: SymmetricFieldCipher,
}

impl<G: PaymentGateway> Fixture<G> {
    pub fn new(gateway: G) -> Self {
        setup();
        let mut catalog = Catalog::new();
        seed_catalog(&mut catalog);
        let catalog = Arc::new(Mutex::new(catalog));
        let ledger = Arc::new(Mutex::new(OrderLedger::new()));
        let coordinator =
            CheckoutCoordinator::new(Arc::clone(&catalog), Arc::clone(&ledger), gateway);
        Self {
            catalog,
            ledger,
            coordinator,
            cipher: symmetric_cipher(),
        }
    }

    pub fn customer(&self, id: u32, name: &str) -> Customer {
        let email = format!("{}@customer.com", name.to_lowercase());
        Customer::register(id, name, &email, &self.cipher).unwrap()
    }

    pub fn add(&self, customer: &mut Customer, product_id: u32, quantity: u32) {
        let catalog = self.catalog.lock().unwrap();
        customer
            .add_to_cart(catalog.get(product_id).unwrap(), quantity)
            .unwrap();
    }

    pub fn stock(&self, product_id: u32) -> u32 {
        self.catalog
            .lock()
            .unwrap()
            .get(product_id)
            .unwrap()
            .quantity_on_hand
    }

    pub fn order_count(&self) -> usize {
        self.ledger.lock().unwrap().len()
    }
}
