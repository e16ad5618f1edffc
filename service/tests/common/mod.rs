// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use product_service::db::MemoryProductStore;
use product_service::models::Product;
use product_service::state::AppState;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Product factory ---
pub const NAMES: &[&str] = &["Hat", "Shoes", "Big Mac", "Sheets", "Laptop", "Tablet", "Phone", "Book"];
pub const CATEGORIES: &[&str] = &[
  "CLOTHS",
  "FOOD",
  "HOUSEWARES",
  "AUTOMOTIVE",
  "TOOLS",
  "ELECTRONICS",
  "BOOKS",
];

static FACTORY_SEQUENCE: Lazy<AtomicUsize> = Lazy::new(|| AtomicUsize::new(0));

/// Builds transient products whose fields vary from call to call. The name and
/// category lists have co-prime lengths so combinations keep shifting.
pub struct ProductFactory;

impl ProductFactory {
  pub fn build() -> Product {
    let n = FACTORY_SEQUENCE.fetch_add(1, Ordering::SeqCst);
    Product::new(
      NAMES[n % NAMES.len()],
      Some(format!("Factory product number {}", n)),
      Decimal::new(((n * 7919) % 199_950 + 50) as i64, 2),
      n % 3 != 0,
      CATEGORIES[(n * 3) % CATEGORIES.len()],
    )
  }

  pub fn build_batch(count: usize) -> Vec<Product> {
    (0..count).map(|_| Self::build()).collect()
  }
}

pub fn hat_payload() -> Value {
  json!({
      "name": "Hat",
      "description": "A red hat",
      "price": 19.99,
      "available": true,
      "category": "CLOTHS",
  })
}

// --- App wiring ---
/// Fresh in-memory store plus an `AppState` sharing it.
pub fn memory_state() -> (Arc<MemoryProductStore>, AppState) {
  let store = Arc::new(MemoryProductStore::new());
  let state = AppState::new(store.clone());
  (store, state)
}

/// Builds the service the same way `main.rs` does, minus the request logger.
#[macro_export]
macro_rules! test_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(product_service::web::configure_app_routes)
        .default_service(product_service::web::routes::default_service()),
    )
    .await
  };
}

/// POSTs `count` factory products and returns the created JSON bodies.
#[macro_export]
macro_rules! create_products {
  ($app:expr, $count:expr) => {{
    let mut created: Vec<serde_json::Value> = Vec::new();
    for product in common::ProductFactory::build_batch($count) {
      let req = actix_web::test::TestRequest::post()
        .uri("/products")
        .set_json(product.serialize())
        .to_request();
      let resp = actix_web::test::call_service(&$app, req).await;
      assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
      created.push(actix_web::test::read_body_json(resp).await);
    }
    created
  }};
}
