// tests/pg_store_tests.rs
//
// Runs against the database named by DATABASE_URL (a `.env` file works too)
// and truncates the products table between tests. Without DATABASE_URL every
// test returns early.
mod common;
use common::*;

use product_service::db::{PgProductStore, ProductFilter, ProductStore};
use product_service::models::Product;
use rust_decimal::Decimal;
use serial_test::serial;

async fn fresh_store() -> Option<PgProductStore> {
  setup_tracing();
  dotenvy::dotenv().ok();
  let database_url = match std::env::var("DATABASE_URL") {
    Ok(url) if !url.trim().is_empty() => url,
    _ => {
      eprintln!("DATABASE_URL not set; skipping Postgres store test");
      return None;
    }
  };

  let store = PgProductStore::connect(&database_url, 2).await.expect("connect to test database");
  store.ensure_schema().await.expect("create products table");
  sqlx::query("TRUNCATE products RESTART IDENTITY")
    .execute(store.pool())
    .await
    .expect("truncate products");
  Some(store)
}

#[tokio::test]
#[serial]
async fn test_pg_create_and_find() {
  let Some(store) = fresh_store().await else { return };

  let mut product = Product::new("Hat", Some("A red hat".to_string()), Decimal::new(1999, 2), true, "CLOTHS");
  product.create(&store).await.unwrap();
  let id = product.id.expect("id assigned by BIGSERIAL");

  let found = Product::find(&store, id).await.unwrap();
  assert_eq!(found, Some(product));
  assert_eq!(Product::find(&store, id + 1000).await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_pg_ensure_schema_is_idempotent() {
  let Some(store) = fresh_store().await else { return };
  store.ensure_schema().await.unwrap();
  store.ensure_schema().await.unwrap();
  assert!(Product::all(&store).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_pg_update_and_delete() {
  let Some(store) = fresh_store().await else { return };

  let mut product = ProductFactory::build();
  product.create(&store).await.unwrap();
  let id = product.id.unwrap();

  product.description = None;
  product.price = Decimal::new(5, 1);
  product.update(&store).await.unwrap();
  let found = Product::find(&store, id).await.unwrap().unwrap();
  assert_eq!(found.id, Some(id));
  assert_eq!(found.description, None);
  assert_eq!(found.price, Decimal::new(50, 2));

  assert!(product.delete(&store).await.unwrap());
  assert!(!product.delete(&store).await.unwrap());
  assert_eq!(Product::find(&store, id).await.unwrap(), None);
}

#[tokio::test]
#[serial]
async fn test_pg_filters_return_exact_subsets() {
  let Some(store) = fresh_store().await else { return };

  let mut products = ProductFactory::build_batch(10);
  for product in products.iter_mut() {
    product.create(&store).await.unwrap();
  }

  let name = products[0].name.clone();
  let category = products[1].category.clone();
  let price = products[2].price;
  let filters = [
    ProductFilter::All,
    ProductFilter::Name(name),
    ProductFilter::Category(category),
    ProductFilter::Availability(true),
    ProductFilter::Availability(false),
    ProductFilter::Price(price),
  ];

  for filter in filters {
    let expected: Vec<Product> = products.iter().filter(|p| filter.matches(p)).cloned().collect();
    let found = store.list(&filter).await.unwrap();
    assert_eq!(found, expected, "filter {:?}", filter);
  }
}
