// service/src/db/mod.rs

//! Persistence seam for the Product entity.
//!
//! Handlers and the entity model only ever see `dyn ProductStore`; the server
//! picks the backend at start-up (see `config::StoreBackend`).

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::Result as AppResult;
use crate::models::Product;

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// Row selection for listing queries. Exactly one predicate is ever applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
  All,
  Name(String),
  Category(String),
  Availability(bool),
  Price(Decimal),
}

impl ProductFilter {
  pub fn matches(&self, product: &Product) -> bool {
    match self {
      ProductFilter::All => true,
      ProductFilter::Name(name) => product.name == *name,
      ProductFilter::Category(category) => product.category == *category,
      ProductFilter::Availability(flag) => product.available == *flag,
      ProductFilter::Price(price) => product.price == *price,
    }
  }
}

/// Durable CRUD primitives over the products table.
///
/// Every method is a single statement on the backing store. Implementations
/// assign ids on `insert` and never change them afterwards.
#[async_trait]
pub trait ProductStore: Send + Sync {
  /// Persists a transient product and returns the id assigned to it.
  async fn insert(&self, product: &Product) -> AppResult<i64>;

  /// Overwrites the row with `id`. Returns `false` when no such row exists.
  async fn update(&self, id: i64, product: &Product) -> AppResult<bool>;

  /// Returns `false` when no such row exists.
  async fn delete(&self, id: i64) -> AppResult<bool>;

  async fn find(&self, id: i64) -> AppResult<Option<Product>>;

  /// Matching rows in ascending id order.
  async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>>;
}
