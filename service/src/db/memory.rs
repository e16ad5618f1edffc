// service/src/db/memory.rs
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;

use super::{ProductFilter, ProductStore};
use crate::errors::Result as AppResult;
use crate::models::product::normalize_price;
use crate::models::Product;

#[derive(Debug)]
struct Inner {
  next_id: i64,
  rows: BTreeMap<i64, Product>,
}

/// Process-local product store. Backs `PRODUCT_STORE=memory` and the HTTP
/// test-suite; ids start at 1 and are never reused, like a `BIGSERIAL`, and
/// prices are stored at the `NUMERIC(14, 2)` scale.
#[derive(Debug)]
pub struct MemoryProductStore {
  inner: RwLock<Inner>,
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self {
      inner: RwLock::new(Inner {
        next_id: 1,
        rows: BTreeMap::new(),
      }),
    }
  }

  pub fn len(&self) -> usize {
    self.inner.read().rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for MemoryProductStore {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn insert(&self, product: &Product) -> AppResult<i64> {
    let mut guard = self.inner.write();
    let id = guard.next_id;
    guard.next_id += 1;

    let mut row = product.clone();
    row.id = Some(id);
    row.price = normalize_price(row.price);
    guard.rows.insert(id, row);
    debug!(product_id = id, "memory store: inserted product");
    Ok(id)
  }

  async fn update(&self, id: i64, product: &Product) -> AppResult<bool> {
    let mut guard = self.inner.write();
    match guard.rows.get_mut(&id) {
      Some(row) => {
        *row = product.clone();
        row.id = Some(id);
        row.price = normalize_price(row.price);
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn delete(&self, id: i64) -> AppResult<bool> {
    Ok(self.inner.write().rows.remove(&id).is_some())
  }

  async fn find(&self, id: i64) -> AppResult<Option<Product>> {
    Ok(self.inner.read().rows.get(&id).cloned())
  }

  async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
    let guard = self.inner.read();
    Ok(guard.rows.values().filter(|p| filter.matches(p)).cloned().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;

  fn product(name: &str) -> Product {
    Product::new(name, None, Decimal::new(500, 2), true, "TOOLS")
  }

  #[tokio::test]
  async fn ids_are_not_reused_after_delete() {
    let store = MemoryProductStore::new();
    let first = store.insert(&product("Hammer")).await.unwrap();
    assert!(store.delete(first).await.unwrap());
    let second = store.insert(&product("Wrench")).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(store.len(), 1);
  }

  #[tokio::test]
  async fn update_keeps_the_row_id() {
    let store = MemoryProductStore::new();
    let id = store.insert(&product("Hammer")).await.unwrap();

    let mut changed = product("Sledgehammer");
    changed.id = Some(id + 100);
    assert!(store.update(id, &changed).await.unwrap());

    let row = store.find(id).await.unwrap().unwrap();
    assert_eq!(row.id, Some(id));
    assert_eq!(row.name, "Sledgehammer");
    assert!(!store.update(id + 100, &changed).await.unwrap());
  }

  #[tokio::test]
  async fn prices_are_stored_at_column_scale() {
    let store = MemoryProductStore::new();
    let mut hammer = product("Hammer");
    hammer.price = Decimal::new(15, 1);
    let id = store.insert(&hammer).await.unwrap();
    assert_eq!(store.find(id).await.unwrap().unwrap().price.to_string(), "1.50");

    hammer.price = Decimal::new(20, 0);
    assert!(store.update(id, &hammer).await.unwrap());
    assert_eq!(store.find(id).await.unwrap().unwrap().price.to_string(), "20.00");
  }
}
