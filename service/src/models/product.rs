// service/src/models/product.rs

//! The Product entity and its persistence lifecycle.
//!
//! A `Product` starts out transient (`id == None`), receives its id from the
//! store on `create`, and keeps that id for the rest of its life. The store is
//! always passed in explicitly.

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, instrument, warn};

use crate::db::{ProductFilter, ProductStore};
use crate::errors::{AppError, Result as AppResult};

pub const DEFAULT_CATEGORY: &str = "UNKNOWN";

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 250;
pub const CATEGORY_MAX_LEN: usize = 50;

/// Scale of the `price` column.
pub const PRICE_SCALE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
  pub id: Option<i64>,
  pub name: String,
  pub description: Option<String>, // Description can be optional
  pub price: Decimal,
  pub available: bool,
  pub category: String,
}

impl Default for Product {
  fn default() -> Self {
    Self {
      id: None,
      name: String::new(),
      description: None,
      price: Decimal::ZERO,
      available: true,
      category: DEFAULT_CATEGORY.to_string(),
    }
  }
}

impl Product {
  /// A transient product; call `create` to persist it.
  pub fn new(
    name: impl Into<String>,
    description: Option<String>,
    price: Decimal,
    available: bool,
    category: impl Into<String>,
  ) -> Self {
    Self {
      id: None,
      name: name.into(),
      description,
      price,
      available,
      category: category.into(),
    }
  }

  /// Field checks applied before anything reaches the store.
  pub fn validate(&self) -> AppResult<()> {
    if self.name.trim().is_empty() {
      return Err(AppError::Validation("Invalid product: name must not be empty".to_string()));
    }
    if self.name.chars().count() > NAME_MAX_LEN {
      return Err(AppError::Validation(format!(
        "Invalid product: name exceeds {} characters",
        NAME_MAX_LEN
      )));
    }
    if let Some(description) = &self.description {
      if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(AppError::Validation(format!(
          "Invalid product: description exceeds {} characters",
          DESCRIPTION_MAX_LEN
        )));
      }
    }
    validate_price(self.price)?;
    if self.category.trim().is_empty() {
      return Err(AppError::Validation("Invalid product: category must not be empty".to_string()));
    }
    if self.category.chars().count() > CATEGORY_MAX_LEN {
      return Err(AppError::Validation(format!(
        "Invalid product: category exceeds {} characters",
        CATEGORY_MAX_LEN
      )));
    }
    Ok(())
  }

  #[instrument(name = "product::create", skip(self, store), fields(name = %self.name))]
  pub async fn create(&mut self, store: &dyn ProductStore) -> AppResult<()> {
    if let Some(id) = self.id {
      return Err(AppError::Validation(format!(
        "Product {} is already persisted; use update instead",
        id
      )));
    }
    self.validate()?;
    let id = store.insert(self).await?;
    self.id = Some(id);
    info!(product_id = id, "Product created.");
    Ok(())
  }

  #[instrument(name = "product::update", skip(self, store), fields(product_id = ?self.id))]
  pub async fn update(&self, store: &dyn ProductStore) -> AppResult<()> {
    let id = self
      .id
      .ok_or_else(|| AppError::Validation("Update called with empty ID field".to_string()))?;
    self.validate()?;
    if !store.update(id, self).await? {
      warn!(product_id = id, "Update target no longer exists.");
      return Err(AppError::NotFound(format!("Product with id '{}' was not found.", id)));
    }
    info!(product_id = id, "Product updated.");
    Ok(())
  }

  /// Returns whether a row was actually removed.
  #[instrument(name = "product::delete", skip(self, store), fields(product_id = ?self.id))]
  pub async fn delete(&self, store: &dyn ProductStore) -> AppResult<bool> {
    let id = self
      .id
      .ok_or_else(|| AppError::Validation("Delete called with empty ID field".to_string()))?;
    let removed = store.delete(id).await?;
    info!(product_id = id, removed, "Product delete complete.");
    Ok(removed)
  }

  pub async fn find(store: &dyn ProductStore, id: i64) -> AppResult<Option<Product>> {
    store.find(id).await
  }

  pub async fn all(store: &dyn ProductStore) -> AppResult<Vec<Product>> {
    store.list(&ProductFilter::All).await
  }

  pub async fn find_by_name(store: &dyn ProductStore, name: &str) -> AppResult<Vec<Product>> {
    store.list(&ProductFilter::Name(name.to_string())).await
  }

  pub async fn find_by_category(store: &dyn ProductStore, category: &str) -> AppResult<Vec<Product>> {
    store.list(&ProductFilter::Category(category.to_string())).await
  }

  pub async fn find_by_availability(store: &dyn ProductStore, available: bool) -> AppResult<Vec<Product>> {
    store.list(&ProductFilter::Availability(available)).await
  }

  pub async fn find_by_price(store: &dyn ProductStore, price: Decimal) -> AppResult<Vec<Product>> {
    store.list(&ProductFilter::Price(price)).await
  }
}

/// Brings a price to what a `NUMERIC(14, 2)` column stores: half away from
/// zero at two places, always carrying exactly two places (`20` -> `20.00`).
pub fn normalize_price(price: Decimal) -> Decimal {
  let mut price = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
  price.rescale(PRICE_SCALE);
  price
}

/// Largest value a `NUMERIC(14, 2)` column holds.
fn max_price() -> Decimal {
  Decimal::new(99_999_999_999_999, 2)
}

pub(crate) fn validate_price(price: Decimal) -> AppResult<()> {
  if price.is_sign_negative() && !price.is_zero() {
    return Err(AppError::Validation(format!(
      "Invalid product: price must not be negative (got {})",
      price
    )));
  }
  if price > max_price() {
    return Err(AppError::Validation(format!(
      "Invalid product: price {} is out of range",
      price
    )));
  }
  Ok(())
}
