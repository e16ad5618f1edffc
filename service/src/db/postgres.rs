// service/src/db/postgres.rs

//! PostgreSQL backend for `ProductStore`, using runtime-checked `sqlx` queries.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::{error, info, instrument};

use super::{ProductFilter, ProductStore};
use crate::errors::{AppError, Result as AppResult};
use crate::models::Product;

const SELECT_PRODUCTS: &str = "SELECT id, name, description, price, available, category FROM products";

#[derive(Debug, FromRow)]
struct ProductRow {
  id: i64,
  name: String,
  description: Option<String>,
  price: Decimal,
  available: bool,
  category: String,
}

impl From<ProductRow> for Product {
  fn from(row: ProductRow) -> Self {
    Product {
      id: Some(row.id),
      name: row.name,
      description: row.description,
      price: row.price,
      available: row.available,
      category: row.category,
    }
  }
}

#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
    let pool = PgPoolOptions::new()
      .max_connections(max_connections)
      .connect(database_url)
      .await
      .map_err(|e| {
        error!("Failed to connect to the database: {}", e);
        AppError::Sqlx(e)
      })?;
    info!("Successfully connected to the database.");
    Ok(Self { pool })
  }

  /// Creates the products table when it is missing. Idempotent; there is no
  /// migration history behind it.
  pub async fn ensure_schema(&self) -> AppResult<()> {
    sqlx::query(
      r#"
      CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(100) NOT NULL,
        description VARCHAR(250),
        price       NUMERIC(14, 2) NOT NULL CHECK (price >= 0),
        available   BOOLEAN NOT NULL DEFAULT TRUE,
        category    VARCHAR(50) NOT NULL DEFAULT 'UNKNOWN'
      )
      "#,
    )
    .execute(&self.pool)
    .await?;
    info!("Products table is in place.");
    Ok(())
  }

  /// Get the underlying connection pool.
  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "pg::insert_product", skip(self, product), fields(name = %product.name), err(Display))]
  async fn insert(&self, product: &Product) -> AppResult<i64> {
    let id: i64 = sqlx::query_scalar(
      "INSERT INTO products (name, description, price, available, category) VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.available)
    .bind(&product.category)
    .fetch_one(&self.pool)
    .await?;
    Ok(id)
  }

  #[instrument(name = "pg::update_product", skip(self, product), err(Display))]
  async fn update(&self, id: i64, product: &Product) -> AppResult<bool> {
    let result = sqlx::query(
      "UPDATE products SET name = $1, description = $2, price = $3, available = $4, category = $5 WHERE id = $6",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.available)
    .bind(&product.category)
    .bind(id)
    .execute(&self.pool)
    .await?;
    Ok(result.rows_affected() == 1)
  }

  #[instrument(name = "pg::delete_product", skip(self), err(Display))]
  async fn delete(&self, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected() == 1)
  }

  #[instrument(name = "pg::find_product", skip(self), err(Display))]
  async fn find(&self, id: i64) -> AppResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PRODUCTS))
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row.map(Product::from))
  }

  #[instrument(name = "pg::list_products", skip(self), err(Display))]
  async fn list(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
    let rows: Vec<ProductRow> = match filter {
      ProductFilter::All => {
        sqlx::query_as(&format!("{} ORDER BY id", SELECT_PRODUCTS))
          .fetch_all(&self.pool)
          .await?
      }
      ProductFilter::Name(name) => {
        sqlx::query_as(&format!("{} WHERE name = $1 ORDER BY id", SELECT_PRODUCTS))
          .bind(name)
          .fetch_all(&self.pool)
          .await?
      }
      ProductFilter::Category(category) => {
        sqlx::query_as(&format!("{} WHERE category = $1 ORDER BY id", SELECT_PRODUCTS))
          .bind(category)
          .fetch_all(&self.pool)
          .await?
      }
      ProductFilter::Availability(flag) => {
        sqlx::query_as(&format!("{} WHERE available = $1 ORDER BY id", SELECT_PRODUCTS))
          .bind(*flag)
          .fetch_all(&self.pool)
          .await?
      }
      ProductFilter::Price(price) => {
        sqlx::query_as(&format!("{} WHERE price = $1 ORDER BY id", SELECT_PRODUCTS))
          .bind(*price)
          .fetch_all(&self.pool)
          .await?
      }
    };
    Ok(rows.into_iter().map(Product::from).collect())
  }
}
