// service/src/lib.rs

//! Product catalog REST service.
//!
//! CRUD and filtered listing over a single `Product` entity. The binary in
//! `main.rs` wires configuration, logging and the Postgres pool; everything
//! else lives here so the integration tests can build the same app.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod state;
pub mod web;

pub use crate::config::AppConfig;
pub use crate::db::{MemoryProductStore, PgProductStore, ProductFilter, ProductStore};
pub use crate::errors::{AppError, Result};
pub use crate::models::Product;
pub use crate::state::AppState;
