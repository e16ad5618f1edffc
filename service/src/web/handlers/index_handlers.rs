// service/src/web/handlers/index_handlers.rs

use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{debug, instrument};

use crate::errors::AppError;

pub const SERVICE_NAME: &str = "Product REST API Service";
pub const SERVICE_VERSION: &str = "1.0";

/// Root URL response: service name, version and the absolute product list URL.
#[instrument(name = "handler::index", skip(req))]
pub async fn index_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  let products_url = req
    .url_for_static("products")
    .map_err(|e| AppError::Internal(format!("Failed to build products URL: {}", e)))?;

  Ok(HttpResponse::Ok().json(json!({
      "name": SERVICE_NAME,
      "version": SERVICE_VERSION,
      "paths": products_url.as_str(),
  })))
}

// Liveness only; it does not touch the store.
pub async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(json!({ "status": "OK" }))
}

pub async fn not_found_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  debug!(path = %req.path(), "No route matched.");
  Err(AppError::NotFound(format!("{} was not found on this server", req.path())))
}

pub async fn method_not_allowed_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::MethodNotAllowed(format!(
    "{} is not allowed on {}",
    req.method(),
    req.path()
  )))
}
