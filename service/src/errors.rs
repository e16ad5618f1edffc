// service/src/errors.rs

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Method Not Allowed: {0}")]
  MethodNotAllowed(String),

  #[error("Unsupported Media Type: {0}")]
  UnsupportedMediaType(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Internal Server Error: {0}")]
  Internal(String), // For miscellaneous errors
}

impl AppError {
  /// Used as the `JsonConfig` error handler so body extraction failures come
  /// back in the same JSON shape as every other error.
  pub fn from_json_payload(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let app_err = match err {
      JsonPayloadError::ContentType => {
        AppError::UnsupportedMediaType("Content-Type must be application/json".to_string())
      }
      other => AppError::Validation(format!(
        "Invalid product: body of request contained bad or no data ({})",
        other
      )),
    };
    app_err.into()
  }

  /// Path extraction only fails on a non-integer product id, which is a miss.
  pub fn from_path(err: PathError, req: &HttpRequest) -> actix_web::Error {
    AppError::NotFound(format!("{} was not found ({})", req.path(), err)).into()
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
      AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      AppError::Config(_) | AppError::Sqlx(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    // Log the full error when it's turned into a response
    if status.is_server_error() {
      tracing::error!(application_error = %self, status = status.as_u16(), "Responding with error");
    } else {
      tracing::warn!(application_error = %self, status = status.as_u16(), "Responding with error");
    }

    let message = match self {
      AppError::Validation(m)
      | AppError::NotFound(m)
      | AppError::MethodNotAllowed(m)
      | AppError::UnsupportedMediaType(m)
      | AppError::Config(m)
      | AppError::Internal(m) => m.clone(),
      // Never leak SQL details to clients.
      AppError::Sqlx(_) => "Database operation failed".to_string(),
    };

    HttpResponse::build(status).json(json!({
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": message,
    }))
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
