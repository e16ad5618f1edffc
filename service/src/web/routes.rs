// service/src/web/routes.rs

use actix_web::web;

use crate::errors::AppError;
use crate::web::handlers::index_handlers::{
  health_check_handler, index_handler, method_not_allowed_handler, not_found_handler,
};
use crate::web::handlers::product_handlers::{
  create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
  update_product_handler,
};

// This function will be called in `main.rs` (and by the tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    // Extractor failures become AppError so every error body has the same shape
    .app_data(web::JsonConfig::default().error_handler(AppError::from_json_payload))
    .app_data(web::PathConfig::default().error_handler(AppError::from_path))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
      AppError::Validation(format!("Invalid query string: {}", err)).into()
    }))
    .service(
      web::resource("/")
        .route(web::get().to(index_handler))
        .default_service(web::to(method_not_allowed_handler)),
    )
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::resource("/products")
        .name("products")
        .route(web::get().to(list_products_handler))
        .route(web::post().to(create_product_handler))
        .default_service(web::to(method_not_allowed_handler)),
    )
    .service(
      web::resource("/products/{product_id}")
        .name("product")
        .route(web::get().to(get_product_handler))
        .route(web::put().to(update_product_handler))
        .route(web::delete().to(delete_product_handler))
        .default_service(web::to(method_not_allowed_handler)),
    );
}

/// Fallback for paths no resource claims; attach with `App::default_service`.
pub fn default_service() -> actix_web::Route {
  web::to(not_found_handler)
}
