// service/src/web/mod.rs

// Declare child modules
pub mod handlers;
pub mod routes;

// Re-exported so main.rs and the integration tests build the same app.
pub use routes::configure_app_routes;
