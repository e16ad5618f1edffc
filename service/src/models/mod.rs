// service/src/models/mod.rs

//! The Product entity, its persistence lifecycle and its JSON wire form.

pub mod product;
pub mod serialization;

// Re-export the model structs for convenient access
pub use product::{Product, DEFAULT_CATEGORY};
