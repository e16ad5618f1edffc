// service/src/models/serialization.rs

//! JSON wire form of a `Product`.
//!
//! Outbound goes through `Product::serialize`. Inbound payloads are first
//! checked into a typed `ProductFields` and only then copied onto the entity,
//! so a rejected payload never leaves a half-updated product behind.

use rust_decimal::Decimal;
use serde_json::{json, Map, Value};
use std::str::FromStr;

use super::product::{normalize_price, validate_price, Product, DEFAULT_CATEGORY};
use crate::errors::{AppError, Result as AppResult};

/// A validated inbound payload. `id` is never taken from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
  pub name: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub available: bool,
  pub category: String,
}

impl ProductFields {
  pub fn from_json(payload: &Value) -> AppResult<Self> {
    let object = payload.as_object().ok_or_else(|| {
      AppError::Validation("Invalid product: body of request contained bad or no data".to_string())
    })?;

    let name = match required(object, "name")? {
      Value::String(s) => s.clone(),
      other => return Err(type_error("string", "name", other)),
    };
    let description = match required(object, "description")? {
      Value::String(s) => Some(s.clone()),
      Value::Null => None,
      other => return Err(type_error("string", "description", other)),
    };
    let price = parse_price(required(object, "price")?)?;
    let available = match required(object, "available")? {
      Value::Bool(flag) => *flag,
      other => return Err(type_error("boolean", "available", other)),
    };
    let category = match object.get("category") {
      None | Some(Value::Null) => DEFAULT_CATEGORY.to_string(),
      Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
      Some(other) => return Err(type_error("non-empty string", "category", other)),
    };

    Ok(Self {
      name,
      description,
      price,
      available,
      category,
    })
  }
}

impl Product {
  /// `{id, name, description, price, available, category}` with `price` as a
  /// decimal string.
  pub fn serialize(&self) -> Value {
    json!({
        "id": self.id,
        "name": self.name,
        "description": self.description,
        "price": self.price,
        "available": self.available,
        "category": self.category,
    })
  }

  /// Overwrites every non-id field from `payload`, or leaves `self` untouched
  /// and returns a validation error.
  pub fn deserialize(&mut self, payload: &Value) -> AppResult<()> {
    let fields = ProductFields::from_json(payload)?;
    self.name = fields.name;
    self.description = fields.description;
    self.price = fields.price;
    self.available = fields.available;
    self.category = fields.category;
    Ok(())
  }
}

fn required<'a>(object: &'a Map<String, Value>, key: &str) -> AppResult<&'a Value> {
  object
    .get(key)
    .ok_or_else(|| AppError::Validation(format!("Invalid product: missing {}", key)))
}

fn type_error(expected: &str, key: &str, got: &Value) -> AppError {
  AppError::Validation(format!(
    "Invalid type for {} [{}]: {}",
    expected,
    key,
    json_type_name(got)
  ))
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// Accepts a JSON number or a numeric string, normalized to the column scale.
pub fn parse_price(value: &Value) -> AppResult<Decimal> {
  let raw = match value {
    Value::Number(n) => n.to_string(),
    Value::String(s) => s.trim().to_string(),
    other => return Err(type_error("decimal", "price", other)),
  };
  let price = parse_decimal(&raw)
    .ok_or_else(|| AppError::Validation(format!("Invalid product: price '{}' is not a decimal number", raw)))?;
  let price = normalize_price(price);
  validate_price(price)?;
  Ok(price)
}

pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
  Decimal::from_str(raw)
    .or_else(|_| Decimal::from_scientific(raw))
    .ok()
}
