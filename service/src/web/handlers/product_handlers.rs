// service/src/web/handlers/product_handlers.rs

use actix_web::{http::header, web, HttpRequest, HttpResponse};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::db::ProductFilter;
use crate::errors::AppError;
use crate::models::serialization::parse_decimal;
use crate::models::Product;
use crate::state::AppState;

#[derive(Debug, Default)]
pub struct ListProductsQuery {
  pub name: Option<String>,
  pub category: Option<String>,
  pub available: Option<String>,
  pub price: Option<String>,
}

impl ListProductsQuery {
  /// Collects the known keys from raw query pairs. A repeated key keeps its
  /// first value; unknown keys are ignored.
  pub fn from_pairs(pairs: &[(String, String)]) -> Self {
    let mut query = Self::default();
    for (key, value) in pairs {
      let slot = match key.as_str() {
        "name" => &mut query.name,
        "category" => &mut query.category,
        "available" => &mut query.available,
        "price" => &mut query.price,
        _ => continue,
      };
      if slot.is_none() {
        *slot = Some(value.clone());
      }
    }
    query
  }

  /// Picks the single filter to apply. Precedence is name, category,
  /// available, price; empty values count as absent.
  pub fn to_filter(&self) -> Result<ProductFilter, AppError> {
    fn present(value: &Option<String>) -> Option<&str> {
      value.as_deref().filter(|v| !v.is_empty())
    }

    if let Some(name) = present(&self.name) {
      return Ok(ProductFilter::Name(name.to_string()));
    }
    if let Some(category) = present(&self.category) {
      return Ok(ProductFilter::Category(category.to_string()));
    }
    if let Some(available) = present(&self.available) {
      return Ok(ProductFilter::Availability(is_truthy(available)));
    }
    if let Some(price) = present(&self.price) {
      let price = parse_decimal(price.trim())
        .ok_or_else(|| AppError::Validation(format!("Invalid price query parameter '{}'", price)))?;
      return Ok(ProductFilter::Price(price));
    }
    Ok(ProductFilter::All)
  }
}

/// `true`, `yes` and `1` (any case) are truthy; everything else is false.
pub fn is_truthy(value: &str) -> bool {
  matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

#[instrument(name = "handler::list_products", skip(app_state, query_params))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
  let filter = ListProductsQuery::from_pairs(&query_params).to_filter()?;
  info!(?filter, "Request for product list");

  let store = app_state.store();
  let products = match &filter {
    ProductFilter::All => Product::all(store).await?,
    ProductFilter::Name(name) => Product::find_by_name(store, name).await?,
    ProductFilter::Category(category) => Product::find_by_category(store, category).await?,
    ProductFilter::Availability(flag) => Product::find_by_availability(store, *flag).await?,
    ProductFilter::Price(price) => Product::find_by_price(store, *price).await?,
  };

  let results: Vec<Value> = products.iter().map(Product::serialize).collect();
  info!("Returning {} products", results.len());
  Ok(HttpResponse::Ok().json(results))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request for product with id: {}", product_id);

  match Product::find(app_state.store(), product_id).await? {
    Some(product) => {
      info!("Returning product: {}", product.name);
      Ok(HttpResponse::Ok().json(product.serialize()))
    }
    None => {
      warn!("Product with ID {} not found.", product_id);
      Err(not_found(product_id))
    }
  }
}

#[instrument(name = "handler::create_product", skip(req, app_state, body))]
pub async fn create_product_handler(
  req: HttpRequest,
  app_state: web::Data<AppState>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  info!("Request to create a product");

  let mut product = Product::default();
  product.deserialize(&body)?;
  product.create(app_state.store()).await?;

  let product_id = product
    .id
    .ok_or_else(|| AppError::Internal("Product was created without an id.".to_string()))?;
  let location = req
    .url_for("product", [product_id.to_string()])
    .map_err(|e| AppError::Internal(format!("Failed to build Location URL: {}", e)))?;

  info!("Product with ID [{}] created.", product_id);
  Ok(
    HttpResponse::Created()
      .insert_header((header::LOCATION, location.as_str()))
      .json(product.serialize()),
  )
}

#[instrument(name = "handler::update_product", skip(app_state, path, body), fields(product_id = %path))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request to update product with id: {}", product_id);

  let mut product = Product::find(app_state.store(), product_id)
    .await?
    .ok_or_else(|| not_found(product_id))?;

  product.deserialize(&body)?;
  product.id = Some(product_id);
  product.update(app_state.store()).await?;

  info!("Product with ID [{}] updated.", product_id);
  Ok(HttpResponse::Ok().json(product.serialize()))
}

/// Always 204: deleting a product that is already gone is not an error.
#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  info!("Request to delete product with id: {}", product_id);

  if let Some(product) = Product::find(app_state.store(), product_id).await? {
    product.delete(app_state.store()).await?;
    info!("Product with ID [{}] delete complete.", product_id);
  }

  Ok(HttpResponse::NoContent().finish())
}

fn not_found(product_id: i64) -> AppError {
  AppError::NotFound(format!("Product with id '{}' was not found.", product_id))
}
