// service/src/state.rs
use crate::db::ProductStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
}

impl AppState {
  pub fn new(store: Arc<dyn ProductStore>) -> Self {
    Self { store }
  }

  /// Borrow the persistence handle the way the entity model expects it.
  pub fn store(&self) -> &dyn ProductStore {
    self.store.as_ref()
  }
}
