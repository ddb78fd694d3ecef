use std::sync::Arc;

use crate::services::providers::GenerativeProvider;
use crate::store::Store;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub ai: Arc<dyn GenerativeProvider>,
}

impl AppState {
    pub fn new(store: Store, ai: Arc<dyn GenerativeProvider>) -> Self {
        Self { store, ai }
    }
}
