use std::sync::Arc;

use crate::store::MemStore;

/// Shared application state handed to every route handler. The store is
/// constructed once in `main` and owned here for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemStore>,
}

impl AppState {
    pub fn new(store: Arc<MemStore>) -> Self {
        Self { store }
    }
}
