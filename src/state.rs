//! Shared application state for all routes.

use crate::store::RowStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RowStore>,
    pub asset_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: Arc<dyn RowStore>, asset_path: impl Into<PathBuf>) -> Self {
        AppState { store, asset_path: Arc::new(asset_path.into()) }
    }
}
