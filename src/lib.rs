use std::path::PathBuf;
use std::sync::Arc;

pub mod brewing;
pub mod config;
pub mod error;
pub mod model;
pub mod persistence;
pub mod schema;
pub mod seed;
pub mod views;
pub mod web;

use error::ApiError;
use persistence::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub media_root: Arc<PathBuf>,
}

impl From<(Arc<dyn Catalog>, PathBuf)> for AppState {
    fn from(value: (Arc<dyn Catalog>, PathBuf)) -> Self {
        AppState {
            catalog: value.0,
            media_root: Arc::new(value.1),
        }
    }
}

impl AppState {
    /// Runs blocking store work off the async executor.
    pub async fn with_catalog<T, F>(&self, work: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn Catalog) -> Result<T, ApiError> + Send + 'static,
        T: Send + 'static,
    {
        let catalog = Arc::clone(&self.catalog);
        tokio::task::spawn_blocking(move || work(catalog.as_ref())).await?
    }
}
