use std::sync::Arc;

use bookshelf_infra::{BookStore, InMemoryBookStore, MongoBookStore, StoreError};

use crate::config::AppConfig;

/// The process-wide store handle shared by every handler.
pub type SharedStore = Arc<dyn BookStore>;

/// Create the store once at startup.
///
/// With `DATABASE_URL` set this connects to MongoDB (and fails fast if the
/// deployment does not answer); otherwise an in-memory store is used.
pub async fn build_store(config: &AppConfig) -> Result<SharedStore, StoreError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = MongoBookStore::connect(url, &config.database_name, &config.collection).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, falling back to in-memory store");
            Ok(Arc::new(InMemoryBookStore::new()))
        }
    }
}
