pub mod app_config;
pub mod database;
pub mod memory_repo;
pub mod supplier_repo;

use std::sync::Arc;

use suppliers_core::SupplierRepository;

pub use app_config::{Config, StorageBackend};
pub use database::DbClient;
pub use memory_repo::MemorySupplierRepository;
pub use supplier_repo::StoreSupplierRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database.url must be set for the postgres backend")]
    MissingDatabaseUrl,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Opens the repository selected by `storage.backend`.
pub async fn connect(config: &Config) -> Result<Arc<dyn SupplierRepository>, StoreError> {
    match config.storage.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory supplier store");
            Ok(Arc::new(MemorySupplierRepository::new()))
        }
        StorageBackend::Postgres => {
            let url = config
                .database
                .url
                .as_deref()
                .ok_or(StoreError::MissingDatabaseUrl)?;
            let db = DbClient::new(url, &config.database).await?;
            db.migrate().await?;
            tracing::info!("Using Postgres supplier store");
            Ok(Arc::new(StoreSupplierRepository::new(db.pool)))
        }
    }
}
