use async_trait::async_trait;

use crate::search::SupplierQuery;
use crate::supplier::Supplier;

pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for supplier data access
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// Stores a new supplier under a freshly assigned id and returns it.
    async fn create(&self, supplier: &Supplier) -> Result<Supplier, RepositoryError>;

    async fn find(&self, id: i64) -> Result<Option<Supplier>, RepositoryError>;

    /// Suppliers matching every filter in `query`, ordered by id.
    async fn search(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, RepositoryError>;

    async fn all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        self.search(&SupplierQuery::default()).await
    }

    /// Saves an existing supplier. Returns `None` when no row carries its id.
    async fn update(&self, supplier: &Supplier) -> Result<Option<Supplier>, RepositoryError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, RepositoryError>;
}

/// Shared precondition for `update` implementations.
pub fn require_id(supplier: &Supplier) -> Result<i64, RepositoryError> {
    supplier.id.ok_or_else(|| {
        tracing::warn!("Update called for {} without an id", supplier);
        Box::new(crate::CoreError::Validation(
            "Update called with empty ID field".to_string(),
        )) as RepositoryError
    })
}
