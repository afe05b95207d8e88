pub mod repository;
pub mod search;
pub mod supplier;

pub use repository::{RepositoryError, SupplierRepository};
pub use search::SupplierQuery;
pub use supplier::{Supplier, SupplierPayload, STATUS_ACTIVE, STATUS_DISABLED};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
