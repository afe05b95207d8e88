pub mod api;
pub mod form;
pub mod shell;
pub mod table;

pub use api::{ApiError, HttpSupplierApi, SupplierApi};
pub use form::{FormField, SupplierForm};
