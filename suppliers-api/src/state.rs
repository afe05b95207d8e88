use std::sync::Arc;
use suppliers_core::SupplierRepository;
use suppliers_store::MemorySupplierRepository;

#[derive(Clone)]
pub struct AppState {
    pub supplier_repo: Arc<dyn SupplierRepository>,
}

impl AppState {
    pub fn new(supplier_repo: Arc<dyn SupplierRepository>) -> Self {
        Self { supplier_repo }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySupplierRepository::new()))
    }
}
