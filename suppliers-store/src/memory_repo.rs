use async_trait::async_trait;
use std::collections::BTreeMap;
use suppliers_core::repository::{require_id, RepositoryError, SupplierRepository};
use suppliers_core::{Supplier, SupplierQuery};
use tokio::sync::RwLock;
use tracing::info;

#[derive(Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Supplier>,
}

/// Process-local supplier store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemorySupplierRepository {
    table: RwLock<Table>,
}

impl MemorySupplierRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SupplierRepository for MemorySupplierRepository {
    async fn create(&self, supplier: &Supplier) -> Result<Supplier, RepositoryError> {
        info!("Creating {}", supplier.name);

        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        let stored = supplier.clone().with_id(id);
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find(&self, id: i64) -> Result<Option<Supplier>, RepositoryError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn search(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|s| query.matches(s))
            .cloned()
            .collect())
    }

    async fn update(&self, supplier: &Supplier) -> Result<Option<Supplier>, RepositoryError> {
        let id = require_id(supplier)?;
        info!("Saving {}", supplier.name);

        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = supplier.clone();
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        info!("Deleting supplier {}", id);
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suppliers_core::CoreError;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = MemorySupplierRepository::new();
        let first = repo.create(&Supplier::new("Acme", "tools", true)).await.unwrap();
        let second = repo.create(&Supplier::new("Globex", "food", false)).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = MemorySupplierRepository::new();
        let first = repo.create(&Supplier::new("Acme", "tools", true)).await.unwrap();
        assert!(repo.delete(first.id.unwrap()).await.unwrap());
        assert!(!repo.delete(first.id.unwrap()).await.unwrap());

        let second = repo.create(&Supplier::new("Globex", "food", false)).await.unwrap();
        assert_eq!(second.id, Some(2));
        assert!(repo.find(1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_filters_and_orders() {
        let repo = MemorySupplierRepository::new();
        repo.create(&Supplier::new("Acme", "tools", true)).await.unwrap();
        repo.create(&Supplier::new("Globex", "food", false)).await.unwrap();
        repo.create(&Supplier::new("Initech", "tools", false)).await.unwrap();

        let query = SupplierQuery {
            category: Some("tools".to_string()),
            ..Default::default()
        };
        let found = repo.search(&query).await.unwrap();
        let names: Vec<&str> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Initech"]);

        let query = SupplierQuery {
            category: Some("tools".to_string()),
            available: Some(false),
            ..Default::default()
        };
        let found = repo.search(&query).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Initech");
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let repo = MemorySupplierRepository::new();
        let mut supplier = repo.create(&Supplier::new("Acme", "tools", true)).await.unwrap();
        supplier.category = "hardware".to_string();

        let updated = repo.update(&supplier).await.unwrap().unwrap();
        assert_eq!(updated.category, "hardware");
        assert_eq!(repo.find(1).await.unwrap().unwrap().category, "hardware");
    }

    #[tokio::test]
    async fn test_update_unknown_id_returns_none() {
        let repo = MemorySupplierRepository::new();
        let ghost = Supplier::new("Ghost", "none", false).with_id(42);
        assert!(repo.update(&ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let repo = MemorySupplierRepository::new();
        let err = repo
            .update(&Supplier::new("Acme", "tools", true))
            .await
            .unwrap_err();

        let core = err.downcast::<CoreError>().unwrap();
        assert!(matches!(*core, CoreError::Validation(ref m) if m == "Update called with empty ID field"));
    }
}
