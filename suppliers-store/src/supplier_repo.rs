use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use suppliers_core::repository::{require_id, RepositoryError, SupplierRepository};
use suppliers_core::{Supplier, SupplierQuery};
use tracing::info;

const COLUMNS: &str = "id, name, category, available, status";

pub struct StoreSupplierRepository {
    pool: PgPool,
}

impl StoreSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: i64,
    name: String,
    category: String,
    available: bool,
    status: String,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: Some(row.id),
            name: row.name,
            category: row.category,
            available: row.available,
            status: row.status,
        }
    }
}

#[async_trait]
impl SupplierRepository for StoreSupplierRepository {
    async fn create(&self, supplier: &Supplier) -> Result<Supplier, RepositoryError> {
        info!("Creating {}", supplier.name);

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            "INSERT INTO suppliers (name, category, available, status) VALUES ($1, $2, $3, $4) RETURNING {}",
            COLUMNS
        ))
        .bind(&supplier.name)
        .bind(&supplier.category)
        .bind(supplier.available)
        .bind(&supplier.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Supplier>, RepositoryError> {
        info!("Processing lookup for id {} ...", id);

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Supplier::from))
    }

    async fn search(&self, query: &SupplierQuery) -> Result<Vec<Supplier>, RepositoryError> {
        let query = query.clone().normalized();
        info!("Processing supplier query {:?}", query);

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM suppliers WHERE TRUE", COLUMNS));
        if let Some(name) = query.name {
            builder.push(" AND name = ").push_bind(name);
        }
        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(available) = query.available {
            builder.push(" AND available = ").push_bind(available);
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        builder.push(" ORDER BY id");

        let rows: Vec<SupplierRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    async fn update(&self, supplier: &Supplier) -> Result<Option<Supplier>, RepositoryError> {
        let id = require_id(supplier)?;
        info!("Saving {}", supplier.name);

        let row = sqlx::query_as::<_, SupplierRow>(&format!(
            r#"
            UPDATE suppliers
            SET name = $1, category = $2, available = $3, status = $4
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&supplier.name)
        .bind(&supplier.category)
        .bind(supplier.available)
        .bind(&supplier.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Supplier::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        info!("Deleting supplier {}", id);

        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
