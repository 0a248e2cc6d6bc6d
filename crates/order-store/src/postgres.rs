use application::{OrderRepository, RepositoryError};
use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use sqlx::{PgPool, Row};

/// PostgreSQL-backed order repository.
///
/// Each order is one row in `orders`, holding the serialized aggregate as a
/// JSONB document next to its id and status.
#[derive(Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository on an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to the given database URL.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPool::connect(database_url).await.map_err(storage_error)?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let document = serde_json::to_value(order)?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, status, document, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE
            SET status = EXCLUDED.status, document = EXCLUDED.document, updated_at = NOW()
            "#,
        )
        .bind(order.id().as_str())
        .bind(order.status().as_str())
        .bind(document)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }

    async fn get_by_id(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query("SELECT document FROM orders WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let document: serde_json::Value = row.try_get("document").map_err(storage_error)?;
        Ok(Some(serde_json::from_value(document)?))
    }

    async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}

fn storage_error(err: sqlx::Error) -> RepositoryError {
    tracing::error!(error = %err, "postgres order repository failure");
    RepositoryError::Storage(err.to_string())
}
