use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{Atm, BoundingBox};

/// Errors that can occur when interacting with the ATM store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

/// Write half of the ATM store
///
/// The insert returns a typed result per record, so the ingestion
/// pipeline is a plain fold over outcomes and can run against an
/// in-memory double in tests.
pub trait AtmStore {
    fn insert_atm(
        &self,
        atm: &Atm,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}

/// PostgreSQL-backed ATM store
///
/// Holds the connection pool for both the proximity range query and the
/// single-row inserts issued by the ingestion job.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Bootstrap the atms table on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch candidate rows whose coordinates fall inside the box
    ///
    /// This is the coarse pre-filter with inclusive bounds and a
    /// store-side cap; the caller refines the candidates with the exact
    /// great-circle distance.
    pub async fn query_within(
        &self,
        bbox: &BoundingBox,
        limit: usize,
    ) -> Result<Vec<Atm>, StoreError> {
        let query = r#"
            SELECT id, lat, lng, name, address
            FROM atms
            WHERE lat BETWEEN $1 AND $2
              AND lng BETWEEN $3 AND $4
            LIMIT $5
        "#;

        let rows = sqlx::query(query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lng)
            .bind(bbox.max_lng)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let atms: Vec<Atm> = rows
            .iter()
            .map(|row| Atm {
                id: row.get("id"),
                name: row.get("name"),
                latitude: row.get("lat"),
                longitude: row.get("lng"),
                address: row.get("address"),
            })
            .collect();

        tracing::debug!("Bounding box query returned {} candidates", atms.len());

        Ok(atms)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

impl AtmStore for PostgresClient {
    /// Insert a single ATM row
    ///
    /// A unique violation on the id surfaces as `StoreError::Duplicate`
    /// rather than an upsert, so re-ingesting an existing record is
    /// observable in the report and never duplicates the row.
    async fn insert_atm(&self, atm: &Atm) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO atms (id, lat, lng, name, address)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(&atm.id)
            .bind(atm.latitude)
            .bind(atm.longitude)
            .bind(&atm.name)
            .bind(&atm.address)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    StoreError::Duplicate(atm.id.clone())
                }
                other => StoreError::SqlxError(other),
            })?;

        tracing::debug!("Inserted ATM {}", atm.id);

        Ok(())
    }
}
