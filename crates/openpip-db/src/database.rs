//! Database connection and table management.
//!
//! Wraps a SQLx SQLite pool; `initialize` creates the schema on first use.

use crate::error::{DbError, Result};
use crate::schema;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Main database handle.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    url: String,
}

impl Database {
    /// Open or create a database at the specified URL,
    /// e.g. `sqlite://openpip.db?mode=rwc`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| DbError::InvalidUrl(format!("{url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        tracing::info!(url, max_connections, "Connected to database");
        Ok(Self { pool, url: url.to_string() })
    }

    /// Private in-memory database.
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::InvalidUrl(e.to_string()))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool, url: "sqlite::memory:".to_string() })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the connection URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Create all tables and indices if they don't exist.
    pub async fn initialize(&self) -> Result<()> {
        if !self.table_exists(schema::TABLE_PROTEINS).await? {
            self.create_proteins_table().await?;
            tracing::info!(table = schema::TABLE_PROTEINS, "Created table");
        }
        Ok(())
    }

    /// Check if a table exists.
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(found.is_some())
    }

    /// Create the protein table. `uniprot_id` carries the UNIQUE constraint
    /// that the repository relies on for conflict detection.
    async fn create_proteins_table(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                gene_name    VARCHAR({gene}) NOT NULL,
                protein_name VARCHAR({protein}) NOT NULL DEFAULT '',
                uniprot_id   VARCHAR({uniprot}) NOT NULL UNIQUE,
                ensembl_id   VARCHAR({ensembl}) NOT NULL DEFAULT '',
                entrez_id    VARCHAR({entrez}) NOT NULL DEFAULT '',
                description  TEXT NOT NULL DEFAULT '',
                sequence     TEXT NOT NULL DEFAULT '',
                created_at   TEXT NOT NULL,
                updated_at   TEXT NOT NULL
            )
            "#,
            table = schema::TABLE_PROTEINS,
            gene = schema::GENE_NAME_MAX_LEN,
            protein = schema::PROTEIN_NAME_MAX_LEN,
            uniprot = schema::UNIPROT_ID_MAX_LEN,
            ensembl = schema::ENSEMBL_ID_MAX_LEN,
            entrez = schema::ENTREZ_ID_MAX_LEN,
        ))
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_gene_name ON {table} (gene_name)",
            table = schema::TABLE_PROTEINS,
        ))
        .execute(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_created_at ON {table} (created_at)",
            table = schema::TABLE_PROTEINS,
        ))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Get database statistics.
    pub async fn stats(&self) -> Result<DatabaseStats> {
        let proteins = if self.table_exists(schema::TABLE_PROTEINS).await? {
            let (count,): (i64,) =
                sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", schema::TABLE_PROTEINS))
                    .fetch_one(&self.pool)
                    .await?;
            count as u64
        } else {
            0
        };

        Ok(DatabaseStats { proteins })
    }
}

/// Database statistics.
#[derive(Debug, Clone, Default)]
pub struct DatabaseStats {
    pub proteins: u64,
}
