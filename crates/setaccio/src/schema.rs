//! Schema catalog collaborator.
//!
//! The filtering core validates request keys and sort columns against the
//! target table's column set. That column set comes from a `SchemaCatalog`
//! implementation: an in-memory catalog for tests and fixed schemas, or a
//! PostgreSQL-backed catalog that introspects `information_schema`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

/// Supplies table column listings and existence checks.
#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// List the columns of `table` in schema order.
    ///
    /// Returns [`Error::UnknownTable`] when the table does not exist.
    async fn list_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Whether `column` exists on `table`.
    async fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        Ok(self
            .list_columns(table)
            .await?
            .iter()
            .any(|c| c == column))
    }
}

/// In-memory catalog with a fixed set of tables.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    tables: HashMap<String, Vec<String>>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table with its ordered column list.
    pub fn with_table<T, C, I>(mut self, table: T, columns: I) -> Self
    where
        T: Into<String>,
        C: Into<String>,
        I: IntoIterator<Item = C>,
    {
        self.tables
            .insert(table.into(), columns.into_iter().map(Into::into).collect());
        self
    }
}

#[async_trait]
impl SchemaCatalog for StaticCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<String>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| Error::UnknownTable(table.to_string()))
    }
}

/// PostgreSQL catalog backed by `information_schema.columns`.
///
/// Column lists are fetched once per table and cached for the lifetime of
/// the catalog; schema changes require a fresh instance.
pub struct PgCatalog {
    pool: PgPool,
    cache: DashMap<String, Arc<Vec<String>>>,
}

/// Restricted to the connection's current schema so a table name that
/// also exists in another schema cannot merge foreign columns into the
/// whitelist.
const LIST_COLUMNS_SQL: &str = "SELECT column_name FROM information_schema.columns \
     WHERE table_schema = current_schema() AND table_name = $1 \
     ORDER BY ordinal_position";

impl PgCatalog {
    /// Create a catalog over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            cache: DashMap::new(),
        }
    }
}

#[async_trait]
impl SchemaCatalog for PgCatalog {
    async fn list_columns(&self, table: &str) -> Result<Vec<String>> {
        if let Some(columns) = self.cache.get(table) {
            return Ok(columns.as_ref().clone());
        }

        let columns: Vec<String> = sqlx::query_scalar(LIST_COLUMNS_SQL)
            .bind(table)
            .fetch_all(&self.pool)
            .await?;

        // A table with zero columns does not exist in PostgreSQL.
        if columns.is_empty() {
            return Err(Error::UnknownTable(table.to_string()));
        }

        tracing::debug!(table = %table, columns = columns.len(), "cached table schema");
        self.cache
            .insert(table.to_string(), Arc::new(columns.clone()));
        Ok(columns)
    }
}
