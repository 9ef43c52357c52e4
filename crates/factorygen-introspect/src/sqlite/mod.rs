use async_trait::async_trait;
use sqlx::SqlitePool;

use factorygen_core::{ColumnDescriptor, EngineKind, Result};

use crate::adapter::SchemaIntrospector;

mod queries;

/// Adapter for SQLite databases.
#[derive(Debug, Clone)]
pub struct SqliteIntrospector {
    pool: SqlitePool,
}

impl SqliteIntrospector {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaIntrospector for SqliteIntrospector {
    fn engine(&self) -> EngineKind {
        EngineKind::Sqlite
    }

    async fn fetch_tables(&self) -> Result<Vec<String>> {
        queries::list_tables(&self.pool).await
    }

    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = queries::list_columns(&self.pool, table).await?;
        // SQLite type names are case-insensitive and the catalog reports
        // standard names upper-cased (`text` comes back as `TEXT`).
        Ok(rows
            .into_iter()
            .map(|row| ColumnDescriptor::new(row.name, row.declared_type.to_lowercase()))
            .collect())
    }
}
