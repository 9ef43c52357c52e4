use async_trait::async_trait;
use sqlx::MySqlPool;

use factorygen_core::{ColumnDescriptor, EngineKind, Result};

use crate::adapter::SchemaIntrospector;

mod queries;

/// Adapter for MySQL and MariaDB databases.
#[derive(Debug, Clone)]
pub struct MySqlIntrospector {
    pool: MySqlPool,
}

impl MySqlIntrospector {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaIntrospector for MySqlIntrospector {
    fn engine(&self) -> EngineKind {
        EngineKind::MySql
    }

    async fn fetch_tables(&self) -> Result<Vec<String>> {
        queries::list_tables(&self.pool).await
    }

    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>> {
        let rows = queries::list_columns(&self.pool, table).await?;
        Ok(rows
            .into_iter()
            .map(|row| ColumnDescriptor::new(row.name, row.column_type))
            .collect())
    }
}
