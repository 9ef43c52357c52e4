use async_trait::async_trait;

use factorygen_core::{ColumnDescriptor, EngineKind, Result};

/// Trait implemented by database adapters that can list tables and columns.
#[async_trait]
pub trait SchemaIntrospector: Send + Sync {
    /// Returns the engine this adapter reads from.
    fn engine(&self) -> EngineKind;

    /// All user tables of the active database, in catalog order.
    async fn fetch_tables(&self) -> Result<Vec<String>>;

    /// Every column of `table` in ordinal order, with its raw declared type.
    async fn fetch_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>>;
}
