//! Database introspection adapters.

pub mod adapter;
pub mod connection;
pub mod mysql;
pub mod sqlite;

pub use adapter::SchemaIntrospector;
pub use connection::{ConnectionRegistry, connect};
pub use mysql::MySqlIntrospector;
pub use sqlite::SqliteIntrospector;

pub use factorygen_core::{ColumnDescriptor, EngineKind};
