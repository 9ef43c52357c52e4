use std::collections::BTreeMap;
use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::sqlite::SqlitePoolOptions;

use factorygen_core::{EngineKind, Error, Result};

use crate::adapter::SchemaIntrospector;
use crate::mysql::MySqlIntrospector;
use crate::sqlite::SqliteIntrospector;

/// Named connection URLs with an optional default.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: BTreeMap<String, String>,
    default: Option<String>,
}

impl ConnectionRegistry {
    pub fn new(connections: BTreeMap<String, String>, default: Option<String>) -> Self {
        Self {
            connections,
            default,
        }
    }

    /// Registry holding a single connection that is also the default.
    pub fn single(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let mut connections = BTreeMap::new();
        connections.insert(name.clone(), url.into());
        Self::new(connections, Some(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }

    /// Resolve `name`, or the default connection when `name` is `None`.
    ///
    /// Returns the resolved name together with its URL.
    pub fn resolve<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a str)> {
        let name = name
            .or(self.default.as_deref())
            .ok_or_else(|| Error::UnknownConnectionName("default".to_string()))?;
        let url = self
            .connections
            .get(name)
            .ok_or_else(|| Error::UnknownConnectionName(name.to_string()))?;
        Ok((name, url.as_str()))
    }

    /// Resolve a connection, pick its introspector and connect.
    pub async fn open(&self, name: Option<&str>) -> Result<Box<dyn SchemaIntrospector>> {
        let (name, url) = self.resolve(name)?;
        tracing::info!(event = "connection_resolved", connection = %name);
        connect(url).await
    }
}

/// Detect the engine behind `url` and open the matching introspector.
///
/// Engine detection happens before any pool is created, so an unsupported
/// URL fails with [`Error::UnknownConnection`] without touching the network.
pub async fn connect(url: &str) -> Result<Box<dyn SchemaIntrospector>> {
    let engine = EngineKind::from_url(url)?;
    tracing::info!(event = "engine_detected", engine = %engine);

    match engine {
        EngineKind::MySql => {
            let pool = MySqlPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(10))
                .connect(url)
                .await
                .map_err(|err| Error::Db(err.to_string()))?;
            Ok(Box::new(MySqlIntrospector::new(pool)))
        }
        EngineKind::Sqlite => {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(10))
                .connect(url)
                .await
                .map_err(|err| Error::Db(err.to_string()))?;
            Ok(Box::new(SqliteIntrospector::new(pool)))
        }
    }
}
