use std::fmt;

use crate::error::{Error, Result};

/// Database engines with a schema introspector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    MySql,
    Sqlite,
}

impl EngineKind {
    /// Resolve the engine from a connection URL scheme.
    ///
    /// Anything other than `mysql`, `mariadb` or `sqlite` is rejected with
    /// [`Error::UnknownConnection`].
    pub fn from_url(url: &str) -> Result<Self> {
        let scheme = url
            .split_once(':')
            .map(|(scheme, _)| scheme)
            .filter(|scheme| !scheme.is_empty())
            .ok_or_else(|| Error::UnknownConnection("connection url has no scheme".to_string()))?;

        match scheme.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Ok(EngineKind::MySql),
            "sqlite" => Ok(EngineKind::Sqlite),
            other => Err(Error::UnknownConnection(format!(
                "unsupported engine `{other}`"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            EngineKind::MySql => "mysql",
            EngineKind::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
