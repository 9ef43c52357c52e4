use thiserror::Error;

/// Core error type shared across factorygen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Database error or adapter failure.
    #[error("database error: {0}")]
    Db(String),
    /// The connection points at an engine no introspector supports.
    #[error("unknown connection: {0}")]
    UnknownConnection(String),
    /// The requested connection name is not configured.
    #[error("connection `{0}` is not configured")]
    UnknownConnectionName(String),
}

/// Convenience alias for results returned by factorygen crates.
pub type Result<T> = std::result::Result<T, Error>;
