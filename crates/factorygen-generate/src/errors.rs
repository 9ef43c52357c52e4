use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while generating factories.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] factorygen_core::Error),
    #[error("a table name is required unless --all is given")]
    MissingTable,
    #[error("factory template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),
    #[error("invalid factory template: {0}")]
    InvalidTemplate(String),
    #[error("column `{column}` of `{model}` has unmapped type `{column_type}`")]
    UnmappedType {
        model: String,
        column: String,
        column_type: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
