//! Core contracts and helpers for factorygen.
//!
//! This crate defines the column and engine types shared by the introspection
//! adapters and the generator, plus the identifier naming helpers used to
//! derive model and factory names from table names.

pub mod column;
pub mod engine;
pub mod error;
pub mod naming;

pub use column::ColumnDescriptor;
pub use engine::EngineKind;
pub use error::{Error, Result};
pub use naming::{factory_name, model_name, singular, studly, ucfirst};
