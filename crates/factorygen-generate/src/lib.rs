//! Factory generation for factorygen.
//!
//! Maps column types to fake-value expressions, renders the factory stub and
//! drives the per-table generation loop over a [`SchemaIntrospector`].
//!
//! [`SchemaIntrospector`]: factorygen_introspect::SchemaIntrospector

pub mod errors;
pub mod expressions;
pub mod orchestrator;
pub mod output;
pub mod render;
pub mod template;

pub use errors::GenerationError;
pub use expressions::{ExpressionMapper, ValueExpression, family_token, map_type_to_expression};
pub use orchestrator::{
    FactoryGenerator, GenerationRequest, GeneratorOptions, TableOutcome, TableSelection,
    generate_factories,
};
pub use render::{FactoryRenderer, RenderedArtifact, UnmappedTypePolicy};
pub use template::{FactoryContext, FactoryTemplate, TemplateSource};
