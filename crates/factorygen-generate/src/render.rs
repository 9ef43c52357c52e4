use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Deserialize;

use factorygen_core::{ColumnDescriptor, singular};

use crate::errors::GenerationError;
use crate::expressions::{ExpressionMapper, ValueExpression, family_token};
use crate::template::{ColumnLine, FactoryContext, FactoryTemplate};

/// What to do with a column whose type has no expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedTypePolicy {
    /// Emit `null` for the column and log a warning.
    #[default]
    Placeholder,
    /// Leave the column out and log a warning.
    Skip,
    /// Abort the table with [`GenerationError::UnmappedType`].
    Fail,
}

/// Generated factory text and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub factory_name: String,
    pub path: PathBuf,
    pub contents: String,
}

/// Turns column lists into factory source.
#[derive(Debug, Clone, Default)]
pub struct FactoryRenderer {
    mapper: ExpressionMapper,
    ignored: BTreeSet<String>,
    unmapped: UnmappedTypePolicy,
}

impl FactoryRenderer {
    pub fn new(
        mapper: ExpressionMapper,
        ignored: BTreeSet<String>,
        unmapped: UnmappedTypePolicy,
    ) -> Self {
        Self {
            mapper,
            ignored,
            unmapped,
        }
    }

    /// Render `template` for a model.
    ///
    /// The class name is the singular of `model_name`. Ignored fields are
    /// matched exactly against the column name.
    pub fn render(
        &self,
        template: &FactoryTemplate,
        namespace: &str,
        model_name: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<String, GenerationError> {
        let mut lines = Vec::with_capacity(columns.len());
        for column in columns {
            if self.ignored.contains(&column.field) {
                continue;
            }
            if let Some(expression) = self.expression_for(model_name, column)? {
                lines.push(ColumnLine {
                    field: column.field.clone(),
                    expression,
                });
            }
        }

        let context = FactoryContext {
            namespace: namespace.to_string(),
            class_name: singular(model_name),
            columns: lines,
        };
        Ok(template.render(&context))
    }

    fn expression_for(
        &self,
        model_name: &str,
        column: &ColumnDescriptor,
    ) -> Result<Option<ValueExpression>, GenerationError> {
        if let Some(expression) = self.mapper.map(&column.column_type) {
            return Ok(Some(expression));
        }

        match self.unmapped {
            UnmappedTypePolicy::Fail => Err(GenerationError::UnmappedType {
                model: model_name.to_string(),
                column: column.field.clone(),
                column_type: column.column_type.clone(),
            }),
            UnmappedTypePolicy::Placeholder => {
                tracing::warn!(
                    event = "unmapped_column_type",
                    model = %model_name,
                    column = %column.field,
                    family = %family_token(&column.column_type),
                    action = "placeholder"
                );
                Ok(Some(ValueExpression::Custom("null".to_string())))
            }
            UnmappedTypePolicy::Skip => {
                tracing::warn!(
                    event = "unmapped_column_type",
                    model = %model_name,
                    column = %column.field,
                    family = %family_token(&column.column_type),
                    action = "skip"
                );
                Ok(None)
            }
        }
    }
}
