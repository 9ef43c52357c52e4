use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::{Path, PathBuf};

use factorygen_core::{factory_name, model_name};
use factorygen_introspect::{ConnectionRegistry, SchemaIntrospector};

use crate::errors::GenerationError;
use crate::expressions::ExpressionMapper;
use crate::output::{factory_path, write_bytes_atomic};
use crate::render::{FactoryRenderer, RenderedArtifact, UnmappedTypePolicy};
use crate::template::TemplateSource;

/// Directory, relative to the project root, that receives factories.
pub const DEFAULT_FACTORY_DIR: &str = "database/factories";

/// What the caller asked to generate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Named connection; the registry default when `None`.
    pub connection: Option<String>,
    pub table: Option<String>,
    /// Generate every table. Wins over `table`.
    pub all: bool,
}

/// Tables a request resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    All,
    One(String),
}

impl GenerationRequest {
    pub fn selection(&self) -> Result<TableSelection, GenerationError> {
        if self.all {
            return Ok(TableSelection::All);
        }
        match self.table.as_deref().map(str::trim) {
            Some(table) if !table.is_empty() => Ok(TableSelection::One(table.to_string())),
            _ => Err(GenerationError::MissingTable),
        }
    }
}

/// Settings shared by every table of a run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub namespace: String,
    pub ignored_columns: BTreeSet<String>,
    pub output_dir: PathBuf,
    pub extension: String,
    pub template: TemplateSource,
    pub unmapped: UnmappedTypePolicy,
    pub expressions: BTreeMap<String, String>,
}

impl GeneratorOptions {
    /// Defaults writing into `<root>/database/factories`.
    pub fn for_project(root: &Path) -> Self {
        Self {
            output_dir: root.join(DEFAULT_FACTORY_DIR),
            ..Self::default()
        }
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: "App".to_string(),
            ignored_columns: BTreeSet::new(),
            output_dir: PathBuf::from(DEFAULT_FACTORY_DIR),
            extension: "php".to_string(),
            template: TemplateSource::Embedded,
            unmapped: UnmappedTypePolicy::default(),
            expressions: BTreeMap::new(),
        }
    }
}

/// Result of processing one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    Created {
        table: String,
        factory: String,
        path: PathBuf,
    },
    AlreadyExists {
        table: String,
        factory: String,
        path: PathBuf,
    },
}

impl TableOutcome {
    pub fn table(&self) -> &str {
        match self {
            TableOutcome::Created { table, .. } | TableOutcome::AlreadyExists { table, .. } => table,
        }
    }

    pub fn factory(&self) -> &str {
        match self {
            TableOutcome::Created { factory, .. }
            | TableOutcome::AlreadyExists { factory, .. } => factory,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            TableOutcome::Created { path, .. } | TableOutcome::AlreadyExists { path, .. } => path,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, TableOutcome::Created { .. })
    }

    /// Console line reported for the table.
    pub fn message(&self) -> String {
        match self {
            TableOutcome::Created { factory, .. } => format!("{factory} created successfully."),
            TableOutcome::AlreadyExists { factory, .. } => format!("{factory} already exists!"),
        }
    }
}

/// Generates factories for the tables behind one introspector.
pub struct FactoryGenerator {
    introspector: Box<dyn SchemaIntrospector>,
    renderer: FactoryRenderer,
    options: GeneratorOptions,
}

impl FactoryGenerator {
    pub fn new(introspector: Box<dyn SchemaIntrospector>, options: GeneratorOptions) -> Self {
        let renderer = FactoryRenderer::new(
            ExpressionMapper::new(options.expressions.clone()),
            options.ignored_columns.clone(),
            options.unmapped,
        );
        Self {
            introspector,
            renderer,
            options,
        }
    }

    /// Process the requested tables in catalog order, echoing one line per
    /// table to `out`.
    ///
    /// Existing factories are reported and skipped. Any other error stops
    /// the run; factories written before it stay on disk.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        out: &mut dyn Write,
    ) -> Result<Vec<TableOutcome>, GenerationError> {
        let tables = match request.selection()? {
            TableSelection::All => self.introspector.fetch_tables().await?,
            TableSelection::One(table) => vec![table],
        };
        tracing::info!(
            event = "generation_started",
            engine = %self.introspector.engine(),
            tables = tables.len()
        );

        let mut outcomes = Vec::with_capacity(tables.len());
        for table in tables {
            let outcome = self.generate_table(&table).await?;
            writeln!(out, "{}", outcome.message())?;
            outcomes.push(outcome);
        }

        tracing::info!(
            event = "generation_finished",
            created = outcomes.iter().filter(|outcome| outcome.is_created()).count(),
            skipped = outcomes.iter().filter(|outcome| !outcome.is_created()).count()
        );
        Ok(outcomes)
    }

    async fn generate_table(&self, table: &str) -> Result<TableOutcome, GenerationError> {
        let model = model_name(table);
        let factory = factory_name(table);
        let path = factory_path(&self.options.output_dir, &factory, &self.options.extension);

        if path.try_exists()? {
            tracing::warn!(event = "factory_exists", table = %table, path = %path.display());
            return Ok(TableOutcome::AlreadyExists {
                table: table.to_string(),
                factory,
                path,
            });
        }

        let columns = self.introspector.fetch_columns(table).await?;
        let template = self.options.template.load()?;
        let artifact = RenderedArtifact {
            contents: self
                .renderer
                .render(&template, &self.options.namespace, &model, &columns)?,
            factory_name: factory,
            path,
        };

        write_bytes_atomic(&artifact.path, artifact.contents.as_bytes())?;
        tracing::info!(
            event = "table_generated",
            table = %table,
            factory = %artifact.factory_name,
            columns = columns.len(),
            path = %artifact.path.display()
        );

        Ok(TableOutcome::Created {
            table: table.to_string(),
            factory: artifact.factory_name,
            path: artifact.path,
        })
    }
}

/// Open the requested connection and generate its factories.
///
/// The request and the connection's engine are validated before any
/// database or file I/O.
pub async fn generate_factories(
    registry: &ConnectionRegistry,
    request: &GenerationRequest,
    options: GeneratorOptions,
    out: &mut dyn Write,
) -> Result<Vec<TableOutcome>, GenerationError> {
    request.selection()?;
    let introspector = registry.open(request.connection.as_deref()).await?;
    FactoryGenerator::new(introspector, options)
        .generate(request, out)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_wins_over_table_name() {
        let request = GenerationRequest {
            table: Some("users".to_string()),
            all: true,
            ..GenerationRequest::default()
        };
        assert_eq!(request.selection().unwrap(), TableSelection::All);
    }

    #[test]
    fn single_table_requires_a_name() {
        let request = GenerationRequest {
            table: Some("users".to_string()),
            ..GenerationRequest::default()
        };
        assert_eq!(
            request.selection().unwrap(),
            TableSelection::One("users".to_string())
        );

        for table in [None, Some("  ".to_string())] {
            let request = GenerationRequest {
                table,
                ..GenerationRequest::default()
            };
            assert!(matches!(
                request.selection().unwrap_err(),
                GenerationError::MissingTable
            ));
        }
    }

    #[test]
    fn outcome_messages() {
        let created = TableOutcome::Created {
            table: "users".to_string(),
            factory: "UserFactory".to_string(),
            path: PathBuf::from("UserFactory.php"),
        };
        let exists = TableOutcome::AlreadyExists {
            table: "users".to_string(),
            factory: "UserFactory".to_string(),
            path: PathBuf::from("UserFactory.php"),
        };
        assert_eq!(created.message(), "UserFactory created successfully.");
        assert_eq!(exists.message(), "UserFactory already exists!");
    }
}
