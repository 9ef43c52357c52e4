use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use factorygen_generate::{GeneratorOptions, TemplateSource, UnmappedTypePolicy};
use factorygen_introspect::ConnectionRegistry;

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "factory-generator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub default_connection: Option<String>,
    pub ignored_columns: Vec<String>,
    pub unmapped_types: UnmappedTypePolicy,
    pub namespace: NamespaceConfig,
    pub connections: BTreeMap<String, String>,
    pub output: OutputConfig,
    /// Family token → literal expression.
    pub expressions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub model: String,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            model: "App".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub extension: String,
    pub template: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(factorygen_generate::orchestrator::DEFAULT_FACTORY_DIR),
            extension: "php".to_string(),
            template: None,
        }
    }
}

/// Load `path`, falling back to defaults when it does not exist.
pub fn load_config(path: &Path) -> ConfigResult<GeneratorConfig> {
    if !path.exists() {
        tracing::debug!(event = "config_defaults", path = %path.display());
        return Ok(GeneratorConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: GeneratorConfig = toml::from_str(&content)?;
    tracing::debug!(event = "config_loaded", path = %path.display());
    Ok(config)
}

impl GeneratorConfig {
    /// Build the connection registry.
    ///
    /// With no configured connections, `database_url` (usually
    /// `DATABASE_URL`) becomes the `default` connection. A single configured
    /// connection is the default when none is named.
    pub fn connection_registry(&self, database_url: Option<String>) -> ConnectionRegistry {
        if self.connections.is_empty() {
            return match database_url {
                Some(url) => ConnectionRegistry::single("default", url),
                None => ConnectionRegistry::default(),
            };
        }

        let default = self.default_connection.clone().or_else(|| {
            if self.connections.len() == 1 {
                self.connections.keys().next().cloned()
            } else {
                None
            }
        });
        ConnectionRegistry::new(self.connections.clone(), default)
    }

    /// Generator options with paths resolved against `root`.
    pub fn generator_options(&self, root: &Path) -> GeneratorOptions {
        GeneratorOptions {
            namespace: self.namespace.model.clone(),
            ignored_columns: self.ignored_columns.iter().cloned().collect::<BTreeSet<_>>(),
            output_dir: root.join(&self.output.directory),
            extension: self.output.extension.clone(),
            template: match &self.output.template {
                Some(path) => TemplateSource::File(root.join(path)),
                None => TemplateSource::Embedded,
            },
            unmapped: self.unmapped_types,
            expressions: self.expressions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
default_connection = "mysql"
ignored_columns = ["id", "created_at", "updated_at"]
unmapped_types = "skip"

[namespace]
model = "App\\Models"

[connections]
mysql = "mysql://root@127.0.0.1/app"
sqlite = "sqlite://database/database.sqlite"

[output]
extension = "php"
template = "stubs/factory.stub"

[expressions]
json = "[]"
"#;

    #[test]
    fn parses_full_config() {
        let config: GeneratorConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.namespace.model, "App\\Models");
        assert_eq!(config.ignored_columns.len(), 3);
        assert_eq!(config.unmapped_types, UnmappedTypePolicy::Skip);
        assert_eq!(config.expressions.get("json").map(String::as_str), Some("[]"));

        let registry = config.connection_registry(None);
        assert_eq!(
            registry.resolve(None).unwrap(),
            ("mysql", "mysql://root@127.0.0.1/app")
        );

        let options = config.generator_options(Path::new("/srv/app"));
        assert_eq!(options.output_dir, PathBuf::from("/srv/app/database/factories"));
        assert_eq!(
            options.template,
            TemplateSource::File(PathBuf::from("/srv/app/stubs/factory.stub"))
        );
        assert!(options.ignored_columns.contains("updated_at"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config.namespace.model, "App");
        assert_eq!(config.output.extension, "php");
        assert_eq!(config.unmapped_types, UnmappedTypePolicy::Placeholder);
        assert!(config.ignored_columns.is_empty());
    }

    #[test]
    fn database_url_is_the_fallback_connection() {
        let config = GeneratorConfig::default();
        let registry = config.connection_registry(Some("sqlite::memory:".to_string()));
        assert_eq!(registry.resolve(None).unwrap(), ("default", "sqlite::memory:"));

        assert!(config.connection_registry(None).resolve(None).is_err());
    }

    #[test]
    fn single_connection_is_the_default() {
        let config: GeneratorConfig =
            toml::from_str("[connections]\nlocal = \"sqlite://app.sqlite\"\n").unwrap();
        assert_eq!(
            config.connection_registry(None).resolve(None).unwrap(),
            ("local", "sqlite://app.sqlite")
        );
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = toml::from_str::<GeneratorConfig>("unmapped_types = \"guess\"").unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }
}
