mod config;
mod logging;

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use factorygen_generate::{GenerationError, GenerationRequest, generate_factories};
use thiserror::Error;

use config::{CONFIG_FILE_NAME, ConfigError, load_config};
use logging::{LogFormat, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "factorygen",
    version,
    about = "Generate model factories from database tables"
)]
struct Cli {
    /// Project root; factories land in <root>/database/factories.
    #[arg(long, global = true, default_value = ".")]
    project_root: PathBuf,
    /// Configuration file (defaults to <root>/factory-generator.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log output format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
    /// Log progress events.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a factory for one table, or for every table with --all.
    #[command(name = "generate:factory")]
    GenerateFactory(GenerateFactoryArgs),
}

#[derive(Args, Debug)]
struct GenerateFactoryArgs {
    /// Table to generate a factory for.
    name: Option<String>,
    /// Named connection (positional form).
    #[arg(value_name = "CONNECTION")]
    connection_pos: Option<String>,
    /// Named connection (flag form).
    #[arg(long, value_name = "CONNECTION", conflicts_with = "connection_pos")]
    connection: Option<String>,
    /// Generate factories for every table; the table name is ignored.
    #[arg(long, default_value_t = false)]
    all: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose).map_err(CliError::Logging)?;

    match cli.command {
        Command::GenerateFactory(ref args) => run_generate_factory(&cli, args).await,
    }
}

async fn run_generate_factory(cli: &Cli, args: &GenerateFactoryArgs) -> Result<(), CliError> {
    let request = GenerationRequest {
        connection: args.connection.clone().or_else(|| args.connection_pos.clone()),
        table: args.name.clone(),
        all: args.all,
    };
    if request.selection().is_err() {
        return Err(CliError::InvalidArgs(
            "provide a table name or pass --all".to_string(),
        ));
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.project_root.join(CONFIG_FILE_NAME));
    let config = load_config(&config_path)?;
    let registry = config.connection_registry(std::env::var("DATABASE_URL").ok());
    let options = config.generator_options(&cli.project_root);

    tracing::info!(
        event = "run_started",
        connections = registry.names().count(),
        all = request.all,
        output_dir = %options.output_dir.display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcomes = generate_factories(&registry, &request, options, &mut out).await?;
    out.flush().map_err(GenerationError::from)?;

    for outcome in &outcomes {
        tracing::debug!(
            event = "table_outcome",
            table = %outcome.table(),
            factory = %outcome.factory(),
            created = outcome.is_created(),
            path = %outcome.path().display()
        );
    }
    tracing::info!(event = "run_finished", status = "success", tables = outcomes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_factory_command() {
        let cli = Cli::try_parse_from(["factorygen", "generate:factory", "users", "sqlite"]).unwrap();
        let Command::GenerateFactory(args) = cli.command;
        assert_eq!(args.name.as_deref(), Some("users"));
        assert_eq!(args.connection_pos.as_deref(), Some("sqlite"));
        assert!(!args.all);
    }

    #[test]
    fn parses_all_with_connection_flag() {
        let cli = Cli::try_parse_from([
            "factorygen",
            "--project-root",
            "/srv/app",
            "generate:factory",
            "--all",
            "--connection",
            "mysql",
        ])
        .unwrap();
        assert_eq!(cli.project_root, PathBuf::from("/srv/app"));
        let Command::GenerateFactory(args) = cli.command;
        assert!(args.all);
        assert_eq!(args.connection.as_deref(), Some("mysql"));
        assert!(args.name.is_none());
    }

    #[test]
    fn rejects_both_connection_forms() {
        let result = Cli::try_parse_from([
            "factorygen",
            "generate:factory",
            "users",
            "sqlite",
            "--connection",
            "mysql",
        ]);
        assert!(result.is_err());
    }
}
