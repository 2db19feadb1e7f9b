use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use passfinder_db::FacilityStore;
use passfinder_logging::{init_tracing, LogFormat, Logger, TracingOutput};

mod config;
mod search;
mod tui;

use config::{resolve_store_config, ProjectConfig, StoreOverrides};
use search::{handle_search_command, OutputFormat};

#[derive(Parser, Debug)]
#[command(
    name = "passfinder",
    about = "Search facilities covered by the Osaka Amazing Pass",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the facilities database (default: osaka_pass.db next to the binary)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Facilities table name (default: facilities)
    #[arg(long, global = true)]
    table: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty", global = true)]
    log_format: LogFormatChoice,

    /// Write diagnostic logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Diagnostic log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Print search events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive search screen (default)
    Tui,

    /// Render results once to stdout
    Search {
        /// Search term (omit to list every facility)
        query: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    let interactive = matches!(command, Commands::Tui);
    let log_format: LogFormat = cli.log_format.into();

    // Console output would corrupt the interactive screen
    let tracing_output = match (&cli.log_file, interactive) {
        (Some(path), _) => TracingOutput::File(path),
        (None, true) => TracingOutput::Disabled,
        (None, false) => TracingOutput::Stderr,
    };
    let _log_guard = init_tracing(&cli.log_level, log_format, tracing_output)
        .context("Failed to initialize logging")?;

    let logger = if cli.verbose && !interactive {
        Logger::new(log_format)
    } else {
        Logger::silent()
    };
    let logger = match &cli.log_file {
        Some(path) => logger
            .with_file(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?,
        None => logger,
    };

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));

    let project_config = ProjectConfig::load(&working_dir)?;
    let store_config = resolve_store_config(
        StoreOverrides {
            db_path: cli.db,
            table: cli.table,
        },
        project_config.as_ref(),
        &working_dir,
        exe_dir.as_deref(),
    );
    tracing::debug!(path = %store_config.path.display(), table = %store_config.table, "store resolved");

    let store = FacilityStore::new(store_config).context("Invalid store configuration")?;

    match command {
        Commands::Tui => {
            tui::run_tui(store, logger).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Search { query, format } => {
            handle_search_command(&store, &logger, query.as_deref(), format)
        }
    }
}
