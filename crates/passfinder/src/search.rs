use std::process::ExitCode;

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use passfinder_core::{render_markdown, render_terminal, run_search, ResultsView};
use passfinder_db::FacilityStore;
use passfinder_logging::Logger;

/// Output format for one-shot search
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored cards
    Pretty,
    /// Markdown page
    Markdown,
    /// JSON view model
    Json,
}

/// Render results for `query` once to stdout.
///
/// A storage failure is printed verbatim to stderr and yields exit code 1.
/// `main` must return the code so the log guards drop before exit.
pub fn handle_search_command(
    store: &FacilityStore,
    logger: &Logger,
    query: Option<&str>,
    format: OutputFormat,
) -> Result<ExitCode> {
    let view = match run_search(store, query, logger) {
        Ok(view) => view,
        Err(e) => {
            eprintln!("{} {}", "Error:".bright_red().bold(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("{}", render(&view, format)?);
    Ok(ExitCode::SUCCESS)
}

fn render(view: &ResultsView, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty => render_terminal(view),
        OutputFormat::Markdown => render_markdown(view),
        OutputFormat::Json => serde_json::to_string_pretty(view)?,
    })
}
