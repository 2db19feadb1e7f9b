//! # passfinder-logging
//!
//! Logging for passfinder.
//!
//! ## Key Types
//!
//! - [`Logger`] - Search event logging (console, JSON-lines file, `tracing`)
//! - [`LogEvent`] - Log event types
//! - [`LogFormat`] - Output formats (Pretty, JSON, Compact)
//! - [`TracingOutput`] - Where diagnostic `tracing` output goes

mod events;

pub use events::{LogEvent, LogFormat, Logger};

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Destination for diagnostic tracing output
#[derive(Debug, Clone, Copy)]
pub enum TracingOutput<'a> {
    Stderr,
    /// Append to a file; the returned guard must be held until exit
    File(&'a Path),
    Disabled,
}

/// Initialize tracing for the application.
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_tracing(
    level: &str,
    format: LogFormat,
    output: TracingOutput<'_>,
) -> io::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match output {
        TracingOutput::Disabled => Ok(None),
        TracingOutput::Stderr => {
            install(filter, format, io::stderr, true);
            Ok(None)
        }
        TracingOutput::File(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| io::Error::other(format!("Not a file path: {}", path.display())))?;
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name.to_string_lossy())
                .build(dir)
                .map_err(io::Error::other)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);

            install(filter, format, writer, false);
            Ok(Some(guard))
        }
    }
}

fn install<W>(filter: EnvFilter, format: LogFormat, writer: W, ansi: bool)
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_target(false).with_writer(writer))
                .init();
        }
        LogFormat::Pretty | LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(ansi)
                        .with_writer(writer),
                )
                .init();
        }
    }
}
