use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for a search request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    SearchStarted {
        query: Option<String>,
        store: PathBuf,
    },
    SearchCompleted {
        query: Option<String>,
        results: usize,
        duration_ms: f64,
    },
    StoreUnavailable {
        store: PathBuf,
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }

    fn query_label(query: &Option<String>) -> String {
        match query {
            Some(q) => format!("'{}'", q),
            None => "(all)".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for search events.
///
/// Every event is forwarded to `tracing`; console output on stderr is
/// optional so the interactive screen can stay clean. A log file, when
/// attached, always receives JSON lines.
pub struct Logger {
    format: LogFormat,
    console: bool,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            console: true,
            file_writer: None,
        }
    }

    /// A logger without console output.
    pub fn silent() -> Self {
        Self {
            format: LogFormat::default(),
            console: false,
            file_writer: None,
        }
    }

    /// Also append every event to `log_path` as a JSON line
    pub fn with_file(mut self, log_path: &Path) -> std::io::Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        self.file_writer = Some(Mutex::new(file));
        Ok(self)
    }

    pub fn log(&self, event: &LogEvent) {
        self.trace(event);

        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let _ = writeln!(file, "{}", event.with_timestamp());
            }
        }

        if !self.console {
            return;
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn trace(&self, event: &LogEvent) {
        match event {
            LogEvent::SearchStarted { query, store } => {
                tracing::info!(query = ?query, store = %store.display(), "search started");
            }
            LogEvent::SearchCompleted {
                query,
                results,
                duration_ms,
            } => {
                tracing::info!(query = ?query, results, duration_ms, "search completed");
            }
            LogEvent::StoreUnavailable { store, error } => {
                tracing::error!(store = %store.display(), error = %error, "store unavailable");
            }
        }
    }

    fn log_json(&self, event: &LogEvent) {
        let _ = writeln!(std::io::stderr(), "{}", event.with_timestamp());
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::SearchStarted { query, store } => {
                let _ = writeln!(
                    stderr,
                    "{} {} {}",
                    "▶".bright_cyan(),
                    "SEARCH".bright_cyan().bold(),
                    LogEvent::query_label(query)
                );
                let _ = writeln!(
                    stderr,
                    "    {} {}",
                    "Store:".dimmed(),
                    store.display().to_string().dimmed()
                );
            }
            LogEvent::SearchCompleted {
                results,
                duration_ms,
                ..
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} {} ({:.1}ms)",
                    "✓".bright_green(),
                    results,
                    if *results == 1 { "result" } else { "results" },
                    duration_ms
                );
            }
            LogEvent::StoreUnavailable { error, .. } => {
                let _ = writeln!(
                    stderr,
                    "    {} {}",
                    "✗".bright_red(),
                    error.bright_red()
                );
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::SearchStarted { query, .. } => {
                format!("[{}] search:start {}", timestamp, LogEvent::query_label(query))
            }
            LogEvent::SearchCompleted {
                results,
                duration_ms,
                ..
            } => format!(
                "[{}] search:done results={} {:.1}ms",
                timestamp, results, duration_ms
            ),
            LogEvent::StoreUnavailable { error, .. } => {
                format!("[{}] store:unavailable {}", timestamp, error)
            }
        };
        let _ = writeln!(std::io::stderr(), "{}", msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>(), Ok(LogFormat::Pretty));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("compact".parse::<LogFormat>(), Ok(LogFormat::Compact));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_event_json_shape() {
        let event = LogEvent::SearchCompleted {
            query: Some("오사카".to_string()),
            results: 3,
            duration_ms: 1.5,
        };
        let value = event.with_timestamp();
        assert_eq!(value["event"], "search_completed");
        assert_eq!(value["query"], "오사카");
        assert_eq!(value["results"], 3);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_file_output_is_json_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("events.jsonl");
        let logger = Logger::silent().with_file(&path).unwrap();

        logger.log(&LogEvent::SearchStarted {
            query: Some("오사카".to_string()),
            store: PathBuf::from("osaka_pass.db"),
        });
        logger.log(&LogEvent::StoreUnavailable {
            store: PathBuf::from("osaka_pass.db"),
            error: "no such table: facilities".to_string(),
        });
        drop(logger);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "search_started");
        assert_eq!(lines[0]["query"], "오사카");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["event"], "store_unavailable");
        assert_eq!(lines[1]["error"], "no such table: facilities");
    }

    #[test]
    fn test_file_output_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        let event = LogEvent::SearchCompleted {
            query: None,
            results: 0,
            duration_ms: 0.2,
        };

        Logger::silent().with_file(&path).unwrap().log(&event);
        Logger::silent().with_file(&path).unwrap().log(&event);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_query_label() {
        assert_eq!(LogEvent::query_label(&None), "(all)");
        assert_eq!(LogEvent::query_label(&Some("박물관".to_string())), "'박물관'");
    }
}
