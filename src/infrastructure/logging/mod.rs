// Logging module - Logging infrastructure
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::domain::error::{RowdeskError, RowdeskResult};

pub const LOG_FILE_PREFIX: &str = "rowdesk.log";

/// Where log lines go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// For one-shot commands
    Stderr,
    /// Daily rolling file; the interactive screen owns the terminal
    File { dir: PathBuf, max_files: usize },
}

/// Filter directive for a configured level. `RUST_LOG` takes precedence.
pub fn filter_directive(level: &str, verbose: bool) -> String {
    let level = if verbose {
        "debug"
    } else {
        match level {
            "error" | "warn" | "info" | "debug" | "trace" => level,
            _ => "info",
        }
    };
    format!("rowdesk={},warn", level)
}

/// Daily appender under `dir` keeping at most `max_files` files
pub fn file_appender(dir: &Path, max_files: usize) -> RowdeskResult<RollingFileAppender> {
    std::fs::create_dir_all(dir).map_err(|e| RowdeskError::Config {
        message: format!("Failed to create log directory {}: {}", dir.display(), e),
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .max_log_files(max_files)
        .build(dir)
        .map_err(|e| RowdeskError::Config {
            message: format!("Failed to open log file in {}: {}", dir.display(), e),
        })
}

/// Initialize logging system
pub fn init_logging(target: LogTarget, level: &str, verbose: bool) -> RowdeskResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level, verbose)));

    let result = match &target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .with_level(true),
            )
            .try_init(),
        LogTarget::File { dir, max_files } => {
            let appender = file_appender(dir, *max_files)?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(appender)
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true),
                )
                .try_init()
        }
    };

    result.map_err(|e| RowdeskError::Config {
        message: format!("Failed to initialize logging: {}", e),
    })?;

    tracing::info!(?target, "Rowdesk logging system initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("warn", false), "rowdesk=warn,warn");
        assert_eq!(filter_directive("loud", false), "rowdesk=info,warn");
        assert_eq!(filter_directive("error", true), "rowdesk=debug,warn");
    }

    #[test]
    fn test_file_logging_creates_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        // Another test may already own the global subscriber; only the
        // directory side effect is guaranteed.
        let target = LogTarget::File { dir: log_dir.clone(), max_files: 3 };
        let _ = init_logging(target, "info", false);
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_file_appender_writes_prefixed_file() {
        use std::io::Write;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut appender = file_appender(temp_dir.path(), 2).unwrap();
        appender.write_all(b"editor closed\n").unwrap();
        appender.flush().unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with(LOG_FILE_PREFIX));
    }
}
