// src/logging.rs
use std::path::{Path, PathBuf};

use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info,passage_typist=debug";
const LOG_FILE: &str = "passage-typist.log";

/// $XDG_DATA_HOME/passage-typist, falling back to the working directory.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("passage-typist")
}

/// Daily rolling log file under `logs_dir`.
pub fn file_writer(logs_dir: &Path) -> Result<(NonBlocking, WorkerGuard), InitError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE)
        .build(logs_dir)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize file logging; stdout belongs to the terminal UI. The returned
/// guard must be held for the app lifetime or buffered lines are lost. When
/// the log directory is unusable the app runs without a log file.
pub fn init_logging(filter: Option<&str>) -> Option<WorkerGuard> {
    let logs_dir = data_dir().join("logs");
    let (writer, guard) = match file_writer(&logs_dir) {
        Ok((writer, guard)) => (Some(writer), Some(guard)),
        Err(err) => {
            eprintln!("passage-typist: logging disabled, {}: {err}", logs_dir.display());
            (None, None)
        }
    };

    let env_filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(writer.map(|writer| {
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        }))
        .init();

    guard
}
