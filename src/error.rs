// src/error.rs
use std::io;
use std::path::PathBuf;

/// Errors surfaced by the library. Most of them are recovered from close to
/// where they happen (missing paragraphs, broken config) and only terminal
/// setup failures make it all the way back to `main`.
#[derive(thiserror::Error, Debug)]
pub enum TypistError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid paragraph json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed paragraph data: {0}")]
    Malformed(String),
    #[error("could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("could not serialize config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    #[error("config directory not found")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, TypistError>;
