use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to whatever hosts the application.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    Config(String),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("terminal: {0}")]
    Terminal(#[source] io::Error),
    #[error("logging: {0}")]
    Logging(String),
}

/// Errors returned by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid session configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised while persisting a finished attempt.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },
    #[error("push rejected: {0}")]
    PushRejected(String),
    #[error("cannot encode answers: {0}")]
    Encode(#[from] serde_yaml::Error),
}
