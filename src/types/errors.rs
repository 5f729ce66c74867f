//! Error types used across linkstate.
use thiserror::Error;

/// High-level error categories for probes, primitives and adapters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("invalid input")]
    InvalidInput,
    #[error("policy violation")]
    Policy,
    /// The filesystem is not in the shape the operation requires
    /// (e.g. a real file where a symlink was expected).
    #[error("conflict")]
    Conflict,
    #[error("io error")]
    Io,
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind:?}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, msg)
    }

    /// Wrap an I/O error, keeping the system error text after `context`.
    pub fn io(context: impl std::fmt::Display, e: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io, format!("{context}: {e}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;
