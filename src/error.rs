//! Error handling for acordos
//!
//! The parser itself never fails on dirty input; these errors cover the
//! surrounding application: configuration, command input and I/O.

use thiserror::Error;

/// Core error types for the application layer
#[derive(Error, Debug)]
pub enum AcordosError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("json error")]
    Json(#[from] serde_json::Error),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;
