//! Error types shared by the engine, configuration, and sinks.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EdenError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Genome length mismatch: expected {expected} characters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Engine has already evolved; create a new engine for another run")]
    AlreadyEvolved,

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EdenError>;
