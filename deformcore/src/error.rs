//! Error types for deformcore

use thiserror::Error;

/// Rejected note-count input. The previous sequence stays active.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("no note counts given")]
    Empty,
    #[error("entry {position} is not a note count: {text:?}")]
    InvalidNumber { position: usize, text: String },
    #[error("entry {position} is zero, every band needs at least one note")]
    ZeroCount { position: usize },
    #[error("entry {position} asks for {count} notes, at most {max} are drawn")]
    TooManyNotes { position: usize, count: u32, max: u32 },
}

/// Malformed color literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid hex color: {0:?}")]
    InvalidHex(String),
}

/// Problems reading configuration overrides from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("default notes: {0}")]
    Notes(#[from] EncodingError),
    #[error("window size must be positive, got {width}x{height}")]
    InvalidWindow { width: f32, height: f32 },
}

pub type Result<T, E = EncodingError> = std::result::Result<T, E>;
