// Error handling for the air-quality dataset core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AqError>;

#[derive(Error, Debug)]
pub enum AqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Invalid timestamp {value:?} at row {row}")]
    InvalidTimestamp { row: usize, value: String },

    #[error("Unknown wind direction code: {0}")]
    UnknownWindCode(String),

    #[error("Unsupported input compression: {0}")]
    UnsupportedCompression(String),

    #[error("Decompression failed: {0}")]
    DecompressionFailed(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
