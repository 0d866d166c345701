// src/utils/error.rs
use thiserror::Error;

// Errors raised while fetching or loading a source page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Access forbidden (check User-Agent): {0}")]
    Forbidden(String),

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Could not read local page: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page location: {0}")]
    InvalidLocation(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid {field} selector '{selector}': {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    #[error("Invalid text rule: {0}")]
    InvalidTextRule(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Could not read source definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed source definition: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetching page failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Processing failed: {0}")]
    Processing(String),
}
