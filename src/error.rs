// src/error.rs

//! Unified error handling for the job crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Browser session operation failed
    #[error("Browser error: {0}")]
    Browser(String),

    /// Chrome DevTools protocol error
    #[cfg(feature = "chrome")]
    #[error("CDP error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Filter pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Search submission never produced the result metadata
    #[error("Timed out after {waited_ms}ms waiting for {what}")]
    MetadataTimeout { what: String, waited_ms: u64 },

    /// A result page did not render its expected items
    #[error("Page at start={start} did not show {expected} item(s) within {waited_ms}ms")]
    PageReadyTimeout {
        start: usize,
        expected: usize,
        waited_ms: u64,
    },

    /// A single result item could not be extracted
    #[error("Extraction failed for item {index}: {message}")]
    ItemExtraction { index: usize, message: String },
}

impl AppError {
    /// Create a browser session error.
    pub fn browser(message: impl fmt::Display) -> Self {
        Self::Browser(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a metadata timeout error.
    pub fn metadata_timeout(what: impl Into<String>, waited_ms: u64) -> Self {
        Self::MetadataTimeout {
            what: what.into(),
            waited_ms,
        }
    }

    /// Create an item extraction error.
    pub fn extraction(index: usize, message: impl fmt::Display) -> Self {
        Self::ItemExtraction {
            index,
            message: message.to_string(),
        }
    }

    /// Whether this error ends the whole traversal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::ItemExtraction { .. })
    }
}
