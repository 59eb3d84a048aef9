//! Error types for clipscribe.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipscribeError {
    // Source acquisition errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unsupported source: {message}")]
    UnsupportedSource { message: String },

    #[error("Download failed: {message}")]
    Download { message: String },

    // Transcription errors
    #[error("Invalid configuration for {key}: {message}")]
    InvalidConfiguration { key: String, message: String },

    #[error("Transcription model not found at {path}")]
    ModelNotFound { path: String },

    #[error("Transcription failed: {message}")]
    Transcription { message: String },

    // Delivery errors
    #[error("Failed to write transcript to {path}: {message}")]
    OutputWrite { path: String, message: String },

    // Configuration file errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ClipscribeError>;
