// src/utils/error.rs
use thiserror::Error;

// Define specific error types for the fallible edges of the application.
// The extraction core itself never fails; it reports "not found" by omission.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse document {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document {0} has neither tables nor text")]
    Empty(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read keyword file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse keyword file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Keyword entry has an empty quantity name")]
    EmptyQuantity,

    #[error("Quantity '{0}' has no usable aliases")]
    NoAliases(String),

    #[error("Quantity '{0}' is defined more than once")]
    DuplicateQuantity(String),
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
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document loading failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Keyword configuration invalid: {0}")]
    Keywords(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
