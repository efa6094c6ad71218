//! Error types for flag table files.
//!
//! Covers reading and writing the file, decoding it, and the registry
//! validation that runs when a table is turned into a registry.

use flag_registry_core::RegistryError;
use thiserror::Error;

/// Errors that can occur while loading, saving or applying a flag table.
#[derive(Debug, Error)]
pub enum TableError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The table declares a format version this crate cannot read.
    #[error("unsupported flag table version: {0}")]
    UnsupportedVersion(String),

    /// The table decoded but describes an invalid registry.
    #[error("invalid flag table: {0}")]
    Registry(#[from] RegistryError),
}

/// Convenience alias for results with [`TableError`].
pub type Result<T> = std::result::Result<T, TableError>;
