//! Error types for the local key-value store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing the local store file.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file exists but could not be read.
    #[error("Failed to read local store: {path}")]
    Read {
        /// Path of the store file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store file (or its temp copy) could not be written.
    #[error("Failed to write local store: {path}")]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON object of string values.
    #[error("Local store at {path} is corrupt: {message}")]
    Parse {
        /// Path of the store file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A value could not be serialized to JSON.
    #[error("Failed to serialize value for key '{key}': {message}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Serializer message.
        message: String,
    },
}
