//! Error types and handling for the DroughtWatch service

use thiserror::Error;

/// Main error type for the DroughtWatch service
#[derive(Error, Debug)]
pub enum DroughtWatchError {
    /// Requested region is not in the catalog
    #[error("Region not found: {region}")]
    NotFound { region: String },

    /// A model invariant was violated during construction
    #[error("Invalid data: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Unexpected provider failures
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DroughtWatchError {
    /// Create a new not-found error for a region id
    pub fn not_found<S: Into<String>>(region: S) -> Self {
        Self::NotFound {
            region: region.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
