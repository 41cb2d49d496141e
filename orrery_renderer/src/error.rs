//! Error types for the Orrery renderer
//!
//! This module defines the error types used throughout the renderer,
//! covering scene registration, resource creation, and command submission.

use std::fmt;

/// Result type for Orrery renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orrery renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Registration past the registry's fixed capacity.
    ///
    /// Returned before any slot is written; the registry is left untouched.
    CapacityExceeded {
        /// The fixed capacity that would have been exceeded
        capacity: usize,
    },

    /// Operation the renderer does not support (e.g. updating an
    /// already-registered primitive or transform)
    UnsupportedOperation(String),

    /// Invalid resource handed to the renderer (undersized readback
    /// buffer, malformed SPIR-V, ...)
    InvalidResource(String),

    /// Backend-specific error (a native graphics API call failed)
    BackendError(String),

    /// Initialization failed (device context, descriptors, attachments)
    InitializationFailed(String),

    /// Out of GPU memory
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityExceeded { capacity } => {
                write!(f, "Scene capacity exceeded (capacity: {})", capacity)
            }
            Error::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
