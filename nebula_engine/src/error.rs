//! Error types for the Nebula engine
//!
//! This module defines the error types used throughout the engine,
//! including render target construction, backend view creation and
//! engine singleton management.

use std::fmt;

/// Result type for Nebula engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nebula engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Malformed or unsupported attachment layout in a render target descriptor
    InvalidDescriptor(String),

    /// Configuration the active backend cannot honor (e.g. device index out of range)
    UnsupportedConfiguration(String),

    /// Native view creation failed (out of device memory, incompatible format, ...)
    ResourceCreationFailure(String),

    /// Backend-specific error (Vulkan, null backend, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (unknown or duplicate render target, foreign texture, ...)
    InvalidResource(String),

    /// Initialization failed (engine, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDescriptor(msg) => write!(f, "Invalid descriptor: {}", msg),
            Error::UnsupportedConfiguration(msg) => write!(f, "Unsupported configuration: {}", msg),
            Error::ResourceCreationFailure(msg) => write!(f, "Resource creation failure: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
