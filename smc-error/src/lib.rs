//! Unified error handling for smcctl
//!
//! This crate provides a single error type used across all smcctl components.
//! The protocol-level variants follow the classification the dispatch layer
//! applies to every round trip: transport failure, missing privileges, missing
//! key, or any other non-success result byte.

use std::io;

/// Result type alias using SmcError
pub type Result<T> = std::result::Result<T, SmcError>;

/// Unified error type for all smcctl operations
#[derive(thiserror::Error, Debug)]
pub enum SmcError {
    // ============================================================================
    // Driver Errors
    // ============================================================================
    /// The call primitive itself failed; carries the raw kern_return code.
    #[error("Driver call failed (kern_return 0x{code:08x})")]
    Transport { code: u32 },

    #[error("Operation requires elevated privileges")]
    NotPrivileged,

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Unknown controller error (kern_return 0x{transport:08x}, result 0x{result:02x})")]
    UnknownProtocol { transport: u32, result: u8 },

    #[error("Driver not available: {0}")]
    NotSupported(String),

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unsafe speed {requested} RPM for fan {fan} (must be 1-{max})")]
    FanSpeedOutOfRange { fan: u32, requested: u32, max: u32 },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl SmcError {
    /// Create an invalid argument error from a string
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for the one classification callers may treat as a negative answer.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound(_))
    }
}
