//! Unified error handling for the locgate project
//!
//! One structured error type covers the gateway, the smoke tester, and the
//! process reaper, with classification helpers for exit-code mapping.

use std::io;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors (bad listen address, bad endpoint URL, ...)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Network errors (smoke requests, endpoint unreachable)
    #[error("Network error: {message}")]
    Network {
        message: String,
        url: Option<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Process management errors (signal delivery, enumeration)
    #[error("Process error: {message}")]
    Process { message: String, pid: Option<u32> },

    /// Persistence errors (terminal store load/save)
    #[error("Storage error: {message} (path: {path})")]
    Storage {
        message: String,
        path: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors (rejected telemetry requests)
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Network,
    Process,
    Storage,
    Validation,
    Io,
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>, url: Option<String>) -> Self {
        Self::Network {
            message: message.into(),
            url,
            source: None,
        }
    }

    pub fn network_with_source(
        message: impl Into<String>,
        url: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: message.into(),
            url,
            source: Some(Box::new(source)),
        }
    }

    pub fn process(message: impl Into<String>, pid: Option<u32>) -> Self {
        Self::Process {
            message: message.into(),
            pid,
        }
    }

    pub fn storage(
        message: impl Into<String>,
        path: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    pub fn validation(message: impl Into<String>, field: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::Config { .. } => ErrorCategory::Config,
            GatewayError::Network { .. } => ErrorCategory::Network,
            GatewayError::Process { .. } => ErrorCategory::Process,
            GatewayError::Storage { .. } => ErrorCategory::Storage,
            GatewayError::Validation { .. } => ErrorCategory::Validation,
            GatewayError::Io(_) => ErrorCategory::Io,
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::Config { message } => {
                format!("Configuration problem: {}", message)
            }
            GatewayError::Network { message, url, .. } => match url {
                Some(url) => format!("Network problem talking to {}: {}", url, message),
                None => format!("Network problem: {}", message),
            },
            GatewayError::Process { message, pid } => match pid {
                Some(pid) => format!("Process {} could not be handled: {}", pid, message),
                None => format!("Process problem: {}", message),
            },
            GatewayError::Storage { message, path, .. } => {
                format!("Store file {} problem: {}", path, message)
            }
            GatewayError::Validation { message, field } => match field {
                Some(field) => format!("Invalid request field '{}': {}", field, message),
                None => format!("Invalid request: {}", message),
            },
            GatewayError::Io(err) => format!("I/O problem: {}", err),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GatewayError>;
