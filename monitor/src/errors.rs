//! Custom error types for the monitor
//!
//! Provides structured error handling with context for the different
//! failure scenarios the monitor has to tell apart.

use std::fmt;

/// Main error type for the monitor
#[derive(Debug)]
pub enum MonitorError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Container runtime errors
    Container(ContainerError),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Configuration parsing error
    ParseError { path: String, reason: String },
}

/// Status query error variants
///
/// `Unreachable` and `UnusableStatus` end the poll cycle without touching
/// the retry budget. The other variants count as one failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusQueryError {
    /// The node's API could not be connected to at all
    Unreachable { url: String, reason: String },

    /// The request did not complete within the per-attempt timeout
    Timeout { url: String },

    /// The node answered with a non-success status code
    BadStatus { url: String, status: u16 },

    /// The request failed after the connection was made
    RequestFailed { url: String, reason: String },

    /// The node answered 2xx but the body holds no usable status
    /// (not JSON, GraphQL errors without data, unknown sync status)
    UnusableStatus { url: String, reason: String },
}

/// Container runtime error variants
#[derive(Debug)]
pub enum ContainerError {
    /// Listing running containers failed
    ListFailed { reason: String },

    /// Stopping a container failed
    StopFailed { container: String, reason: String },
}

impl StatusQueryError {
    /// Whether this failure is a connection-level one
    pub fn is_unreachable(&self) -> bool {
        matches!(self, StatusQueryError::Unreachable { .. })
    }

    /// Whether the node answered without a status it can be judged by
    pub fn is_unusable_status(&self) -> bool {
        matches!(self, StatusQueryError::UnusableStatus { .. })
    }
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(e) => write!(f, "Configuration error: {}", e),
            MonitorError::Container(e) => write!(f, "Container error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::ParseError { path, reason } => {
                write!(f, "Failed to parse config '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for StatusQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusQueryError::Unreachable { url, reason } => {
                write!(f, "Node at {} is not reachable: {}", url, reason)
            }
            StatusQueryError::Timeout { url } => {
                write!(f, "Status request to {} timed out", url)
            }
            StatusQueryError::BadStatus { url, status } => {
                write!(f, "Status request to {} returned HTTP {}", url, status)
            }
            StatusQueryError::RequestFailed { url, reason } => {
                write!(f, "Status request to {} failed: {}", url, reason)
            }
            StatusQueryError::UnusableStatus { url, reason } => {
                write!(f, "No usable status from {}: {}", url, reason)
            }
        }
    }
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::ListFailed { reason } => {
                write!(f, "Failed to list running containers: {}", reason)
            }
            ContainerError::StopFailed { container, reason } => {
                write!(f, "Failed to stop container '{}': {}", container, reason)
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StatusQueryError {}
impl std::error::Error for ContainerError {}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}

impl From<ContainerError> for MonitorError {
    fn from(err: ContainerError) -> Self {
        MonitorError::Container(err)
    }
}
