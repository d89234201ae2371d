//! Error handling for liveness sweep operations.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways a sweep can fail, from unreadable input lists to resolver setup issues.
//!
//! Note that a domain failing to resolve is NOT an error: non-resolution is the
//! expected "inactive" classification and flows through `ProbeReport` instead.

use std::fmt;

/// Main error type for liveness sweep operations.
///
/// This enum covers the failure modes of the sweep process itself,
/// providing detailed context for debugging and user-friendly messages.
#[derive(Debug, Clone)]
pub enum TriageError {
    /// Invalid domain name format
    InvalidDomain {
        domain: String,
        reason: String,
    },

    /// Resolver construction or infrastructure errors (not per-domain lookups)
    ResolverError {
        message: String,
        source: Option<String>,
    },

    /// Invalid chunk selection (index out of range, zero chunk count)
    ChunkError {
        index: usize,
        count: usize,
        message: String,
    },

    /// Configuration errors (invalid settings, unparseable config files)
    ConfigError {
        message: String,
    },

    /// File I/O errors when reading domain lists or writing result sets
    FileError {
        path: String,
        message: String,
    },

    /// Timeout errors when operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal {
        message: String,
    },
}

impl TriageError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new resolver error.
    pub fn resolver<M: Into<String>>(message: M) -> Self {
        Self::ResolverError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new resolver error with source information.
    pub fn resolver_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::ResolverError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new chunk selection error.
    pub fn chunk<M: Into<String>>(index: usize, count: usize, message: M) -> Self {
        Self::ChunkError {
            index,
            count,
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was caused by how the tool was invoked.
    ///
    /// Usage errors (bad chunk bounds, bad config values, malformed domains
    /// passed directly) get a distinct exit code so wrapper scripts can tell
    /// operator mistakes apart from runtime failures.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomain { .. } | Self::ChunkError { .. } | Self::ConfigError { .. }
        )
    }

    /// Check if this error suggests the operation could succeed on a rerun.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ResolverError { .. } | Self::Timeout { .. })
    }
}

impl fmt::Display for TriageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::ResolverError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Resolver error: {} (source: {})", message, source)
                } else {
                    write!(f, "Resolver error: {}", message)
                }
            }
            Self::ChunkError { index, count, message } => {
                write!(f, "Invalid chunk {}/{}: {}", index, count, message)
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout { operation, duration } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for TriageError {}

// Implement From conversions for common error types
impl From<std::io::Error> for TriageError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_helpers() {
        let err = TriageError::invalid_domain("ex ample.com", "contains whitespace");
        assert!(matches!(err, TriageError::InvalidDomain { .. }));
        assert!(err.to_string().contains("ex ample.com"));

        let err = TriageError::file_error("/tmp/missing.txt", "No such file");
        assert!(err.to_string().contains("/tmp/missing.txt"));
    }

    #[test]
    fn test_usage_error_classification() {
        assert!(TriageError::chunk(8, 8, "index out of range").is_usage_error());
        assert!(TriageError::config("concurrency must be >= 1").is_usage_error());
        assert!(!TriageError::file_error("x", "y").is_usage_error());
        assert!(!TriageError::internal("boom").is_usage_error());
    }

    #[test]
    fn test_transient_classification() {
        let err = TriageError::timeout("resolver warmup", std::time::Duration::from_secs(5));
        assert!(err.is_transient());
        assert!(TriageError::resolver("no upstream reachable").is_transient());
        assert!(!TriageError::chunk(0, 0, "zero chunks").is_transient());
    }
}
