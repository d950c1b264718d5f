//! Error types and result aliases for supergemlock operations.
//!
//! Provides a unified error type covering manifest input, catalog
//! loading, and emission failures with actionable error messages.

use thiserror::Error;

/// Unified error type for all supergemlock operations
#[derive(Error, Debug)]
pub enum GrlkError {
    // Input errors
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Gemfile syntax error at line {line}: {message}")]
    ManifestSyntax { line: usize, message: String },

    // Catalog errors
    #[error("Failed to load catalog: {message}")]
    CatalogLoad { message: String },

    // Emission errors
    #[error("Failed to write lock file {path}: {source}")]
    LockWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write snapshot {path}: {source}")]
    SnapshotWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Internal invariant violations; should never occur
    #[error("Internal invariant violated: {message}")]
    Internal { message: String },
}

/// Result type alias for supergemlock operations
pub type GrlkResult<T> = Result<T, GrlkError>;

impl GrlkError {
    /// Create an internal invariant error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            GrlkError::ManifestRead { .. } => {
                Some("Run supergemlock from a directory containing a Gemfile")
            },
            GrlkError::ManifestSyntax { .. } => {
                Some("Check the reported line for unbalanced quotes or a missing 'do'")
            },
            GrlkError::LockWrite { .. } | GrlkError::SnapshotWrite { .. } => {
                Some("Check that the working directory is writable")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = GrlkError::ManifestSyntax {
            line: 7,
            message: "expected quoted gem name".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("expected quoted gem name"));
    }

    #[test]
    fn test_suggestions() {
        let err = GrlkError::ManifestRead {
            path: "Gemfile".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.suggestion().is_some());

        let err = GrlkError::internal("map/sequence disagree");
        assert!(err.suggestion().is_none());
    }
}
