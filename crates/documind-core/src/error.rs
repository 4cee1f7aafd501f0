//! Error types for the documind workspace.

use thiserror::Error;

/// Result type alias using DocumindError.
pub type Result<T> = std::result::Result<T, DocumindError>;

/// Errors that can occur across the documind components.
#[derive(Error, Debug)]
pub enum DocumindError {
    /// Invalid argument provided.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Document collection failed.
    #[error("Collection error: {message}")]
    Collect { message: String },

    /// Embedding model error.
    #[error("Embedding error: {message}")]
    Embedding { message: String },

    /// Document and embedding counts disagree.
    #[error("Count mismatch: {documents} documents but {embeddings} embeddings")]
    CountMismatch { documents: usize, embeddings: usize },

    /// Vector dimension does not match the index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Persisted artifact is unreadable or inconsistent.
    #[error("Corrupt artifact {path}: {reason}")]
    CorruptArtifact { path: String, reason: String },

    /// QA generation error.
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DocumindError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a collection error.
    pub fn collect(message: impl Into<String>) -> Self {
        Self::Collect {
            message: message.into(),
        }
    }

    /// Create an embedding error.
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a corrupt artifact error.
    pub fn corrupt(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DocumindError::CountMismatch {
            documents: 10,
            embeddings: 8,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("8"));
    }

    #[test]
    fn test_constructor_helpers() {
        let err = DocumindError::embedding("model not loaded");
        assert!(matches!(err, DocumindError::Embedding { .. }));
        assert!(err.to_string().contains("model not loaded"));

        let err = DocumindError::corrupt("embeddings.bin", "truncated payload");
        assert!(err.to_string().contains("embeddings.bin"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DocumindError = io.into();
        assert!(matches!(err, DocumindError::Io(_)));
    }
}
