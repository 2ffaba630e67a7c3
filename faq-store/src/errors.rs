//! Unified error types for the crate.

use ai_embedding_service::AiEmbeddingError;
use ai_embedding_service::error_handler::ProviderErrorKind;
use thiserror::Error;

/// Coarse classification used to pick a propagation policy.
///
/// The sync path fails fast on every kind; the query path degrades every kind
/// to "no context".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credential, missing URL, unparsable env value.
    Configuration,
    /// Malformed record, missing id, vector/dimension mismatch.
    Validation,
    /// Network or timeout against any external service.
    Transient,
    /// Embedding count differs from record count.
    Consistency,
}

/// Top-level error for faq-store operations.
#[derive(Debug, Error)]
pub enum FaqError {
    /// Invalid or missing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// A record or point failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A produced vector does not match the declared dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Pipeline stages disagree on item counts.
    #[error("consistency error: {records} records but {vectors} vectors")]
    Consistency { records: usize, vectors: usize },

    /// FAQ source feed failures (transport, status).
    #[error("source error: {0}")]
    Source(String),

    /// Embedding provider failures.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// JSON parsing / serialization errors.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FaqError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FaqError::Config(_) => ErrorKind::Configuration,
            FaqError::Validation(_) | FaqError::VectorSizeMismatch { .. } | FaqError::Parse(_) => {
                ErrorKind::Validation
            }
            FaqError::Consistency { .. } => ErrorKind::Consistency,
            FaqError::Source(_) | FaqError::Embedding(_) | FaqError::Qdrant(_) => {
                ErrorKind::Transient
            }
        }
    }
}

impl From<AiEmbeddingError> for FaqError {
    fn from(e: AiEmbeddingError) -> Self {
        match &e {
            AiEmbeddingError::Config(_) => FaqError::Config(e.to_string()),
            AiEmbeddingError::EmptyInput => FaqError::Validation(e.to_string()),
            AiEmbeddingError::Provider(p) => match &p.kind {
                ProviderErrorKind::DimensionMismatch { got, want } => FaqError::VectorSizeMismatch {
                    got: *got,
                    want: *want,
                },
                _ => FaqError::Embedding(e.to_string()),
            },
            _ => FaqError::Embedding(e.to_string()),
        }
    }
}

impl From<reqwest::Error> for FaqError {
    fn from(e: reqwest::Error) -> Self {
        FaqError::Source(e.to_string())
    }
}
