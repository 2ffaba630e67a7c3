//! Unified error handling for `ai-embedding-service`.
//!
//! This module exposes a single top-level error type [`AiEmbeddingError`] for the
//! whole library, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`ProviderError`]). Small helpers for reading/validating
//! environment variables return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI Embedding Service]` to simplify attribution in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiEmbeddingError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-embedding-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiEmbeddingError {
    /// Configuration/validation errors (startup or missing credential).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Provider-side failures: HTTP status, decoding, malformed vectors.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Input text was empty after trimming.
    #[error("[AI Embedding Service] input text is empty")]
    EmptyInput,

    /// Underlying HTTP transport error (connect, timeout, TLS).
    #[error("[AI Embedding Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

impl AiEmbeddingError {
    /// `true` for errors caused by configuration rather than by the remote call.
    pub fn is_config(&self) -> bool {
        matches!(self, AiEmbeddingError::Config(_))
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors that realistically happen at config load/validation time.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI Embedding Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (dimension, timeout).
    #[error("[AI Embedding Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `EMBEDDING_DIM`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Unsupported provider in `EMBEDDING_PROVIDER`.
    #[error("[AI Embedding Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI Embedding Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g., `EMBEDDING_ENDPOINT`).
        var: &'static str,
        /// Explanation (e.g., `must start with http:// or https://`).
        reason: &'static str,
    },

    /// Model name was empty.
    #[error("[AI Embedding Service] model name must not be empty")]
    EmptyModel,

    /// Dimension must be strictly positive.
    #[error("[AI Embedding Service] embedding dimension must be > 0")]
    ZeroDimension,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Embedding backend that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    OpenAi,
}

/// Non-success HTTP response details.
#[derive(Debug)]
pub struct HttpError {
    /// Numeric HTTP status code.
    pub status: StatusCode,
    /// Request URL.
    pub url: String,
    /// Short snippet of the response body (trimmed).
    pub snippet: String,
}

/// What went wrong on the provider side.
#[derive(Debug)]
pub enum ProviderErrorKind {
    /// The endpoint is empty or does not start with http/https.
    InvalidEndpoint(String),
    /// Upstream returned a non-successful HTTP status.
    HttpStatus(HttpError),
    /// Response payload could not be decoded as expected.
    Decode(String),
    /// Provider answered with an empty vector.
    EmptyEmbedding,
    /// Provider answered with a vector of the wrong length.
    DimensionMismatch { got: usize, want: usize },
}

/// Provider error with attribution.
#[derive(Debug, Error)]
#[error("[AI Embedding Service] {provider:?}: {}", describe(.kind))]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

fn describe(kind: &ProviderErrorKind) -> String {
    match kind {
        ProviderErrorKind::InvalidEndpoint(e) => format!("invalid endpoint: {e}"),
        ProviderErrorKind::HttpStatus(h) => {
            format!("HTTP {} from {}: {}", h.status, h.url, h.snippet)
        }
        ProviderErrorKind::Decode(m) => format!("decode error: {m}"),
        ProviderErrorKind::EmptyEmbedding => "empty embedding returned".to_string(),
        ProviderErrorKind::DimensionMismatch { got, want } => {
            format!("embedding dimension {got} != expected {want}")
        }
    }
}

/// Trims a response body into a log-friendly snippet (max 240 chars).
pub fn make_snippet(text: &str) -> String {
    let trimmed = text.trim();
    let mut s: String = trimmed.chars().take(240).collect();
    if trimmed.chars().count() > 240 {
        s.push('…');
    }
    s
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Reads an optional, non-empty environment variable.
pub fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match env_opt(name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiEmbeddingError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the scheme is missing.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}
