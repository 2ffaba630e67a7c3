use crate::config::embedding_provider::EmbeddingProvider;

/// Configuration for one embedding model deployment.
///
/// `dim` is the single source of truth for vector length: the embedding
/// service enforces it on every response and the vector index declares its
/// collection with the same value.
///
/// # Examples
///
/// ```
/// use ai_embedding_service::{EmbeddingModelConfig, EmbeddingProvider};
///
/// let cfg = EmbeddingModelConfig {
///     provider: EmbeddingProvider::Gemini,
///     model: "text-embedding-004".to_string(),
///     endpoint: "https://generativelanguage.googleapis.com".to_string(),
///     api_key: Some("key".to_string()),
///     dim: 768,
///     timeout_secs: Some(30),
/// };
/// assert!(cfg.has_credential());
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddingModelConfig {
    /// The embedding backend.
    pub provider: EmbeddingProvider,

    /// Model identifier (e.g., `"text-embedding-004"`).
    pub model: String,

    /// Base URL of the provider API (no trailing path).
    pub endpoint: String,

    /// Provider credential. Absent ⇒ every `embed` call fails with a config error.
    pub api_key: Option<String>,

    /// Output vector dimension.
    pub dim: usize,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl EmbeddingModelConfig {
    /// `true` when a non-blank credential is configured.
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }
}
