use crate::error_handler::{AiEmbeddingError, ConfigError};

/// Remote backend used to generate embeddings.
///
/// Both providers require a credential; the model and output dimension are a
/// fixed deployment choice carried by
/// [`EmbeddingModelConfig`](crate::config::embedding_model_config::EmbeddingModelConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// Google Generative Language API (`models/{model}:embedContent`).
    Gemini,
    /// OpenAI or any server speaking the `/v1/embeddings` protocol.
    OpenAi,
}

impl EmbeddingProvider {
    /// Parses a provider name (case-insensitive).
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedProvider`] for unknown names.
    pub fn parse(s: &str) -> Result<Self, AiEmbeddingError> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(EmbeddingProvider::Gemini),
            "openai" | "open_ai" | "chatgpt" => Ok(EmbeddingProvider::OpenAi),
            other => Err(ConfigError::UnsupportedProvider(other.to_string()).into()),
        }
    }

    /// Public endpoint used when `EMBEDDING_ENDPOINT` is not set.
    pub fn default_endpoint(self) -> &'static str {
        match self {
            EmbeddingProvider::Gemini => "https://generativelanguage.googleapis.com",
            EmbeddingProvider::OpenAi => "https://api.openai.com",
        }
    }

    /// Model used when `EMBEDDING_MODEL` is not set.
    pub fn default_model(self) -> &'static str {
        match self {
            EmbeddingProvider::Gemini => "text-embedding-004",
            EmbeddingProvider::OpenAi => "text-embedding-3-small",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names() {
        assert_eq!(
            EmbeddingProvider::parse("Gemini").unwrap(),
            EmbeddingProvider::Gemini
        );
        assert_eq!(
            EmbeddingProvider::parse(" openai ").unwrap(),
            EmbeddingProvider::OpenAi
        );
        assert!(EmbeddingProvider::parse("cohere").is_err());
    }
}
