//! Provider-agnostic embedding service.
//!
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - The HTTP client is built at construction time when a credential is present.
//!   Without a credential the service still constructs, and every
//!   [`EmbeddingService::embed`] call fails with a config error.
//! - Every returned vector is checked against the configured dimension.

use tracing::{debug, info, warn};

use crate::{
    config::{embedding_model_config::EmbeddingModelConfig, embedding_provider::EmbeddingProvider},
    error_handler::{AiEmbeddingError, ConfigError, Provider, ProviderError, ProviderErrorKind},
    services::{gemini_service::GeminiService, open_ai_service::OpenAiService},
};

enum Backend {
    Gemini(GeminiService),
    OpenAi(OpenAiService),
}

/// Text → vector adapter over the configured provider.
pub struct EmbeddingService {
    cfg: EmbeddingModelConfig,
    backend: Option<Backend>,
}

impl EmbeddingService {
    /// Creates the service.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroDimension`] / [`ConfigError::EmptyModel`] for
    /// unusable configs, or provider construction errors (bad endpoint, client
    /// build failure). A missing credential is **not** an error here.
    pub fn new(cfg: EmbeddingModelConfig) -> Result<Self, AiEmbeddingError> {
        if cfg.dim == 0 {
            return Err(ConfigError::ZeroDimension.into());
        }
        if cfg.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }

        let backend = if cfg.has_credential() {
            Some(match cfg.provider {
                EmbeddingProvider::Gemini => Backend::Gemini(GeminiService::new(&cfg)?),
                EmbeddingProvider::OpenAi => Backend::OpenAi(OpenAiService::new(&cfg)?),
            })
        } else {
            warn!(
                provider = ?cfg.provider,
                "embedding credential is absent; EmbeddingService will reject all requests"
            );
            None
        };

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            dim = cfg.dim,
            "EmbeddingService initialized"
        );

        Ok(Self { cfg, backend })
    }

    /// Output dimension of every vector this service produces.
    pub fn dimension(&self) -> usize {
        self.cfg.dim
    }

    /// `true` when a credential is configured and requests can be issued.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Access to the underlying config.
    pub fn config(&self) -> &EmbeddingModelConfig {
        &self.cfg
    }

    /// Embeds one text.
    ///
    /// # Errors
    /// - [`ConfigError::MissingVar`] if the credential is absent
    /// - [`AiEmbeddingError::EmptyInput`] if `text` is empty after trimming
    /// - [`ProviderErrorKind::EmptyEmbedding`] if the provider returns no values
    /// - [`ProviderErrorKind::DimensionMismatch`] if the length differs from `dim`
    /// - transport / HTTP status / decode errors from the provider
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, AiEmbeddingError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(ConfigError::MissingVar("EMBEDDING_API_KEY"))?;

        let text = text.trim();
        if text.is_empty() {
            return Err(AiEmbeddingError::EmptyInput);
        }

        let (provider, vector) = match backend {
            Backend::Gemini(svc) => (Provider::Gemini, svc.embeddings(text).await?),
            Backend::OpenAi(svc) => (Provider::OpenAi, svc.embeddings(text).await?),
        };

        if vector.is_empty() {
            return Err(ProviderError::new(provider, ProviderErrorKind::EmptyEmbedding).into());
        }
        if vector.len() != self.cfg.dim {
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::DimensionMismatch {
                    got: vector.len(),
                    want: self.cfg.dim,
                },
            )
            .into());
        }

        debug!(dim = vector.len(), "embedding ok");
        Ok(vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(endpoint: String, dim: usize, key: Option<&str>) -> EmbeddingModelConfig {
        EmbeddingModelConfig {
            provider: EmbeddingProvider::OpenAi,
            model: "text-embedding-3-small".into(),
            endpoint,
            api_key: key.map(str::to_string),
            dim,
            timeout_secs: Some(5),
        }
    }

    async fn server_returning(body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn returns_vector_of_configured_dimension() {
        let server =
            server_returning(serde_json::json!({ "data": [{ "embedding": [1.0, 0.0, 0.0] }] }))
                .await;
        let svc = EmbeddingService::new(cfg(server.uri(), 3, Some("k"))).unwrap();

        let v = svc.embed("  how do I reset my password?  ").await.unwrap();
        assert_eq!(v.len(), svc.dimension());
    }

    #[tokio::test]
    async fn whitespace_text_is_rejected_without_remote_call() {
        let server = MockServer::start().await;
        let svc = EmbeddingService::new(cfg(server.uri(), 3, Some("k"))).unwrap();

        let err = svc.embed(" \n\t ").await.unwrap_err();
        assert!(matches!(err, AiEmbeddingError::EmptyInput));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_fails_every_call() {
        let svc = EmbeddingService::new(cfg("http://localhost:9".into(), 3, None)).unwrap();
        assert!(!svc.is_configured());

        let err = svc.embed("hello").await.unwrap_err();
        assert!(err.is_config());
    }

    #[tokio::test]
    async fn blank_credential_counts_as_missing() {
        let svc = EmbeddingService::new(cfg("http://localhost:9".into(), 3, Some("  "))).unwrap();
        assert!(svc.embed("hello").await.unwrap_err().is_config());
    }

    #[tokio::test]
    async fn empty_vector_is_rejected() {
        let server = server_returning(serde_json::json!({ "data": [{ "embedding": [] }] })).await;
        let svc = EmbeddingService::new(cfg(server.uri(), 3, Some("k"))).unwrap();

        let err = svc.embed("hello").await.unwrap_err();
        assert!(err.to_string().contains("empty embedding"));
    }

    #[tokio::test]
    async fn wrong_dimension_is_rejected() {
        let server =
            server_returning(serde_json::json!({ "data": [{ "embedding": [1.0, 2.0] }] })).await;
        let svc = EmbeddingService::new(cfg(server.uri(), 3, Some("k"))).unwrap();

        let err = svc.embed("hello").await.unwrap_err();
        assert!(err.to_string().contains("2 != expected 3"));
    }

    #[test]
    fn zero_dimension_is_a_config_error() {
        let err = EmbeddingService::new(cfg("http://localhost:9".into(), 0, Some("k")))
            .err()
            .unwrap();
        assert!(err.is_config());
    }
}
