//! OpenAI-compatible embeddings client.
//!
//! Minimal client around `POST {endpoint}/v1/embeddings`.
//!
//! Constructor validation:
//! - `cfg.provider` must be `EmbeddingProvider::OpenAi`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    config::{embedding_model_config::EmbeddingModelConfig, embedding_provider::EmbeddingProvider},
    error_handler::{
        AiEmbeddingError, ConfigError, HttpError, Provider, ProviderError, ProviderErrorKind,
        make_snippet,
    },
};

/// Thin client for the OpenAI embeddings API.
///
/// Keeps a preconfigured `reqwest::Client` (timeout + bearer auth header).
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    model: String,
    dim: usize,
    url_embeddings: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedProvider`] if `cfg.provider` is not OpenAI
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is absent
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiEmbeddingError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: &EmbeddingModelConfig) -> Result<Self, AiEmbeddingError> {
        if cfg.provider != EmbeddingProvider::OpenAi {
            return Err(ConfigError::UnsupportedProvider(format!("{:?}", cfg.provider)).into());
        }

        let api_key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingVar("EMBEDDING_API_KEY"))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                ProviderError::new(
                    Provider::OpenAi,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/');
        Ok(Self {
            client,
            model: cfg.model.clone(),
            dim: cfg.dim,
            url_embeddings: format!("{base}/v1/embeddings"),
        })
    }

    /// Retrieves a single embeddings vector.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`AiEmbeddingError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the JSON cannot be parsed or has no data
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiEmbeddingError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.model,
            input,
            dimensions: self.dim,
        };

        debug!(input_len = input.len(), "POST {}", self.url_embeddings);

        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embeddings.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "/v1/embeddings returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `data[0].embedding`"
                )),
            )
        })?;

        let first = out.data.into_iter().next().ok_or_else(|| {
            ProviderError::new(
                Provider::OpenAi,
                ProviderErrorKind::Decode("empty `data` in embeddings response".into()),
            )
        })?;

        debug!(
            dim = first.embedding.len(),
            latency_ms = started.elapsed().as_millis(),
            "embeddings completed"
        );

        Ok(first.embedding)
    }
}

/// Request body for `/v1/embeddings`.
#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
    dimensions: usize,
}

/// Response body for `/v1/embeddings`.
#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(endpoint: String) -> EmbeddingModelConfig {
        EmbeddingModelConfig {
            provider: EmbeddingProvider::OpenAi,
            model: "text-embedding-3-small".into(),
            endpoint,
            api_key: Some("sk-test".into()),
            dim: 3,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn sends_bearer_and_decodes_first_vector() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [0.1, 0.2, 0.3] }]
            })))
            .mount(&server)
            .await;

        let svc = OpenAiService::new(&cfg(server.uri())).unwrap();
        let v = svc.embeddings("hello").await.unwrap();
        assert_eq!(v, vec![0.1, 0.2, 0.3]);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/embeddings"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let svc = OpenAiService::new(&cfg(server.uri())).unwrap();
        let err = svc.embeddings("hello").await.unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let mut c = cfg("http://localhost:1".into());
        c.api_key = None;
        let err = OpenAiService::new(&c).unwrap_err();
        assert!(err.is_config());
    }
}
