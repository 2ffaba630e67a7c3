//! Gemini embeddings client.
//!
//! Calls `POST {endpoint}/v1beta/models/{model}:embedContent` with the API key
//! in the `x-goog-api-key` header and requests `outputDimensionality = dim`.

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

/// Thin client for the Gemini `embedContent` endpoint.
#[derive(Debug)]
pub struct GeminiService {
    client: reqwest::Client,
    model: String,
    dim: usize,
    url_embed: String,
}

impl GeminiService {
    /// Creates a new [`GeminiService`] from the given config.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedProvider`] if `cfg.provider` is not Gemini
    /// - [`ConfigError::MissingVar`] if `cfg.api_key` is absent
    /// - [`ProviderErrorKind::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`AiEmbeddingError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: &EmbeddingModelConfig) -> Result<Self, AiEmbeddingError> {
        if cfg.provider != EmbeddingProvider::Gemini {
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
                Provider::Gemini,
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
            "x-goog-api-key",
            header::HeaderValue::from_str(api_key).map_err(|e| {
                ProviderError::new(
                    Provider::Gemini,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let model = cfg.model.trim_start_matches("models/").to_string();
        let base = endpoint.trim_end_matches('/');
        let url_embed = format!("{base}/v1beta/models/{model}:embedContent");

        Ok(Self {
            client,
            model,
            dim: cfg.dim,
            url_embed,
        })
    }

    /// Embeds a single text.
    ///
    /// # Errors
    /// - [`ProviderErrorKind::HttpStatus`] for non-2xx responses
    /// - [`AiEmbeddingError::HttpTransport`] for client/network failures
    /// - [`ProviderErrorKind::Decode`] if the response lacks `embedding.values`
    #[instrument(skip_all, fields(model = %self.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiEmbeddingError> {
        let started = Instant::now();
        let model_path = format!("models/{}", self.model);
        let body = EmbedContentRequest {
            model: &model_path,
            content: Content {
                parts: vec![Part { text: input }],
            },
            output_dimensionality: self.dim,
        };

        debug!(input_len = input.len(), "POST {}", self.url_embed);

        let resp = self.client.post(&self.url_embed).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_embed.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "embedContent returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: EmbedContentResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Gemini,
                ProviderErrorKind::Decode(format!(
                    "serde error: {e}; expected `{{ embedding: {{ values: number[] }} }}`"
                )),
            )
        })?;

        debug!(
            dim = out.embedding.values.len(),
            latency_ms = started.elapsed().as_millis(),
            "embedContent completed"
        );

        Ok(out.embedding.values)
    }
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest<'a> {
    model: &'a str,
    content: Content<'a>,
    output_dimensionality: usize,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cfg(endpoint: String) -> EmbeddingModelConfig {
        EmbeddingModelConfig {
            provider: EmbeddingProvider::Gemini,
            model: "models/text-embedding-004".into(),
            endpoint,
            api_key: Some("g-key".into()),
            dim: 2,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn posts_embed_content_with_dimensionality() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/text-embedding-004:embedContent"))
            .and(header("x-goog-api-key", "g-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "models/text-embedding-004",
                "outputDimensionality": 2,
                "content": { "parts": [{ "text": "reset password" }] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embedding": { "values": [0.5, -0.5] }
            })))
            .mount(&server)
            .await;

        let svc = GeminiService::new(&cfg(server.uri())).unwrap();
        let v = svc.embeddings("reset password").await.unwrap();
        assert_eq!(v, vec![0.5, -0.5]);
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "unexpected": 1 })),
            )
            .mount(&server)
            .await;

        let svc = GeminiService::new(&cfg(server.uri())).unwrap();
        let err = svc.embeddings("x").await.unwrap_err();
        assert!(err.to_string().contains("decode error"));
    }
}
