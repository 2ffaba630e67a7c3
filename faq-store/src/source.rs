//! FAQ source feed.
//!
//! The canonical FAQ list lives behind an HTTP GET. Accepted shapes:
//! - a JSON array of FAQ objects,
//! - an object with a `data` array (envelope),
//! - an object with `success: false` (treated as empty, logged),
//! - anything else is treated as an empty list.

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::errors::FaqError;

/// Provider of the raw, ordered FAQ list.
pub trait FaqSource: Send + Sync {
    /// Fetches the full list. Errors propagate; callers choose the policy.
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Value>, FaqError>>;
}

/// HTTP-backed FAQ source.
pub struct HttpFaqSource {
    client: reqwest::Client,
    url: Option<String>,
}

impl HttpFaqSource {
    /// Builds the HTTP client once with the configured timeout.
    ///
    /// # Errors
    /// [`FaqError::Config`] if the client cannot be built.
    pub fn new(cfg: &SourceConfig) -> Result<Self, FaqError> {
        let client = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| FaqError::Config(format!("source http client build: {e}")))?;

        if cfg.url.is_none() {
            warn!("FAQ_SOURCE_URL is not set; FAQ source will always be empty");
        }

        Ok(Self {
            client,
            url: cfg.url.clone(),
        })
    }

    async fn fetch(&self) -> Result<Vec<Value>, FaqError> {
        let Some(url) = self.url.as_deref() else {
            debug!("FAQ source unconfigured, returning empty list");
            return Ok(Vec::new());
        };

        debug!("GET {url}");
        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(240).collect();
            return Err(FaqError::Source(format!(
                "GET {url} returned {status}: {snippet}"
            )));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| FaqError::Source(format!("GET {url}: invalid JSON body: {e}")))?;

        let list = faq_list_from_body(body);
        info!(count = list.len(), "fetched FAQ source list");
        Ok(list)
    }
}

impl FaqSource for HttpFaqSource {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Value>, FaqError>> {
        Box::pin(self.fetch())
    }
}

/// Extracts the FAQ array from a response body.
pub fn faq_list_from_body(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => {
            if obj.get("success").and_then(Value::as_bool) == Some(false) {
                let reason = obj.get("message").and_then(Value::as_str).unwrap_or("-");
                warn!(reason, "FAQ source reported failure");
                return Vec::new();
            }
            match obj.remove("data") {
                Some(Value::Array(items)) => items,
                _ => {
                    warn!("FAQ source returned an object without a `data` array");
                    Vec::new()
                }
            }
        }
        _ => {
            warn!("FAQ source returned a non-array body");
            Vec::new()
        }
    }
}
