//! Embedding config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `EMBEDDING_PROVIDER`     = `gemini` (default) | `openai`
//! - `EMBEDDING_API_KEY`      = credential (optional here; `embed` fails without it)
//! - `EMBEDDING_MODEL`        = model id (provider default if unset)
//! - `EMBEDDING_ENDPOINT`     = base URL (provider default if unset)
//! - `EMBEDDING_DIM`          = output dimension (default 768)
//! - `EMBEDDING_TIMEOUT_SECS` = HTTP timeout (default 30)

use tracing::warn;

use crate::{
    config::{embedding_model_config::EmbeddingModelConfig, embedding_provider::EmbeddingProvider},
    error_handler::{AiEmbeddingError, ConfigError, env_opt, env_opt_u64, validate_http_endpoint},
};

/// Default output dimension (matches `text-embedding-004`).
pub const DEFAULT_EMBEDDING_DIM: usize = 768;

/// Builds the embedding config from the environment.
///
/// A missing credential is logged, not rejected: configuration problems in
/// the query path degrade to "no context" instead of stopping the service.
///
/// # Errors
/// - [`ConfigError::UnsupportedProvider`] for an unknown `EMBEDDING_PROVIDER`
/// - [`ConfigError::InvalidNumber`] for a malformed `EMBEDDING_DIM` / `EMBEDDING_TIMEOUT_SECS`
/// - [`ConfigError::ZeroDimension`] if `EMBEDDING_DIM=0`
/// - [`ConfigError::InvalidFormat`] if `EMBEDDING_ENDPOINT` lacks an http(s) scheme
pub fn config_embedding_from_env() -> Result<EmbeddingModelConfig, AiEmbeddingError> {
    let provider = match env_opt("EMBEDDING_PROVIDER") {
        Some(p) => EmbeddingProvider::parse(&p)?,
        None => EmbeddingProvider::Gemini,
    };

    let endpoint =
        env_opt("EMBEDDING_ENDPOINT").unwrap_or_else(|| provider.default_endpoint().to_string());
    validate_http_endpoint("EMBEDDING_ENDPOINT", &endpoint)?;

    let model = env_opt("EMBEDDING_MODEL").unwrap_or_else(|| provider.default_model().to_string());

    let dim = env_opt_u64("EMBEDDING_DIM")?
        .map(|d| d as usize)
        .unwrap_or(DEFAULT_EMBEDDING_DIM);
    if dim == 0 {
        return Err(ConfigError::ZeroDimension.into());
    }

    let api_key = env_opt("EMBEDDING_API_KEY");
    if api_key.is_none() {
        warn!(?provider, "EMBEDDING_API_KEY is not set; embedding calls will fail");
    }

    Ok(EmbeddingModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        dim,
        timeout_secs: Some(env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(30)),
    })
}
