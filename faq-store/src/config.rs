//! Runtime configuration: source feed, Qdrant, and retrieval knobs.
//!
//! Values come from environment variables (see [`FaqConfig::from_env`]).
//! The vector dimension is intentionally absent here: it belongs to the
//! embedding config and the collection dimension is derived from it.

use std::time::Duration;

use crate::errors::FaqError;

/// Default number of results returned by either retrieval strategy.
pub const DEFAULT_RESULT_LIMIT: usize = 5;
/// Default minimum similarity for vector hits.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;
/// Default character budget of the formatted context.
pub const DEFAULT_CONTEXT_MAX_CHARS: usize = 2000;
/// Default lifetime of the cached raw FAQ list.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
/// Default source fetch timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Describes the vector space of the collection. Distance is always cosine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorSpace {
    /// Dimensionality of vectors.
    pub size: usize,
}

/// Upstream FAQ feed.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    /// HTTP URL returning the FAQ list. `None` ⇒ the source is always empty.
    pub url: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: DEFAULT_SOURCE_TIMEOUT,
        }
    }
}

/// Qdrant connectivity and collection parameters.
#[derive(Clone, Debug)]
pub struct QdrantConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub url: String,
    /// Optional API key for Qdrant Cloud.
    pub api_key: Option<String>,
    /// Target collection name.
    pub collection: String,
    /// Client request timeout.
    pub timeout: Duration,
}

impl QdrantConfig {
    /// Creates a config for a given endpoint and collection with no credential.
    pub fn new(url: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: None,
            collection: collection.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), FaqError> {
        if self.url.trim().is_empty() {
            return Err(FaqError::Config("QDRANT_URL is empty".into()));
        }
        if self.collection.trim().is_empty() {
            return Err(FaqError::Config("QDRANT_COLLECTION is empty".into()));
        }
        Ok(())
    }
}

/// Query-time behavior.
#[derive(Clone, Debug)]
pub struct RetrievalConfig {
    /// Maximum number of results.
    pub limit: usize,
    /// Minimum similarity for vector hits (0.0..=1.0).
    pub score_threshold: f32,
    /// Character budget for the formatted context.
    pub context_max_chars: usize,
    /// Lifetime of the cached raw FAQ list (lexical strategy).
    pub cache_ttl: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RESULT_LIMIT,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            context_max_chars: DEFAULT_CONTEXT_MAX_CHARS,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

/// Top-level configuration for the FAQ store.
#[derive(Clone, Debug, Default)]
pub struct FaqConfig {
    pub source: SourceConfig,
    /// `None` ⇒ no vector index; retrieval uses the lexical strategy and sync is unavailable.
    pub qdrant: Option<QdrantConfig>,
    pub retrieval: RetrievalConfig,
}

impl FaqConfig {
    /// Build configuration from environment variables.
    ///
    /// Environment variables used:
    /// - `FAQ_SOURCE_URL` (optional)
    /// - `FAQ_SOURCE_TIMEOUT_MS` (default: 30000)
    /// - `QDRANT_URL` (optional; enables the vector strategy)
    /// - `QDRANT_API_KEY` (optional)
    /// - `QDRANT_COLLECTION` (default: "faq_embeddings")
    /// - `QDRANT_TIMEOUT_SECS` (default: 30)
    /// - `FAQ_RESULT_LIMIT` (default: 5)
    /// - `FAQ_SCORE_THRESHOLD` (default: 0.5)
    /// - `FAQ_CONTEXT_MAX_CHARS` (default: 2000)
    /// - `FAQ_CACHE_TTL_SECS` (default: 3600)
    pub fn from_env() -> Result<Self, FaqError> {
        let source = SourceConfig {
            url: read_opt_env("FAQ_SOURCE_URL"),
            timeout: read_parsed_env::<u64>("FAQ_SOURCE_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_SOURCE_TIMEOUT),
        };

        let qdrant = match read_opt_env("QDRANT_URL") {
            Some(url) => {
                let cfg = QdrantConfig {
                    url,
                    api_key: read_opt_env("QDRANT_API_KEY"),
                    collection: read_opt_env("QDRANT_COLLECTION")
                        .unwrap_or_else(|| "faq_embeddings".into()),
                    timeout: Duration::from_secs(
                        read_parsed_env::<u64>("QDRANT_TIMEOUT_SECS")?.unwrap_or(30),
                    ),
                };
                cfg.validate()?;
                Some(cfg)
            }
            None => None,
        };

        let retrieval = RetrievalConfig {
            limit: read_parsed_env("FAQ_RESULT_LIMIT")?.unwrap_or(DEFAULT_RESULT_LIMIT),
            score_threshold: read_parsed_env("FAQ_SCORE_THRESHOLD")?
                .unwrap_or(DEFAULT_SCORE_THRESHOLD),
            context_max_chars: read_parsed_env("FAQ_CONTEXT_MAX_CHARS")?
                .unwrap_or(DEFAULT_CONTEXT_MAX_CHARS),
            cache_ttl: read_parsed_env::<u64>("FAQ_CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_CACHE_TTL),
        };

        if retrieval.limit == 0 {
            return Err(FaqError::Config("FAQ_RESULT_LIMIT must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&retrieval.score_threshold) {
            return Err(FaqError::Config(
                "FAQ_SCORE_THRESHOLD must be within 0.0..=1.0".into(),
            ));
        }

        Ok(Self {
            source,
            qdrant,
            retrieval,
        })
    }
}

/// Reads an optional, non-blank env value.
fn read_opt_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Reads and parses an optional env value; a present-but-invalid value is an error.
fn read_parsed_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, FaqError> {
    match read_opt_env(key) {
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|_| FaqError::Config(format!("failed to parse env variable: {key} = '{v}'"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let r = RetrievalConfig::default();
        assert_eq!(r.limit, 5);
        assert_eq!(r.score_threshold, 0.5);
        assert_eq!(r.context_max_chars, 2000);
        assert_eq!(r.cache_ttl, Duration::from_secs(3600));
        assert!(FaqConfig::default().qdrant.is_none());
    }

    #[test]
    fn qdrant_config_rejects_blank_collection() {
        let cfg = QdrantConfig::new("http://localhost:6334", "  ");
        assert!(cfg.validate().is_err());
        assert!(QdrantConfig::new("http://localhost:6334", "faq").validate().is_ok());
    }
}
