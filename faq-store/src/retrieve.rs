//! Query-time retrieval: vector similarity when an index is available,
//! keyword matching over the cached FAQ list otherwise.
//!
//! Retrieval never fails from the caller's point of view. Every error is
//! logged and turned into an empty result list.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cache::FaqCache;
use crate::config::RetrievalConfig;
use crate::embed::EmbeddingsProvider;
use crate::index::VectorIndex;
use crate::lexical::lexical_search;
use crate::record::{FaqRecord, RetrievalResult};
use crate::source::FaqSource;

/// Embeds the query and searches the vector index.
pub struct VectorRetriever {
    index: Arc<dyn VectorIndex>,
    embedder: Arc<dyn EmbeddingsProvider>,
    limit: usize,
    score_threshold: f32,
}

impl VectorRetriever {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        embedder: Arc<dyn EmbeddingsProvider>,
        cfg: &RetrievalConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            limit: cfg.limit,
            score_threshold: cfg.score_threshold,
        }
    }

    pub async fn retrieve(&self, query: &str) -> Vec<RetrievalResult> {
        let query = query.trim();
        if query.is_empty() {
            debug!("vector retrieval: empty query");
            return Vec::new();
        }

        let vector = match self.embedder.embed(query).await {
            Ok(v) => v,
            Err(e) => {
                warn!("vector retrieval: query embedding failed: {e}");
                return Vec::new();
            }
        };

        let hits = match self
            .index
            .search(vector, self.limit as u64, self.score_threshold)
            .await
        {
            Ok(h) => h,
            Err(e) => {
                warn!("vector retrieval: search failed: {e}");
                return Vec::new();
            }
        };

        let mut out = Vec::with_capacity(hits.len());
        for hit in hits {
            if hit.score < self.score_threshold {
                continue;
            }
            match FaqRecord::from_payload(hit.payload) {
                Ok(record) => out.push(RetrievalResult {
                    record,
                    score: hit.score,
                }),
                Err(e) => {
                    warn!(point_id = hit.point_id, "skipping hit with unreadable payload: {e}")
                }
            }
        }
        out.truncate(self.limit);
        trace!("vector retrieval: {} results", out.len());
        out
    }
}

/// Scores the cached raw FAQ list by keyword overlap.
pub struct LexicalRetriever {
    source: Arc<dyn FaqSource>,
    cache: FaqCache,
    limit: usize,
}

impl LexicalRetriever {
    pub fn new(source: Arc<dyn FaqSource>, cfg: &RetrievalConfig) -> Self {
        Self {
            source,
            cache: FaqCache::new(cfg.cache_ttl),
            limit: cfg.limit,
        }
    }

    pub async fn retrieve(&self, query: &str) -> Vec<RetrievalResult> {
        let faqs = self.cache.get_or_fetch(self.source.as_ref()).await;
        lexical_search(&faqs, query.trim(), self.limit)
    }
}

/// Retrieval strategy chosen once from configuration.
pub enum Retriever {
    Vector(VectorRetriever),
    Lexical(LexicalRetriever),
}

impl Retriever {
    /// Ranked matches for `query`, best first. Never fails.
    pub async fn retrieve(&self, query: &str) -> Vec<RetrievalResult> {
        match self {
            Retriever::Vector(r) => r.retrieve(query).await,
            Retriever::Lexical(r) => r.retrieve(query).await,
        }
    }

    pub fn strategy(&self) -> &'static str {
        match self {
            Retriever::Vector(_) => "vector",
            Retriever::Lexical(_) => "lexical",
        }
    }
}
