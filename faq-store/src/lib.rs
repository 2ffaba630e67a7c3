//! FAQ retrieval store: full resync into Qdrant and query-time retrieval.
//!
//! This crate provides:
//! - a sync pipeline turning the source FAQ list into vectors in one collection,
//! - retrieval of ranked FAQ matches for a user query (vector or keyword),
//! - formatting of those matches into a bounded context string.
//!
//! [`FaqStore`] wires the pieces together and is the entry point for
//! application code.

mod cache;
mod config;
mod embed;
mod embed_pool;
mod errors;
mod formatter;
mod index;
mod lexical;
mod point_id;
mod qdrant_facade;
mod record;
mod record_builder;
mod retrieve;
mod source;
mod sync;

pub use cache::FaqCache;
pub use config::{FaqConfig, QdrantConfig, RetrievalConfig, SourceConfig, VectorSpace};
pub use embed::EmbeddingsProvider;
pub use embed_pool::{EMBED_BATCH_SIZE, INTER_BATCH_DELAY, embed_batch};
pub use errors::{ErrorKind, FaqError};
pub use formatter::format_context;
pub use index::VectorIndex;
pub use lexical::lexical_search;
pub use point_id::point_id_for;
pub use qdrant_facade::QdrantFacade;
pub use record::{
    CollectionSummary, ConnectionStatus, FaqRecord, RetrievalResult, SearchHit, SyncReport,
    VectorPoint,
};
pub use record_builder::{FaqFields, build_record, build_records, combine_text, extract_id};
pub use retrieve::{LexicalRetriever, Retriever, VectorRetriever};
pub use source::{FaqSource, HttpFaqSource, faq_list_from_body};
pub use sync::SyncOrchestrator;

use std::sync::Arc;

use ai_embedding_service::EmbeddingService;
use tracing::{debug, info, trace};

/// High-level facade over sync and retrieval.
pub struct FaqStore {
    index: Option<Arc<dyn VectorIndex>>,
    source: Arc<dyn FaqSource>,
    embedder: Arc<dyn EmbeddingsProvider>,
    retriever: Retriever,
    context_max_chars: usize,
}

impl FaqStore {
    /// Builds the HTTP source and, when Qdrant is configured, the index.
    ///
    /// The collection dimension comes from the embedding service.
    ///
    /// # Errors
    /// [`FaqError::Config`] or [`FaqError::Qdrant`] if a client cannot be built.
    pub fn from_config(cfg: &FaqConfig, embedder: Arc<EmbeddingService>) -> Result<Self, FaqError> {
        let source: Arc<dyn FaqSource> = Arc::new(HttpFaqSource::new(&cfg.source)?);
        let index: Option<Arc<dyn VectorIndex>> = match &cfg.qdrant {
            Some(q) => Some(Arc::new(QdrantFacade::new(q, embedder.dimension())?)),
            None => None,
        };
        Ok(Self::new(index, source, embedder, cfg.retrieval.clone()))
    }

    /// Assembles a store from injected parts.
    ///
    /// Vector retrieval is used when an index is present and the embedder has
    /// a credential; keyword retrieval otherwise.
    pub fn new(
        index: Option<Arc<dyn VectorIndex>>,
        source: Arc<dyn FaqSource>,
        embedder: Arc<dyn EmbeddingsProvider>,
        retrieval: RetrievalConfig,
    ) -> Self {
        let retriever = match &index {
            Some(idx) if embedder.is_configured() => Retriever::Vector(VectorRetriever::new(
                Arc::clone(idx),
                Arc::clone(&embedder),
                &retrieval,
            )),
            _ => Retriever::Lexical(LexicalRetriever::new(Arc::clone(&source), &retrieval)),
        };
        info!(strategy = retriever.strategy(), "FAQ store ready");

        Self {
            index,
            source,
            embedder,
            retriever,
            context_max_chars: retrieval.context_max_chars,
        }
    }

    /// Name of the active retrieval strategy (`"vector"` or `"lexical"`).
    pub fn strategy(&self) -> &'static str {
        self.retriever.strategy()
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Ranked FAQ matches for `query`. Never fails; errors are logged.
    pub async fn retrieve(&self, query: &str) -> Vec<RetrievalResult> {
        trace!("FaqStore::retrieve strategy={}", self.strategy());
        self.retriever.retrieve(query).await
    }

    /// Formatted context for `query`, or `None` when nothing relevant was found.
    pub async fn get_context(&self, query: &str) -> Option<String> {
        let results = self.retrieve(query).await;
        let records: Vec<FaqRecord> = results.into_iter().map(|r| r.record).collect();
        let context = format_context(&records, self.context_max_chars);
        debug!(matches = records.len(), chars = context.chars().count(), "FAQ context built");
        (!context.is_empty()).then_some(context)
    }

    /// Runs one full resync of the vector index.
    ///
    /// # Errors
    /// [`FaqError::Config`] without a vector index, otherwise the first
    /// failing stage's error.
    pub async fn sync(&self) -> Result<SyncReport, FaqError> {
        let index = self.require_index()?;
        SyncOrchestrator::new(index, Arc::clone(&self.source), Arc::clone(&self.embedder))
            .run()
            .await
    }

    /// Probes the vector index. Without one, reports not connected.
    pub async fn test_connection(&self) -> ConnectionStatus {
        match &self.index {
            Some(idx) => idx.test_connection().await,
            None => ConnectionStatus::failed("vector index is not configured"),
        }
    }

    /// # Errors
    /// [`FaqError::Config`] without a vector index, [`FaqError::Qdrant`] on failure.
    pub async fn collection_info(&self) -> Result<CollectionSummary, FaqError> {
        self.require_index()?.collection_info().await
    }

    /// Removes one FAQ from the index by its external id.
    ///
    /// # Errors
    /// [`FaqError::Config`] without a vector index, [`FaqError::Qdrant`] on failure.
    pub async fn delete(&self, id: &str) -> Result<(), FaqError> {
        self.require_index()?.delete_point(id).await
    }

    fn require_index(&self) -> Result<Arc<dyn VectorIndex>, FaqError> {
        self.index
            .clone()
            .ok_or_else(|| {
                FaqError::Config("QDRANT_URL is not set; vector index unavailable".into())
            })
    }
}
