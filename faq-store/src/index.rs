//! Vector index abstraction used by the sync orchestrator and the retriever.

use futures::future::BoxFuture;

use crate::config::VectorSpace;
use crate::errors::FaqError;
use crate::record::{CollectionSummary, ConnectionStatus, SearchHit, VectorPoint};

/// Nearest-neighbor store holding one collection of FAQ vectors.
///
/// [`crate::qdrant_facade::QdrantFacade`] is the production implementation.
pub trait VectorIndex: Send + Sync {
    /// Creates the collection if it does not exist. An existing collection is
    /// left untouched, whatever its dimension.
    fn ensure_collection<'a>(
        &'a self,
        space: &'a VectorSpace,
    ) -> BoxFuture<'a, Result<(), FaqError>>;

    /// Writes points (insert or replace by id). Returns the number written.
    fn upsert_points(&self, points: Vec<VectorPoint>) -> BoxFuture<'_, Result<usize, FaqError>>;

    /// Up to `limit` hits with `score >= score_threshold`, best first.
    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, FaqError>>;

    /// Removes one point by its external id.
    fn delete_point<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), FaqError>>;

    fn collection_info(&self) -> BoxFuture<'_, Result<CollectionSummary, FaqError>>;

    /// Connectivity probe. Failures are reported in the status, never as errors.
    fn test_connection(&self) -> BoxFuture<'_, ConnectionStatus>;
}
