use futures::future::BoxFuture;

use crate::errors::FaqError;

/// Asynchronous embedding provider.
///
/// Implement this trait to plug in an embedding backend. The production
/// implementation wraps [`ai_embedding_service::EmbeddingService`].
pub trait EmbeddingsProvider: Send + Sync {
    /// Produces an embedding vector for the given text.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, FaqError>>;

    /// Length of every vector this provider produces.
    fn dimension(&self) -> usize;

    /// `false` when the provider lacks a credential and every call would fail.
    fn is_configured(&self) -> bool {
        true
    }
}

mod remote;
