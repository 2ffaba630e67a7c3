//! Adapter from the remote embedding service to [`EmbeddingsProvider`].

use ai_embedding_service::EmbeddingService;
use futures::future::BoxFuture;

use crate::{EmbeddingsProvider, FaqError};

impl EmbeddingsProvider for EmbeddingService {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, FaqError>> {
        Box::pin(async move { Ok(EmbeddingService::embed(self, text).await?) })
    }

    fn dimension(&self) -> usize {
        EmbeddingService::dimension(self)
    }

    fn is_configured(&self) -> bool {
        EmbeddingService::is_configured(self)
    }
}
