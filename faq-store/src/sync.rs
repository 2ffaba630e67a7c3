//! Full resync of the vector index from the FAQ source.
//!
//! Stages: ensure collection, fetch, build records, embed, map to points,
//! upsert. Any stage failure aborts the run.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::VectorSpace;
use crate::embed::EmbeddingsProvider;
use crate::embed_pool::embed_batch;
use crate::errors::FaqError;
use crate::index::VectorIndex;
use crate::record::{FaqRecord, SyncReport, VectorPoint};
use crate::record_builder::build_records;
use crate::source::FaqSource;

pub struct SyncOrchestrator {
    index: Arc<dyn VectorIndex>,
    source: Arc<dyn FaqSource>,
    embedder: Arc<dyn EmbeddingsProvider>,
}

impl SyncOrchestrator {
    pub fn new(
        index: Arc<dyn VectorIndex>,
        source: Arc<dyn FaqSource>,
        embedder: Arc<dyn EmbeddingsProvider>,
    ) -> Self {
        Self {
            index,
            source,
            embedder,
        }
    }

    /// Runs one full sync.
    ///
    /// # Errors
    /// The first failing stage's error; nothing is retried.
    #[instrument(skip_all)]
    pub async fn run(&self) -> Result<SyncReport, FaqError> {
        let dim = self.embedder.dimension();
        self.index.ensure_collection(&VectorSpace { size: dim }).await?;

        let raw = self.source.fetch_all().await?;
        if raw.is_empty() {
            info!("FAQ source is empty, nothing to sync");
            return Ok(SyncReport::synced(0));
        }

        let records = build_records(&raw)?;
        info!("Built {} FAQ records", records.len());

        let texts: Vec<String> = records.iter().map(|r| r.combined_text.clone()).collect();
        let vectors = embed_batch(&texts, self.embedder.as_ref()).await?;

        let points = to_points(&records, vectors, dim)?;
        let written = self.index.upsert_points(points).await?;

        info!(synced = written, "FAQ sync complete");
        Ok(SyncReport::synced(written))
    }
}

/// Pairs records with their vectors, checking count and dimension.
fn to_points(
    records: &[FaqRecord],
    vectors: Vec<Vec<f32>>,
    dim: usize,
) -> Result<Vec<VectorPoint>, FaqError> {
    if records.len() != vectors.len() {
        return Err(FaqError::Consistency {
            records: records.len(),
            vectors: vectors.len(),
        });
    }
    records
        .iter()
        .zip(vectors)
        .map(|(r, vector)| {
            if vector.len() != dim {
                return Err(FaqError::VectorSizeMismatch {
                    got: vector.len(),
                    want: dim,
                });
            }
            Ok(VectorPoint {
                id: r.id.clone(),
                vector,
                payload: r.to_payload(),
            })
        })
        .collect()
}
