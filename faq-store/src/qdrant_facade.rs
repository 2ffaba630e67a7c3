//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! All Qdrant interactions live behind [`QdrantFacade`], which implements
//! [`VectorIndex`]. The rest of the crate never touches the client builders.

use std::collections::HashMap;

use futures::future::BoxFuture;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, DeletePointsBuilder, Distance, PointStruct, PointsIdsList,
    ScoredPoint, SearchPointsBuilder, UpsertPointsBuilder, Value as QValue, VectorParamsBuilder,
    point_id::PointIdOptions,
};
use qdrant_client::{Payload, Qdrant};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{QdrantConfig, VectorSpace};
use crate::errors::FaqError;
use crate::index::VectorIndex;
use crate::point_id::point_id_for;
use crate::record::{CollectionSummary, ConnectionStatus, SearchHit, VectorPoint};

/// Owns the Qdrant client and the target collection name.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    /// Dimension vectors are expected to have; mismatches are only logged here.
    expected_dim: usize,
}

impl QdrantFacade {
    /// Builds the client once from URL, optional API key and timeout.
    ///
    /// # Errors
    /// [`FaqError::Config`] on invalid config, [`FaqError::Qdrant`] if the
    /// client cannot be constructed.
    pub fn new(cfg: &QdrantConfig, expected_dim: usize) -> Result<Self, FaqError> {
        cfg.validate()?;

        let mut builder = Qdrant::from_url(&cfg.url).timeout(cfg.timeout);
        if let Some(key) = &cfg.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| FaqError::Qdrant(format!("client build: {e}")))?;

        debug!(url = %cfg.url, collection = %cfg.collection, "qdrant client ready");
        Ok(Self {
            client,
            collection: cfg.collection.clone(),
            expected_dim,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    async fn ensure(&self, space: &VectorSpace) -> Result<(), FaqError> {
        let existing = self
            .client
            .list_collections()
            .await
            .map_err(|e| FaqError::Qdrant(format!("list_collections: {e}")))?;

        if existing.collections.iter().any(|c| c.name == self.collection) {
            debug!("Collection '{}' already exists", self.collection);
            return Ok(());
        }

        info!(
            "Creating collection '{}' with size={} distance=Cosine",
            self.collection, space.size
        );
        self.client
            .create_collection(
                CreateCollectionBuilder::new(&self.collection)
                    .vectors_config(VectorParamsBuilder::new(space.size as u64, Distance::Cosine)),
            )
            .await
            .map_err(|e| FaqError::Qdrant(format!("create_collection: {e}")))?;

        info!("Collection '{}' created", self.collection);
        Ok(())
    }

    async fn upsert(&self, points: Vec<VectorPoint>) -> Result<usize, FaqError> {
        if points.is_empty() {
            debug!("No points provided for upsert");
            return Ok(0);
        }

        let mut batch: Vec<PointStruct> = Vec::with_capacity(points.len());
        for p in points {
            if p.id.trim().is_empty() {
                return Err(FaqError::Validation("point has an empty id".into()));
            }
            if p.vector.is_empty() {
                return Err(FaqError::Validation(format!("point '{}' has an empty vector", p.id)));
            }
            if p.vector.len() != self.expected_dim {
                warn!(
                    id = %p.id,
                    got = p.vector.len(),
                    want = self.expected_dim,
                    "vector length differs from collection dimension"
                );
            }

            let payload = Payload::try_from(p.payload)
                .map_err(|e| FaqError::Validation(format!("payload for '{}': {e}", p.id)))?;
            batch.push(PointStruct::new(point_id_for(&p.id), p.vector, payload));
        }

        let count = batch.len();
        info!("Upserting {} points into collection '{}'", count, self.collection);
        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, batch).wait(true))
            .await
            .map_err(|e| FaqError::Qdrant(format!("upsert_points: {e}")))?;

        Ok(count)
    }

    async fn search_hits(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> Result<Vec<SearchHit>, FaqError> {
        debug!(
            "Searching '{}' limit={} threshold={}",
            self.collection, limit, score_threshold
        );
        let res = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, vector, limit)
                    .with_payload(true)
                    .score_threshold(score_threshold),
            )
            .await
            .map_err(|e| FaqError::Qdrant(format!("search_points: {e}")))?;

        let hits: Vec<SearchHit> = res.result.into_iter().map(to_hit).collect();
        debug!("Search completed: {} hits", hits.len());
        Ok(hits)
    }

    async fn delete(&self, id: &str) -> Result<(), FaqError> {
        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(PointsIdsList {
                        ids: vec![point_id_for(id).into()],
                    })
                    .wait(true),
            )
            .await
            .map_err(|e| FaqError::Qdrant(format!("delete_points: {e}")))?;
        debug!("Deleted point '{id}' from '{}'", self.collection);
        Ok(())
    }

    async fn info(&self) -> Result<CollectionSummary, FaqError> {
        let resp = self
            .client
            .collection_info(&self.collection)
            .await
            .map_err(|e| FaqError::Qdrant(format!("collection_info: {e}")))?;
        let info = resp.result.ok_or_else(|| {
            FaqError::Qdrant(format!("collection '{}' returned no info", self.collection))
        })?;

        Ok(CollectionSummary {
            name: self.collection.clone(),
            status: info.status().as_str_name().to_string(),
            points_count: info.points_count,
            indexed_vectors_count: info.indexed_vectors_count,
        })
    }

    async fn probe(&self) -> ConnectionStatus {
        let version = match self.client.health_check().await {
            Ok(reply) => reply.version,
            Err(e) => {
                warn!("Qdrant health check failed: {e}");
                return ConnectionStatus::failed(e.to_string());
            }
        };
        match self.client.list_collections().await {
            Ok(list) => ConnectionStatus {
                connected: true,
                version: Some(version),
                collections: Some(list.collections.len()),
                error: None,
            },
            Err(e) => {
                warn!("Qdrant list_collections failed: {e}");
                ConnectionStatus::failed(e.to_string())
            }
        }
    }
}

impl VectorIndex for QdrantFacade {
    fn ensure_collection<'a>(
        &'a self,
        space: &'a VectorSpace,
    ) -> BoxFuture<'a, Result<(), FaqError>> {
        Box::pin(self.ensure(space))
    }

    fn upsert_points(&self, points: Vec<VectorPoint>) -> BoxFuture<'_, Result<usize, FaqError>> {
        Box::pin(self.upsert(points))
    }

    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
        score_threshold: f32,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, FaqError>> {
        Box::pin(self.search_hits(vector, limit, score_threshold))
    }

    fn delete_point<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<(), FaqError>> {
        Box::pin(self.delete(id))
    }

    fn collection_info(&self) -> BoxFuture<'_, Result<CollectionSummary, FaqError>> {
        Box::pin(self.info())
    }

    fn test_connection(&self) -> BoxFuture<'_, ConnectionStatus> {
        Box::pin(self.probe())
    }
}

fn to_hit(sp: ScoredPoint) -> SearchHit {
    let point_id = match sp.id.and_then(|p| p.point_id_options) {
        Some(PointIdOptions::Num(n)) => n,
        // Points written by this crate are always numeric.
        _ => 0,
    };
    SearchHit {
        point_id,
        score: sp.score,
        payload: payload_to_json(sp.payload),
    }
}

/// Converts a Qdrant payload map into a JSON object.
fn payload_to_json(payload: HashMap<String, QValue>) -> Value {
    Value::Object(
        payload
            .into_iter()
            .map(|(k, v)| (k, v.into_json()))
            .collect(),
    )
}
