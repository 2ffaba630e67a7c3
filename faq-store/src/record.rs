//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical FAQ record produced by the record builder.
///
/// `combined_text` is only used to generate the embedding and is never
/// stored in the payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqRecord {
    pub id: String,
    pub question_primary: String,
    pub question_secondary: String,
    pub answer_primary: String,
    pub answer_secondary: String,
    pub category: String,
    #[serde(skip)]
    pub combined_text: String,
}

impl FaqRecord {
    /// Question to show: primary language first, secondary as a fallback.
    pub fn question(&self) -> &str {
        if self.question_primary.is_empty() {
            &self.question_secondary
        } else {
            &self.question_primary
        }
    }

    /// Answer to show: primary language first, secondary as a fallback.
    pub fn answer(&self) -> &str {
        if self.answer_primary.is_empty() {
            &self.answer_secondary
        } else {
            &self.answer_primary
        }
    }

    /// JSON payload stored next to the vector.
    pub fn to_payload(&self) -> Value {
        // Plain string fields only: serialization cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Rebuilds the record from a stored payload; missing fields become empty.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(payload)
    }
}

/// One point handed to the vector index.
#[derive(Clone, Debug)]
pub struct VectorPoint {
    /// External identifier; mapped to a numeric point id by the index adapter.
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Value,
}

/// Raw similarity hit returned by the vector index.
#[derive(Clone, Debug)]
pub struct SearchHit {
    pub point_id: u64,
    pub score: f32,
    pub payload: Value,
}

/// A ranked FAQ match.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RetrievalResult {
    #[serde(flatten)]
    pub record: FaqRecord,
    /// Similarity in `[0, 1]`.
    pub score: f32,
}

/// Outcome of a full resync.
///
/// Full-resync semantics: every record is written as a fresh upsert and a run
/// either succeeds entirely or fails, so `updated` and `errors` are always 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub synced: usize,
    pub updated: usize,
    pub errors: usize,
}

impl SyncReport {
    pub fn synced(count: usize) -> Self {
        Self {
            synced: count,
            ..Self::default()
        }
    }
}

/// Collection introspection snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct CollectionSummary {
    pub name: String,
    pub status: String,
    pub points_count: Option<u64>,
    pub indexed_vectors_count: Option<u64>,
}

/// Result of a connectivity probe; never an error.
#[derive(Clone, Debug, Serialize)]
pub struct ConnectionStatus {
    pub connected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            connected: false,
            version: None,
            collections: None,
            error: Some(error.into()),
        }
    }
}
