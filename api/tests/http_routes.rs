//! HTTP surface over a store wired with in-process fakes.

use std::sync::Arc;

use faq_store::{
    CollectionSummary, ConnectionStatus, EmbeddingsProvider, FaqError, FaqSource, FaqStore,
    RetrievalConfig, SearchHit, VectorIndex, VectorPoint, VectorSpace,
};
use futures::future::BoxFuture;
use serde_json::{Value, json};

struct Feed;

impl FaqSource for Feed {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<Value>, FaqError>> {
        Box::pin(async {
            Ok(vec![
                json!({ "id": "1", "question": "What are your opening hours?", "answer": "9 to 5." }),
                json!({ "id": "2", "question": "How do refunds work?", "answer": "Within 30 days." }),
            ])
        })
    }
}

struct NoKey;

impl EmbeddingsProvider for NoKey {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, FaqError>> {
        Box::pin(async { Err(FaqError::Config("EMBEDDING_API_KEY missing".into())) })
    }

    fn dimension(&self) -> usize {
        3
    }

    fn is_configured(&self) -> bool {
        false
    }
}

struct DownIndex;

impl VectorIndex for DownIndex {
    fn ensure_collection<'a>(
        &'a self,
        _space: &'a VectorSpace,
    ) -> BoxFuture<'a, Result<(), FaqError>> {
        Box::pin(async { Err(FaqError::Qdrant("connection refused".into())) })
    }

    fn upsert_points(&self, _points: Vec<VectorPoint>) -> BoxFuture<'_, Result<usize, FaqError>> {
        Box::pin(async { Err(FaqError::Qdrant("connection refused".into())) })
    }

    fn search(
        &self,
        _vector: Vec<f32>,
        _limit: u64,
        _score_threshold: f32,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, FaqError>> {
        Box::pin(async { Err(FaqError::Qdrant("connection refused".into())) })
    }

    fn delete_point<'a>(&'a self, _id: &'a str) -> BoxFuture<'a, Result<(), FaqError>> {
        Box::pin(async { Err(FaqError::Qdrant("connection refused".into())) })
    }

    fn collection_info(&self) -> BoxFuture<'_, Result<CollectionSummary, FaqError>> {
        Box::pin(async { Err(FaqError::Qdrant("connection refused".into())) })
    }

    fn test_connection(&self) -> BoxFuture<'_, ConnectionStatus> {
        Box::pin(async { ConnectionStatus::failed("connection refused") })
    }
}

async fn serve(store: FaqStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, api::router(Arc::new(store))).await.unwrap();
    });
    format!("http://{addr}")
}

fn lexical_store() -> FaqStore {
    FaqStore::new(None, Arc::new(Feed), Arc::new(NoKey), RetrievalConfig::default())
}

fn broken_vector_store() -> FaqStore {
    FaqStore::new(
        Some(Arc::new(DownIndex)),
        Arc::new(Feed),
        Arc::new(NoKey),
        RetrievalConfig::default(),
    )
}

#[tokio::test]
async fn context_returns_formatted_matches() {
    let base = serve(lexical_store()).await;
    let body: Value = reqwest::Client::new()
        .post(format!("{base}/faq/context"))
        .json(&json!({ "query": "refunds" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["query"], "refunds");
    let ctx = body["data"]["context"].as_str().unwrap();
    assert!(ctx.starts_with("FAQ 1:\nQuestion: How do refunds work?"));
}

#[tokio::test]
async fn sync_failure_is_a_bad_gateway_envelope() {
    let base = serve(broken_vector_store()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/faq/sync"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn sync_without_index_is_rejected() {
    let base = serve(lexical_store()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/faq/sync"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 502);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "NOT_CONFIGURED");
}

#[tokio::test]
async fn health_reports_index_status() {
    let base = serve(broken_vector_store()).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["data"]["strategy"], "lexical");
    assert_eq!(body["data"]["index"]["connected"], false);

    let base = serve(lexical_store()).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["data"]["note"].is_string());
    assert!(body["data"].get("index").is_none());
}

#[tokio::test]
async fn malformed_body_gets_an_error_envelope() {
    let base = serve(lexical_store()).await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/faq/context"))
        .json(&json!({ "question": "wrong field" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 422);
    let header_id = resp.headers()["x-request-id"].to_str().unwrap().to_string();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["error"]["details"][0]["path"], "query");
    assert!(header_id.starts_with("req-"));
    assert_eq!(body["error"]["request_id"], header_id.as_str());
}
