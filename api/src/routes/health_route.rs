use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use faq_store::ConnectionStatus;
use serde::Serialize;

use crate::core::{app_state::AppState, http::response_envelope::ApiResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Active retrieval strategy: `vector` or `lexical`.
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<ConnectionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

pub async fn health_route(State(state): State<Arc<AppState>>) -> Response {
    let store = &state.store;
    let body = if store.has_index() {
        HealthResponse {
            strategy: store.strategy(),
            index: Some(store.test_connection().await),
            note: None,
        }
    } else {
        HealthResponse {
            strategy: store.strategy(),
            index: None,
            note: Some("no vector index configured; serving keyword matches from the FAQ source"),
        }
    };
    ApiResponse::success(body).into_response_with_status(StatusCode::OK)
}
