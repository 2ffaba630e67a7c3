use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Response,
};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    routes::faq::{context_request::ContextRequest, context_response::ContextResponse},
};

/// Retrieval never fails here: errors degrade to `context: null`.
pub async fn context_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(p): Json<ContextRequest>,
) -> Response {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    debug!(request_id = %request_id, query = %p.query, "context_route: start");

    let context = state.store.get_context(&p.query).await;

    debug!(
        request_id = %request_id,
        found = context.is_some(),
        "context_route: done"
    );

    ApiResponse::success(ContextResponse {
        query: p.query,
        context,
    })
    .into_response_with_status(StatusCode::OK)
}
