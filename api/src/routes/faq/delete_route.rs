use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use serde_json::json;
use tracing::info;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

pub async fn delete_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    state.store.delete(&id).await?;
    info!(id = %id, "delete_route: point removed");
    Ok(ApiResponse::success(json!({ "deleted": id })).into_response_with_status(StatusCode::OK))
}
