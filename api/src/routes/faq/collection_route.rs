use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppResult,
};

pub async fn collection_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    let info = state.store.collection_info().await?;
    Ok(ApiResponse::success(info).into_response_with_status(StatusCode::OK))
}
