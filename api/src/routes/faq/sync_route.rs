use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::{AppError, AppResult},
};

pub async fn sync_route(State(state): State<Arc<AppState>>) -> AppResult<Response> {
    info!("sync_route: full resync requested");

    let report = state.store.sync().await.map_err(|e| {
        error!(error = %e, "sync_route: sync failed");
        AppError::from(e)
    })?;

    info!(
        synced = report.synced,
        updated = report.updated,
        errors = report.errors,
        "sync_route: done"
    );
    Ok(ApiResponse::success(report).into_response_with_status(StatusCode::OK))
}
