use std::{env, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use faq_store::FaqStore;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    faq::{
        collection_route::collection_route, context_route::context_route,
        delete_route::delete_route, sync_route::sync_route,
    },
    health_route::health_route,
};

/// Default bind address when `API_ADDRESS` is unset.
pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:3003";

/// Builds the router over a shared store.
pub fn router(store: Arc<FaqStore>) -> Router {
    let state = Arc::new(AppState::new(store));

    Router::new()
        .route("/health", get(health_route))
        .route("/faq/context", post(context_route))
        .route("/faq/sync", post(sync_route))
        .route("/faq/collection", get(collection_route))
        .route("/faq/points/{id}", delete(delete_route))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Serves the API on `API_ADDRESS` until Ctrl+C.
pub async fn start(store: Arc<FaqStore>) -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| DEFAULT_API_ADDRESS.to_string());

    let listener = TcpListener::bind(&host_url).await.map_err(AppError::Bind)?;
    info!("API listening on {host_url}");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("API stopped");
    Ok(())
}

/// Resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
