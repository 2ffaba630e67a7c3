use std::process::ExitCode;
use std::sync::Arc;

use ai_embedding_service::{EmbeddingService, config_embedding_from_env, telemetry};
use anyhow::Context;
use faq_store::{FaqConfig, FaqStore};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer, filter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

const DEFAULT_LOG_FILTER: &str = "info,faq_store=info,ai_embedding_service=info";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; variables may come from the real environment.
    let dotenv = dotenvy::dotenv();

    if let Err(e) = init_tracing() {
        eprintln!("failed to initialise logging: {e:#}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = dotenv {
        if !e.not_found() {
            warn!("could not load .env: {e}");
        }
    }

    let command = std::env::args().nth(1);
    let result = match command.as_deref() {
        Some("sync") => run_sync().await,
        None | Some("serve") => serve().await,
        Some(other) => Err(anyhow::anyhow!(
            "unknown command '{other}' (expected `sync` or `serve`)"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("invalid log filter")?;

    // Embedding-service events go through its own layer only.
    let app_layer = fmt::layer()
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| {
            !telemetry::is_library_target(meta.target())
        }));

    tracing_subscriber::registry()
        .with(filter)
        .with(app_layer)
        .with(telemetry::layer())
        .try_init()
        .context("setting default subscriber failed")
}

fn build_store() -> anyhow::Result<Arc<FaqStore>> {
    let embedding_cfg = config_embedding_from_env().context("embedding configuration")?;
    let embedder = Arc::new(EmbeddingService::new(embedding_cfg).context("embedding service")?);
    let cfg = FaqConfig::from_env().context("FAQ store configuration")?;
    let store = FaqStore::from_config(&cfg, embedder).context("FAQ store")?;
    Ok(Arc::new(store))
}

async fn run_sync() -> anyhow::Result<()> {
    let store = build_store()?;
    let report = store.sync().await.context("FAQ sync failed")?;
    info!(
        synced = report.synced,
        updated = report.updated,
        errors = report.errors,
        "FAQ sync finished"
    );
    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    let store = build_store()?;

    if store.has_index() {
        let status = store.test_connection().await;
        if status.connected {
            info!(
                version = status.version.as_deref().unwrap_or("-"),
                collections = status.collections.unwrap_or(0),
                "vector index reachable"
            );
        } else {
            warn!(
                error = status.error.as_deref().unwrap_or("-"),
                "vector index unreachable; queries will return no context until it recovers"
            );
        }
    }

    api::start(store).await.context("API server")?;
    Ok(())
}
