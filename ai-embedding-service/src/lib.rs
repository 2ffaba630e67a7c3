//! Embedding provider adapter.
//!
//! Turns text into fixed-dimension vectors using a remote embedding model.
//! Two providers are supported (Gemini and any OpenAI-compatible endpoint);
//! both are driven by a single [`config::embedding_model_config::EmbeddingModelConfig`].
//!
//! Construct one [`embedding_service::EmbeddingService`], wrap it in `Arc`,
//! and share it between the sync pipeline and the query path.

pub mod config;
pub mod embedding_service;
pub mod error_handler;
pub mod services;
pub mod telemetry;

pub use config::default_config::config_embedding_from_env;
pub use config::embedding_model_config::EmbeddingModelConfig;
pub use config::embedding_provider::EmbeddingProvider;
pub use embedding_service::EmbeddingService;
pub use error_handler::{AiEmbeddingError, Result};
