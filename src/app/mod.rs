// Application layer: wires config, store, generator and storage together.

use crate::adapters::{ChatClient, LocalStorage};
use crate::api;
use crate::config::AppConfig;
use crate::core::pipeline::NotePipeline;
use crate::core::store::NoteRepository;
use crate::utils::error::{NoteError, Result};
use std::sync::Arc;

pub type DefaultPipeline = NotePipeline<LocalStorage, ChatClient>;

pub fn build_pipeline(config: &AppConfig) -> Result<DefaultPipeline> {
    let api_key = config
        .resolve_api_key()
        .ok_or_else(|| NoteError::MissingConfigError {
            field: "llm.api_key".to_string(),
        })?;

    let repository = Arc::new(NoteRepository::load(&config.store.data_path)?);
    let generator = Arc::new(ChatClient::new(
        &config.llm.base_url,
        &api_key,
        config.request_timeout(),
    )?);
    let storage = LocalStorage::new(&config.output.directory);

    Ok(NotePipeline::new(
        repository,
        storage,
        generator,
        config.decoding_params(),
    ))
}

pub async fn serve(config: &AppConfig, pipeline: Arc<DefaultPipeline>) -> Result<()> {
    let addr = config.bind_addr()?;
    let app = api::router(pipeline);

    tracing::info!("🚀 Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
