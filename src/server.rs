//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::State,
    http::{header::CONNECTION, HeaderValue},
    response::{Json, Response},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, FormatInfo};
use crate::services::{ArtifactStore, PreparePipeline};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ArtifactStore>,
    pub format: Arc<FormatInfo>,
    pub pipeline: Arc<PreparePipeline>,
}

/// Create application state with an empty artifact store.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pipeline = PreparePipeline::from_config(config)?;
    let format = FormatInfo::from(pipeline.format());

    Ok(AppState {
        store: Arc::new(ArtifactStore::new()),
        format: Arc::new(format),
        pipeline: Arc::new(pipeline),
    })
}

/// Prepare `source` and make it the served frame.
pub async fn publish_source(state: &AppState, source: &Path) -> anyhow::Result<()> {
    let pipeline = state.pipeline.clone();
    let path = source.to_path_buf();
    let (frame, preview) = tokio::task::spawn_blocking(move || {
        let frame = pipeline.prepare_file(&path)?;
        let preview = pipeline.preview_png(&frame)?;
        Ok::<_, crate::error::PrepareError>((frame, preview))
    })
    .await??;

    state.store.store(&frame, preview).await;
    tracing::info!(
        source = %source.display(),
        bytes = frame.bytes.len(),
        "Frame published"
    );
    Ok(())
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Every response carries `Connection: close`: the display client opens a
/// fresh connection per refresh and never reuses one.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/image_data.dat", get(handle_artifact))
        .route("/preview.png", get(handle_preview))
        .route("/api/format", get(handle_format))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            CONNECTION,
            HeaderValue::from_static("close"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_artifact(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_artifact(State(state.store), State(state.format)).await
}

async fn handle_preview(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_preview(State(state.store)).await
}

async fn handle_format(State(state): State<AppState>) -> Json<FormatInfo> {
    api::handle_format(State(state.format)).await
}
