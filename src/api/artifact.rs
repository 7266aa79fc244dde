use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{FormatInfo, FRAME_FORMAT_HEADER};
use crate::services::ArtifactStore;

/// Serve the raw wire artifact
///
/// One byte per pixel, row-major, no header. The `X-Frame-Format` header
/// carries the format fingerprint so clients can detect a mismatched
/// palette or resolution before drawing.
pub async fn handle_artifact(
    State(store): State<Arc<ArtifactStore>>,
    State(format): State<Arc<FormatInfo>>,
) -> Result<Response, ApiError> {
    let artifact = store.get().await.ok_or(ApiError::NoFrame)?;

    tracing::info!(size_bytes = artifact.bytes.len(), "Serving frame artifact");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (header::CONTENT_LENGTH, &artifact.bytes.len().to_string()),
            (
                header::HeaderName::from_static(FRAME_FORMAT_HEADER),
                format.fingerprint.as_str(),
            ),
        ],
        Bytes::from(artifact.bytes.as_ref().clone()),
    )
        .into_response())
}

/// Serve the indexed PNG preview of the current frame
pub async fn handle_preview(State(store): State<Arc<ArtifactStore>>) -> Result<Response, ApiError> {
    let artifact = store.get().await.ok_or(ApiError::NoFrame)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &artifact.preview_png.len().to_string()),
        ],
        Bytes::from(artifact.preview_png.as_ref().clone()),
    )
        .into_response())
}
