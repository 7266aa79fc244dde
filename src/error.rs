use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

use eink_quant::wire::WireError;
use eink_quant::{GridError, PaletteError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Invalid frame: {0}")]
    Frame(#[from] WireError),

    #[error("Invalid {name}: {value}")]
    InvalidFactor { name: &'static str, value: f32 },
}

/// Failures of the encode side. None of them leaves an artifact behind.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error("Source image not found: {0}")]
    SourceMissing(PathBuf),

    #[error("Cannot decode source image {path}: {reason}")]
    SourceCorrupt { path: PathBuf, reason: String },

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Encoding error: {0}")]
    Encode(#[from] WireError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PrepareError {
    /// Problems with the source image rather than with this program.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            PrepareError::SourceMissing(_) | PrepareError::SourceCorrupt { .. }
        )
    }
}

/// Failures while obtaining or streaming an artifact on the consumer side.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Frame could not be prepared: {0}")]
    Prepare(#[from] PrepareError),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return FetchError::Timeout;
        }
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Transport(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No frame prepared yet")]
    NoFrame,

    #[error("Not found")]
    NotFound,

    #[error("Preparation error: {0}")]
    Prepare(#[from] PrepareError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NoFrame => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Prepare(e) if e.is_input_error() => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ApiError::Prepare(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
