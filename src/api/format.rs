use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::models::FormatInfo;

/// Describe the frame format shared by producer and consumer
pub async fn handle_format(State(format): State<Arc<FormatInfo>>) -> Json<FormatInfo> {
    Json(format.as_ref().clone())
}
