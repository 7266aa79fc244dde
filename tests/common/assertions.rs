//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use eink_quant::render::{MemorySurface, RenderReport};

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(response.header("content-type"), Some("image/png"));
}

/// Assert JSON error body carries the HTTP status
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert every response disables keep-alive
pub fn assert_connection_close(response: &TestResponse) {
    assert_eq!(
        response.header("connection"),
        Some("close"),
        "Expected Connection: close"
    );
}

/// Assert the surface was cleared and committed exactly once per cycle
pub fn assert_cycles(surface: &MemorySurface, cycles: usize) {
    assert_eq!(surface.clears(), cycles, "clear count");
    assert_eq!(surface.commits(), cycles, "commit count");
}

/// Assert a report describes a complete frame with no anomalies
pub fn assert_clean_report(report: &RenderReport) {
    assert!(report.is_complete(), "incomplete frame: {report:?}");
    assert_eq!(report.invalid_indices, 0, "invalid indices: {report:?}");
    assert_eq!(report.ignored_bytes, 0, "ignored bytes: {report:?}");
}
