use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::status::{Status, StatusRegistry};

#[derive(Debug, Serialize)]
pub struct StatusSnapshot {
    pub status: Status,
    pub ipv4_supported: bool,
    pub ipv6_supported: bool,
    pub round_pending: bool,
}

pub async fn get_status(State(registry): State<Arc<StatusRegistry>>) -> Response {
    match registry.get() {
        Ok(manager) => {
            let flags = manager.support_flags();
            let snapshot = StatusSnapshot {
                status: manager.status(),
                ipv4_supported: flags.ipv4_supported,
                ipv6_supported: flags.ipv6_supported,
                round_pending: manager.has_pending_round(),
            };
            Json(snapshot).into_response()
        }
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// 200 only while the host has outbound connectivity.
pub async fn get_healthz(State(registry): State<Arc<StatusRegistry>>) -> impl IntoResponse {
    match registry.get() {
        Ok(manager) => {
            let status = manager.status();
            let code = if status == Status::Ready {
                StatusCode::OK
            } else {
                StatusCode::SERVICE_UNAVAILABLE
            };
            (code, status.as_str().to_string())
        }
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()),
    }
}
