use axum::{
    extract::State,
    response::{IntoResponse, Json},
};

use super::{ACK_STATUS, AppState};

/// GET /health — liveness plus the registered channel set
pub(super) async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let body = serde_json::json!({
        "status": "ok",
        "channels": state.dispatcher.channel_names(),
    });
    Json(body)
}

/// POST /alert — one confirmed event, fanned out to every channel.
///
/// Per-channel outcomes surface only through logs; the acknowledgement is
/// identical whether every delivery succeeded or every one failed.
pub(super) async fn handle_alert(State(state): State<AppState>) -> impl IntoResponse {
    tracing::warn!("alert received from detector — fire or smoke confirmed");

    let summary = state.dispatcher.dispatch().await;
    tracing::info!(
        delivered = summary.delivered(),
        failed = summary.failed(),
        "notification fan-out complete"
    );

    Json(serde_json::json!({ "status": ACK_STATUS }))
}
