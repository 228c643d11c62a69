use crate::routes::{auth, AppState};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use reforger_panel::supervisor::SupervisorError;
use serde_json::json;

pub async fn start(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }
    respond(state.supervisor.start().await)
}

pub async fn stop(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }
    respond(state.supervisor.stop().await)
}

pub async fn restart(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }
    respond(state.supervisor.restart().await)
}

fn respond(result: Result<(), SupervisorError>) -> Response {
    match result {
        Ok(()) => Json(json!({"ok": true})).into_response(),
        Err(err) => Json(json!({"ok": false, "error": err.to_string()})).into_response(),
    }
}
