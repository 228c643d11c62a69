use crate::routes::{auth, server_running, AppState};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use reforger_panel::config_store::{ConfigError, ConfigPatch};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<ConfigPatch>,
) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    match state.store.apply_patch(&patch).await {
        Ok(()) => {
            info!("server config updated");
            applied(&state).await
        }
        Err(err) => rejected(err),
    }
}

#[derive(Deserialize)]
pub struct AddModRequest {
    #[serde(default, rename = "modId")]
    pub mod_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

pub async fn add_mod(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AddModRequest>,
) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    let version = (!request.version.trim().is_empty()).then_some(request.version.as_str());
    match state
        .store
        .add_mod(&request.mod_id, &request.name, version)
        .await
    {
        Ok(()) => {
            info!("mod {} added", request.mod_id.trim());
            applied(&state).await
        }
        Err(err) => rejected(err),
    }
}

#[derive(Deserialize)]
pub struct RemoveModRequest {
    #[serde(default, rename = "modId")]
    pub mod_id: String,
}

pub async fn remove_mod(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RemoveModRequest>,
) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    match state.store.remove_mod(&request.mod_id).await {
        Ok(()) => {
            info!("mod {} removed", request.mod_id.trim());
            applied(&state).await
        }
        Err(err) => rejected(err),
    }
}

/// Successful mutations also tell the operator whether the running server
/// still has the old config loaded.
async fn applied(state: &AppState) -> Response {
    Json(json!({"ok": true, "restart_required": server_running(state).await})).into_response()
}

fn rejected(err: ConfigError) -> Response {
    Json(json!({"ok": false, "error": err.to_string()})).into_response()
}
