use crate::routes::{auth, AppState};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use reforger_panel::{locator, logs, metrics, missions};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

pub async fn status(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    let (pid, sample) = {
        let mut system = state.system.lock().await;
        let pid = locator::find_server_pid(&mut system, locator::SERVER_PROCESS_NAME);
        let sample = metrics::sample(&mut system, pid);
        (pid, sample)
    };
    let config = state.store.read().await;
    let game = config.get("game").cloned().unwrap_or_else(|| json!({}));
    let scenario_id = game
        .get("scenarioId")
        .and_then(Value::as_str)
        .unwrap_or("");

    Json(json!({
        "running": pid.is_some(),
        "pid": pid,
        "map": missions::map_name(scenario_id),
        "players": 0,
        "uptime": if pid.is_some() {
            metrics::format_uptime(sample.uptime_sec)
        } else {
            "—".to_string()
        },
        "uptime_sec": sample.uptime_sec,
        "server_name": game.get("name").and_then(Value::as_str).unwrap_or("—"),
        "ip": config.get("publicAddress").cloned().unwrap_or(json!("—")),
        "port": config.get("publicPort").cloned().unwrap_or(json!("—")),
        "scenario_id": scenario_id,
        "missions": missions::CATALOG,
        "password": game.get("password").and_then(Value::as_str).unwrap_or(""),
        "password_admin": game.get("passwordAdmin").and_then(Value::as_str).unwrap_or(""),
        "cpu": sample.cpu,
        "ram_process": sample.ram_process,
        "ram_used": sample.ram_used,
        "ram_total": sample.ram_total,
        "mods": game.get("mods").cloned().unwrap_or(json!([])),
    }))
    .into_response()
}

pub async fn metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    let (pid, sample) = {
        let mut system = state.system.lock().await;
        let pid = locator::find_server_pid(&mut system, locator::SERVER_PROCESS_NAME);
        let sample = metrics::sample(&mut system, pid);
        (pid, sample)
    };

    Json(json!({
        "cpu": sample.cpu,
        "ram_process": sample.ram_process,
        "ram_used": sample.ram_used,
        "ram_total": sample.ram_total,
        "running": pid.is_some(),
        "ts": time::OffsetDateTime::now_utc().unix_timestamp(),
    }))
    .into_response()
}

#[derive(Deserialize)]
pub struct LogsQuery {
    pub lines: Option<usize>,
}

pub async fn logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LogsQuery>,
) -> Response {
    if let Err(response) = auth::require_session(&state, &headers).await {
        return response;
    }

    let limit = query.lines.unwrap_or(100);
    let Some(path) = logs::latest_console_log(Path::new(&state.settings.log_dir)).await else {
        return Json(json!({"lines": [], "path": Value::Null})).into_response();
    };

    let display_path = path.display().to_string();
    match logs::read_log_tail(path, limit).await {
        Ok(lines) => Json(json!({"lines": lines, "path": display_path})).into_response(),
        Err(err) => Json(json!({"lines": [], "error": err})).into_response(),
    }
}
