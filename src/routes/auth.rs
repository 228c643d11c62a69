use crate::routes::AppState;
use crate::security;
use crate::views;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const SESSION_COOKIE: &str = "panel_session";

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn login_page() -> Html<String> {
    Html(views::render_login())
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    if request.password != state.settings.panel_password {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"ok": false, "error": "Invalid password"})),
        )
            .into_response();
    }

    let token = security::session_token();
    state.sessions.lock().await.insert(token.clone());
    info!("operator logged in");
    (
        [(
            header::SET_COOKIE,
            format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/; SameSite=Strict"),
        )],
        Json(json!({"ok": true})),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = session_cookie(&headers) {
        state.sessions.lock().await.remove(&token);
    }
    Json(json!({"ok": true}))
}

pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .map(str::to_string)
}

pub async fn session_valid(state: &AppState, headers: &HeaderMap) -> bool {
    match session_cookie(headers) {
        Some(token) => state.sessions.lock().await.contains(&token),
        None => false,
    }
}

/// Gate for the API routes; every call is rejected until a login succeeded.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(), Response> {
    if session_valid(state, headers).await {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "unauthorized"})),
        )
            .into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_is_extracted_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; panel_session=abc123; lang=en"),
        );
        assert_eq!(session_cookie(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn missing_cookie_yields_none() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }
}
