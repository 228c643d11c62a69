use crate::routes::{auth, AppState};
use crate::views;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if !auth::session_valid(&state, &headers).await {
        return Redirect::to("/login").into_response();
    }
    Html(views::render_dashboard()).into_response()
}

pub async fn health() -> &'static str {
    "ok"
}
