pub mod auth;
pub mod config;
pub mod pages;
pub mod server;
pub mod status;

use axum::{
    routing::{get, post},
    Router,
};
use reforger_panel::config_store::ConfigStore;
use reforger_panel::locator;
use reforger_panel::settings::PanelSettings;
use reforger_panel::supervisor::{HostControl, LaunchSpec, Supervisor};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use sysinfo::System;
use tokio::sync::Mutex;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<PanelSettings>,
    pub store: ConfigStore,
    pub supervisor: Arc<Supervisor>,
    pub system: Arc<Mutex<System>>,
    pub sessions: Arc<Mutex<HashSet<String>>>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/health", get(pages::health))
        .route("/api/status", get(status::status))
        .route("/api/metrics", get(status::metrics))
        .route("/api/logs", get(status::logs))
        .route("/api/config", post(config::update_config))
        .route("/api/mods/add", post(config::add_mod))
        .route("/api/mods/remove", post(config::remove_mod))
        .route("/api/start", post(server::start))
        .route("/api/stop", post(server::stop))
        .route("/api/restart", post(server::restart))
        .nest_service("/static", ServeDir::new(static_dir()))
        .with_state(state)
}

pub fn default_state(settings: PanelSettings) -> AppState {
    let system = Arc::new(Mutex::new(System::new()));
    let control = Arc::new(HostControl::new(
        system.clone(),
        LaunchSpec {
            work_dir: settings.server_dir.clone(),
            config_path: settings.server_config.clone(),
            max_fps: settings.max_fps,
        },
    ));
    AppState {
        store: ConfigStore::new(&settings.server_config),
        supervisor: Arc::new(Supervisor::new(control)),
        system,
        sessions: Arc::new(Mutex::new(HashSet::new())),
        settings: Arc::new(settings),
    }
}

/// Fresh locator query; used by mutation routes to flag restart-required.
pub async fn server_running(state: &AppState) -> bool {
    let mut system = state.system.lock().await;
    locator::find_server_pid(&mut system, locator::SERVER_PROCESS_NAME).is_some()
}

fn static_dir() -> PathBuf {
    std::env::var("REFORGER_PANEL_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static"))
}
