mod routes;
mod security;
mod views;

use reforger_panel::settings::{settings_path, PanelSettings};
use tracing::info;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let settings = PanelSettings::load(&settings_path());
    let port = settings.panel_port;
    let state = routes::default_state(settings);
    let app = routes::build_router(state);

    let cert_path = security::cert_path();
    let key_path = security::key_path();
    security::ensure_tls_cert(&cert_path, &key_path)
        .await
        .expect("failed to prepare TLS certificates");
    let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .expect("failed to load TLS certificates");

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("panel listening on https://0.0.0.0:{port}");
    axum_server::bind_rustls(addr, tls_config)
        .serve(app.into_make_service())
        .await
        .expect("server failed");
}
