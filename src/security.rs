use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::Rng;
use rcgen::{CertificateParams, SanType};
use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

pub fn base_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("reforger-panel");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".config").join("reforger-panel");
    }
    PathBuf::from("panel-data")
}

pub fn cert_path() -> PathBuf {
    base_dir().join("certs").join("panel.crt.pem")
}

pub fn key_path() -> PathBuf {
    base_dir().join("certs").join("panel.key.pem")
}

/// Opaque bearer token for a logged-in operator session.
pub fn session_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

pub async fn ensure_tls_cert(cert_path: &Path, key_path: &Path) -> Result<(), String> {
    if tokio::fs::metadata(cert_path).await.is_ok() && tokio::fs::metadata(key_path).await.is_ok() {
        return Ok(());
    }

    if let Some(parent) = cert_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|err| format!("failed to create cert dir: {err}"))?;
    }

    let mut params = CertificateParams::new(vec!["localhost".to_string()]);
    params
        .subject_alt_names
        .push(SanType::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)));
    let cert = rcgen::Certificate::from_params(params)
        .map_err(|err| format!("failed to create cert: {err}"))?;

    let cert_pem = cert
        .serialize_pem()
        .map_err(|err| format!("failed to serialize cert: {err}"))?;
    let key_pem = cert.serialize_private_key_pem();

    tokio::fs::write(cert_path, cert_pem)
        .await
        .map_err(|err| format!("failed to write cert: {err}"))?;
    tokio::fs::write(key_path, key_pem)
        .await
        .map_err(|err| format!("failed to write key: {err}"))?;
    Ok(())
}
