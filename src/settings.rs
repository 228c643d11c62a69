use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Panel-side settings, loaded from a `config.env` key=value file.
/// The server's own `config.json` is handled by the config store instead.
#[derive(Debug, Clone)]
pub struct PanelSettings {
    pub panel_password: String,
    pub panel_port: u16,
    pub server_dir: String,
    pub server_config: String,
    pub log_dir: String,
    pub max_fps: Option<u32>,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            panel_password: "changeme".to_string(),
            panel_port: 8888,
            server_dir: "/home/arma/server".to_string(),
            server_config: "/home/arma/server/config.json".to_string(),
            log_dir: "/home/arma/.config/ArmaReforger/logs".to_string(),
            max_fps: None,
        }
    }
}

impl PanelSettings {
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_env_text(&contents),
            Err(_) => {
                info!("no panel settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parses KEY=VALUE lines; blank lines and `#` comments are skipped,
    /// surrounding single or double quotes on values are stripped.
    pub fn from_env_text(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().trim_matches('"').trim_matches('\'');
                values.insert(key.trim().to_string(), value.to_string());
            }
        }

        let defaults = Self::default();
        Self {
            panel_password: values
                .get("PANEL_PASSWORD")
                .cloned()
                .unwrap_or(defaults.panel_password),
            panel_port: values
                .get("PANEL_PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.panel_port),
            server_dir: values
                .get("SERVER_DIR")
                .cloned()
                .unwrap_or(defaults.server_dir),
            server_config: values
                .get("SERVER_CONFIG")
                .cloned()
                .unwrap_or(defaults.server_config),
            log_dir: values.get("LOG_DIR").cloned().unwrap_or(defaults.log_dir),
            max_fps: values.get("MAX_FPS").and_then(|value| value.parse().ok()),
        }
    }
}

pub fn settings_path() -> PathBuf {
    std::env::var("REFORGER_PANEL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.env"))
}
