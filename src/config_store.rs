use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::missions;

/// One mod entry in the server's `game.mods` list. `mod_id` is the unique
/// key; `version` is only persisted when set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mod {
    #[serde(rename = "modId")]
    pub mod_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Partial update for the server config. Every field is independently
/// optional; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigPatch {
    pub server_name: Option<String>,
    pub scenario_id: Option<String>,
    pub password: Option<String>,
    pub password_admin: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid mutation input; nothing was written.
    Rejected(String),
    /// The document could not be serialized or written.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Rejected(message) | ConfigError::Io(message) => f.write_str(message),
        }
    }
}

/// File-backed access to the server's `config.json`.
///
/// The document is shared with the server process itself, which reads it on
/// its own startup, so nothing is cached here: every operation round-trips
/// through the file and every write replaces the whole document. Concurrent
/// writers are last-write-wins; the panel targets a single operator.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the backing document. Any read or parse failure degrades to an
    /// empty object so callers can navigate the config unconditionally.
    pub async fn read(&self) -> Value {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("failed to parse server config: {err}");
                Value::Object(Map::new())
            }),
            Err(err) => {
                warn!("failed to read server config: {err}");
                Value::Object(Map::new())
            }
        }
    }

    /// Replaces the backing file with the given document, tab-indented so the
    /// file stays hand-editable.
    pub async fn write(&self, config: &Value) -> Result<(), ConfigError> {
        let data = to_tab_indented_json(config)
            .map_err(|err| ConfigError::Io(format!("failed to serialize server config: {err}")))?;
        tokio::fs::write(&self.path, data)
            .await
            .map_err(|err| ConfigError::Io(format!("failed to write server config: {err}")))
    }

    /// Applies the non-empty fields of the patch and writes the result.
    ///
    /// A scenario id, when present at all, must be in the mission catalog;
    /// otherwise the whole patch is rejected before anything is written.
    /// Blank `server_name`/`password_admin` values are skipped rather than
    /// applied, and a patch where nothing applied is reported as a rejection
    /// with no write.
    pub async fn apply_patch(&self, patch: &ConfigPatch) -> Result<(), ConfigError> {
        let mut config = self.read().await;
        let mut changed = false;

        if let Some(name) = patch.server_name.as_deref() {
            let name = name.trim();
            if !name.is_empty() {
                set_game_field(&mut config, "name", Value::String(name.to_string()));
                changed = true;
            }
        }

        if let Some(scenario) = patch.scenario_id.as_deref() {
            let scenario = scenario.trim();
            if !missions::is_known(scenario) {
                return Err(ConfigError::Rejected("Unknown scenario".to_string()));
            }
            set_game_field(
                &mut config,
                "scenarioId",
                Value::String(scenario.to_string()),
            );
            changed = true;
        }

        if let Some(password) = patch.password.as_deref() {
            // applied verbatim; empty clears the password
            set_game_field(&mut config, "password", Value::String(password.to_string()));
            changed = true;
        }

        if let Some(admin) = patch.password_admin.as_deref() {
            let admin = admin.trim();
            if !admin.is_empty() {
                set_game_field(
                    &mut config,
                    "passwordAdmin",
                    Value::String(admin.to_string()),
                );
                changed = true;
            }
        }

        if !changed {
            return Err(ConfigError::Rejected("No changes".to_string()));
        }
        self.write(&config).await
    }

    /// Appends a mod to `game.mods`, keeping existing entries and order.
    pub async fn add_mod(
        &self,
        mod_id: &str,
        name: &str,
        version: Option<&str>,
    ) -> Result<(), ConfigError> {
        let mod_id = mod_id.trim();
        let name = name.trim();
        if mod_id.is_empty() || name.is_empty() {
            return Err(ConfigError::Rejected(
                "modId and name are required".to_string(),
            ));
        }
        let version = version
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let mut config = self.read().await;
        let mut mods = mod_list(&config);
        if mods.iter().any(|entry| entry_mod_id(entry) == Some(mod_id)) {
            return Err(ConfigError::Rejected(
                "Mod with this ID already exists".to_string(),
            ));
        }

        let entry = serde_json::to_value(Mod {
            mod_id: mod_id.to_string(),
            name: name.to_string(),
            version,
        })
        .map_err(|err| ConfigError::Io(format!("failed to serialize mod entry: {err}")))?;
        mods.push(entry);

        set_game_field(&mut config, "mods", Value::Array(mods));
        self.write(&config).await
    }

    /// Removes the mod with the given id (exact match) from `game.mods`.
    pub async fn remove_mod(&self, mod_id: &str) -> Result<(), ConfigError> {
        let mod_id = mod_id.trim();
        if mod_id.is_empty() {
            return Err(ConfigError::Rejected("Missing modId".to_string()));
        }

        let mut config = self.read().await;
        let mods = mod_list(&config);
        let remaining: Vec<Value> = mods
            .iter()
            .filter(|entry| entry_mod_id(entry) != Some(mod_id))
            .cloned()
            .collect();
        if remaining.len() == mods.len() {
            return Err(ConfigError::Rejected("Mod not found".to_string()));
        }

        set_game_field(&mut config, "mods", Value::Array(remaining));
        self.write(&config).await
    }
}

fn mod_list(config: &Value) -> Vec<Value> {
    config
        .get("game")
        .and_then(|game| game.get("mods"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn entry_mod_id(entry: &Value) -> Option<&str> {
    entry.get("modId").and_then(Value::as_str)
}

/// Sets `game.<key>`, materializing the `game` object (and the root object)
/// if the document read back empty or malformed.
fn set_game_field(config: &mut Value, key: &str, value: Value) {
    if !config.is_object() {
        *config = Value::Object(Map::new());
    }
    if let Some(root) = config.as_object_mut() {
        let game = root
            .entry("game")
            .or_insert_with(|| Value::Object(Map::new()));
        if !game.is_object() {
            *game = Value::Object(Map::new());
        }
        if let Some(game) = game.as_object_mut() {
            game.insert(key.to_string(), value);
        }
    }
}

fn to_tab_indented_json(config: &Value) -> Result<String, serde_json::Error> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    config.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_game_field_materializes_missing_objects() {
        let mut config = Value::Null;
        set_game_field(&mut config, "name", json!("Panel Test"));
        assert_eq!(config["game"]["name"], json!("Panel Test"));
    }

    #[test]
    fn set_game_field_keeps_unrelated_fields() {
        let mut config = json!({"publicPort": 2001, "game": {"name": "old"}});
        set_game_field(&mut config, "name", json!("new"));
        assert_eq!(config["publicPort"], json!(2001));
        assert_eq!(config["game"]["name"], json!("new"));
    }

    #[test]
    fn serializes_with_tab_indentation() {
        let text = to_tab_indented_json(&json!({"game": {"name": "x"}})).expect("serialize");
        assert!(text.contains("\t\"game\""));
        assert!(text.contains("\t\t\"name\""));
    }

    #[test]
    fn mod_list_of_empty_config_is_empty() {
        assert!(mod_list(&json!({})).is_empty());
        assert!(mod_list(&json!({"game": {}})).is_empty());
    }
}
