use reforger_panel::config_store::{ConfigError, ConfigPatch, ConfigStore};
use serde_json::{json, Value};
use std::path::Path;

const CONFLICT_EVERON: &str = "{ECC61978EDCC2B5A}Missions/23_Campaign.conf";

fn store_with(contents: &Value) -> (tempfile::TempDir, ConfigStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, serde_json::to_string_pretty(contents).expect("json")).expect("write");
    (dir, ConfigStore::new(path))
}

fn raw_text(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read backing file")
}

#[tokio::test]
async fn unknown_scenario_rejects_the_whole_patch() {
    let (_dir, store) = store_with(&json!({"game": {"name": "Alpha"}}));
    let before = raw_text(store.path());

    let patch = ConfigPatch {
        server_name: Some("Bravo".to_string()),
        scenario_id: Some("{DEADBEEF}Missions/Nope.conf".to_string()),
        ..ConfigPatch::default()
    };
    let result = store.apply_patch(&patch).await;

    assert_eq!(
        result,
        Err(ConfigError::Rejected("Unknown scenario".to_string()))
    );
    // nothing was written, including the otherwise valid name change
    assert_eq!(raw_text(store.path()), before);
    assert_eq!(store.read().await["game"]["name"], json!("Alpha"));
}

#[tokio::test]
async fn blank_only_patch_reports_no_changes_without_writing() {
    let (_dir, store) = store_with(&json!({"game": {"name": "Alpha"}}));
    let before = raw_text(store.path());

    let patch = ConfigPatch {
        server_name: Some("   ".to_string()),
        password_admin: Some(String::new()),
        ..ConfigPatch::default()
    };
    let result = store.apply_patch(&patch).await;

    assert_eq!(result, Err(ConfigError::Rejected("No changes".to_string())));
    assert_eq!(raw_text(store.path()), before);
}

#[tokio::test]
async fn patch_applies_fields_with_trim_rules() {
    let (_dir, store) = store_with(&json!({"game": {"password": "old"}}));

    let patch = ConfigPatch {
        server_name: Some("  My Server  ".to_string()),
        scenario_id: Some(CONFLICT_EVERON.to_string()),
        password: Some(String::new()),
        password_admin: Some(" admin ".to_string()),
    };
    store.apply_patch(&patch).await.expect("patch");

    let game = store.read().await["game"].clone();
    assert_eq!(game["name"], json!("My Server"));
    assert_eq!(game["scenarioId"], json!(CONFLICT_EVERON));
    // empty password is applied verbatim and clears the old one
    assert_eq!(game["password"], json!(""));
    assert_eq!(game["passwordAdmin"], json!("admin"));
}

#[tokio::test]
async fn add_then_remove_restores_the_surrounding_mod_list() {
    let (_dir, store) = store_with(&json!({"game": {"mods": [
        {"modId": "AAA", "name": "First"},
        {"modId": "BBB", "name": "Second", "version": "1.2"},
    ]}}));

    store
        .add_mod("CCC", "Third", Some("0.9"))
        .await
        .expect("add");
    let mods = store.read().await["game"]["mods"].clone();
    assert_eq!(mods.as_array().map(Vec::len), Some(3));
    assert_eq!(mods[2], json!({"modId": "CCC", "name": "Third", "version": "0.9"}));

    store.remove_mod("CCC").await.expect("remove");
    let mods = store.read().await["game"]["mods"].clone();
    assert_eq!(
        mods,
        json!([
            {"modId": "AAA", "name": "First"},
            {"modId": "BBB", "name": "Second", "version": "1.2"},
        ])
    );
}

#[tokio::test]
async fn blank_version_is_not_persisted() {
    let (_dir, store) = store_with(&json!({}));

    store.add_mod("AAA", "First", Some("  ")).await.expect("add");

    let entry = store.read().await["game"]["mods"][0].clone();
    assert_eq!(entry, json!({"modId": "AAA", "name": "First"}));
}

#[tokio::test]
async fn duplicate_and_missing_mod_ids_are_rejected_without_writes() {
    let (_dir, store) = store_with(&json!({"game": {"mods": [
        {"modId": "AAA", "name": "First"},
    ]}}));
    let before = raw_text(store.path());

    assert_eq!(
        store.add_mod("AAA", "Again", None).await,
        Err(ConfigError::Rejected(
            "Mod with this ID already exists".to_string()
        ))
    );
    assert_eq!(
        store.remove_mod("ZZZ").await,
        Err(ConfigError::Rejected("Mod not found".to_string()))
    );
    assert_eq!(
        store.add_mod("  ", "Name", None).await,
        Err(ConfigError::Rejected("modId and name are required".to_string()))
    );
    assert_eq!(raw_text(store.path()), before);
}

#[tokio::test]
async fn unreadable_document_degrades_to_an_empty_one() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{not json").expect("write");
    let store = ConfigStore::new(&path);

    assert_eq!(store.read().await, json!({}));

    // mutations still work by materializing the game object
    store.add_mod("AAA", "First", None).await.expect("add");
    assert_eq!(
        store.read().await["game"]["mods"][0]["modId"],
        json!("AAA")
    );

    let missing = ConfigStore::new(dir.path().join("absent.json"));
    assert_eq!(missing.read().await, json!({}));
}

#[tokio::test]
async fn writes_are_tab_indented_full_document_replaces() {
    let (_dir, store) = store_with(&json!({"publicPort": 2001, "game": {}}));

    let patch = ConfigPatch {
        server_name: Some("Tabs".to_string()),
        ..ConfigPatch::default()
    };
    store.apply_patch(&patch).await.expect("patch");

    let text = raw_text(store.path());
    assert!(text.contains("\t\"game\""));
    // untouched top-level fields survive the rewrite
    assert_eq!(store.read().await["publicPort"], json!(2001));
}

// Two stores on the same file behave like two concurrent operators: there is
// no lock and no concurrency token, so the last full-document write wins.
#[tokio::test]
async fn concurrent_writers_are_last_write_wins() {
    let (_dir, store_a) = store_with(&json!({"game": {"name": "Alpha"}}));
    let store_b = ConfigStore::new(store_a.path());

    // operator A reads a snapshot, operator B applies a password change
    let stale_snapshot = store_a.read().await;
    let patch = ConfigPatch {
        password: Some("secret".to_string()),
        ..ConfigPatch::default()
    };
    store_b.apply_patch(&patch).await.expect("patch");
    assert_eq!(store_a.read().await["game"]["password"], json!("secret"));

    // A's full-document write silently discards B's change
    store_a.write(&stale_snapshot).await.expect("write");
    assert_eq!(store_a.read().await["game"].get("password"), None);
}
