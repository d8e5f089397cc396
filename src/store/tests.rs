use super::custom_tiles::decode_user_tiles;
use super::*;
use crate::board::TileAction;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    env::temp_dir().join(format!("vocaboard-store-{tag}-{}-{nanos}", std::process::id()))
}

/// Store whose writes always fail, to exercise the commit-after-write path.
struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        bail!("disk full")
    }
}

#[test]
fn file_store_round_trips_and_creates_directory() {
    let dir = temp_dir("roundtrip").join("nested");
    let mut store = FileStore::new(&dir);
    assert_eq!(store.get("greeting").expect("get"), None);
    store.set("greeting", "[1,2]").expect("set");
    assert_eq!(store.get("greeting").expect("get").as_deref(), Some("[1,2]"));
    assert!(dir.join("greeting.json").is_file());
    assert!(!dir.join("greeting.json.tmp").exists());
    let _ = fs::remove_dir_all(dir.parent().unwrap_or(&dir));
}

#[test]
fn file_store_rejects_path_like_keys() {
    let store = FileStore::new(temp_dir("keys"));
    assert!(store.path_for("../escape").is_err());
    assert!(store.path_for("").is_err());
    assert!(store.path_for(".hidden").is_err());
    assert!(store.path_for(USER_TILES_KEY).is_ok());
}

#[test]
fn load_treats_missing_key_as_empty() {
    let tiles = CustomTiles::load(MemoryStore::new());
    assert!(tiles.is_empty());
}

#[test]
fn load_treats_garbage_as_empty() {
    for raw in ["not json", "{\"boardId\": \"home\"}", "42", "null", ""] {
        let mut store = MemoryStore::new();
        store.set(USER_TILES_KEY, raw).expect("seed");
        let tiles = CustomTiles::load(store);
        assert!(tiles.is_empty(), "expected empty for {raw:?}");
    }
}

#[test]
fn decode_skips_malformed_entries_but_keeps_the_rest() {
    let raw = r##"[
        {"boardId": "home", "id": "u-1", "label": "Doctor", "speak": "I want to see the doctor", "color": "#152043"},
        {"label": "missing ids"},
        7,
        {"boardId": "pain", "id": "u-2", "label": "Ice", "icon": "🧊"}
    ]"##;
    let tiles = decode_user_tiles(raw);
    assert_eq!(tiles.len(), 2);
    assert_eq!(tiles[0].tile.spoken_text(), Some("I want to see the doctor"));
    assert_eq!(tiles[1].board_id, "pain");
    assert_eq!(tiles[1].tile.icon.as_deref(), Some("🧊"));
}

#[test]
fn add_rejects_blank_label_without_writing() {
    let mut tiles = CustomTiles::load(MemoryStore::new());
    let added = tiles
        .add("home", &TileDraft::labeled("  "))
        .expect("blank add is not an error");
    assert!(added.is_none());
    assert!(tiles.is_empty());
    assert_eq!(tiles.store().writes(), 0);
}

#[test]
fn add_trims_fields_and_applies_defaults() {
    let mut tiles = CustomTiles::load(MemoryStore::new());
    let draft = TileDraft {
        label: "  Doctor ".into(),
        speak: Some("   ".into()),
        color: None,
        icon: Some("  ".into()),
    };
    let user = tiles
        .add_at("home", &draft, 1_000)
        .expect("add")
        .expect("tile created");
    assert_eq!(user.board_id, "home");
    assert_eq!(user.tile.id, "u-1000");
    assert_eq!(user.tile.label, "Doctor");
    assert_eq!(
        user.tile.action,
        TileAction::Say {
            text: Some("Doctor".into())
        }
    );
    assert_eq!(user.tile.color.as_deref(), Some(DEFAULT_TILE_COLOR));
    assert_eq!(user.tile.icon, None);
    assert_eq!(tiles.store().writes(), 1);
}

#[test]
fn rapid_adds_get_distinct_increasing_ids() {
    let mut tiles = CustomTiles::load(MemoryStore::new());
    let first = tiles
        .add_at("home", &TileDraft::labeled("a"), 500)
        .expect("add")
        .expect("tile");
    let second = tiles
        .add_at("home", &TileDraft::labeled("b"), 500)
        .expect("add")
        .expect("tile");
    let third = tiles
        .add_at("home", &TileDraft::labeled("c"), 10)
        .expect("add")
        .expect("tile");
    assert_eq!(first.tile.id, "u-500");
    assert_eq!(second.tile.id, "u-501");
    assert_eq!(third.tile.id, "u-502");
}

#[test]
fn reload_seeds_id_counter_from_stored_tiles() {
    let mut store = MemoryStore::new();
    store
        .set(
            USER_TILES_KEY,
            r#"[{"boardId": "home", "id": "u-9000", "label": "x"}]"#,
        )
        .expect("seed");
    let mut tiles = CustomTiles::load(store);
    let user = tiles
        .add_at("home", &TileDraft::labeled("y"), 5)
        .expect("add")
        .expect("tile");
    assert_eq!(user.tile.id, "u-9001");
}

#[test]
fn add_then_reload_round_trips_every_field() {
    let dir = temp_dir("reload");
    let draft = TileDraft {
        label: "Doctor".into(),
        speak: Some("I want to see the doctor".into()),
        color: Some("#aa0000".into()),
        icon: Some("🩺".into()),
    };
    let added = {
        let mut tiles = CustomTiles::load(FileStore::new(&dir));
        tiles.add("needs", &draft).expect("add").expect("tile")
    };
    let reloaded = CustomTiles::load(FileStore::new(&dir));
    assert_eq!(reloaded.all(), [added.clone()]);
    let on_board: Vec<&crate::board::Tile> = reloaded.for_board("needs").collect();
    assert_eq!(on_board, [&added.tile]);
    assert_eq!(reloaded.for_board("home").count(), 0);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn persisted_blob_uses_plain_tile_fields() {
    let mut tiles = CustomTiles::load(MemoryStore::new());
    tiles
        .add_at("home", &TileDraft::labeled("Doctor"), 42)
        .expect("add");
    let raw = tiles
        .store()
        .get(USER_TILES_KEY)
        .expect("get")
        .expect("blob written");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(
        value,
        serde_json::json!([{
            "boardId": "home",
            "id": "u-42",
            "label": "Doctor",
            "speak": "Doctor",
            "color": "#152043"
        }])
    );
}

#[test]
fn failed_write_leaves_collection_unchanged() {
    let mut tiles = CustomTiles::load(FailingStore);
    let err = tiles
        .add("home", &TileDraft::labeled("Doctor"))
        .expect_err("write failure surfaces");
    assert!(format!("{err:#}").contains("disk full"));
    assert!(tiles.is_empty());
}
