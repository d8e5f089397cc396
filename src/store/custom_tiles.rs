use super::KeyValueStore;
use crate::board::{Tile, TileAction, TileRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Storage key for the user-tile blob.
pub const USER_TILES_KEY: &str = "voca_user_tiles_v1";
/// Tile color used when the add form leaves it blank.
pub const DEFAULT_TILE_COLOR: &str = "#152043";

const USER_TILE_ID_PREFIX: &str = "u-";

/// A tile created at runtime, shown only on the board it was added to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UserTileRecord", into = "UserTileRecord")]
pub struct UserTile {
    pub board_id: String,
    pub tile: Tile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserTileRecord {
    #[serde(rename = "boardId")]
    board_id: String,
    #[serde(flatten)]
    tile: TileRecord,
}

impl From<UserTileRecord> for UserTile {
    fn from(record: UserTileRecord) -> Self {
        Self {
            board_id: record.board_id,
            tile: Tile::from(record.tile),
        }
    }
}

impl From<UserTile> for UserTileRecord {
    fn from(user: UserTile) -> Self {
        Self {
            board_id: user.board_id,
            tile: TileRecord::from(user.tile),
        }
    }
}

/// Raw form input for a new tile. Fields are trimmed on `add`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileDraft {
    pub label: String,
    pub speak: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl TileDraft {
    pub fn labeled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Self::default()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

fn numeric_id(id: &str) -> Option<u64> {
    id.strip_prefix(USER_TILE_ID_PREFIX)?.parse().ok()
}

/// Decode the stored blob. Anything but a JSON array yields no tiles; array entries
/// that do not decode are dropped individually.
pub(crate) fn decode_user_tiles(raw: &str) -> Vec<UserTile> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "user tile blob is not valid JSON; ignoring it");
            return Vec::new();
        }
    };
    let serde_json::Value::Array(items) = value else {
        warn!("user tile blob is not an array; ignoring it");
        return Vec::new();
    };
    let total = items.len();
    let tiles: Vec<UserTile> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<UserTile>(item) {
            Ok(tile) => Some(tile),
            Err(err) => {
                warn!(error = %err, "skipping unreadable user tile");
                None
            }
        })
        .collect();
    if tiles.len() != total {
        debug!(kept = tiles.len(), total, "user tile blob partially decoded");
    }
    tiles
}

/// The persisted user-tile collection.
///
/// Ids are `u-<n>` with `n` a strictly increasing millisecond stamp, seeded from the
/// largest id already stored, so back-to-back adds never collide.
pub struct CustomTiles<K: KeyValueStore = Box<dyn KeyValueStore>> {
    store: K,
    tiles: Vec<UserTile>,
    last_id: u64,
}

impl<K: KeyValueStore> CustomTiles<K> {
    /// Read the collection from `store`. Never fails: unreadable data means no tiles.
    pub fn load(store: K) -> Self {
        let tiles = match store.get(USER_TILES_KEY) {
            Ok(Some(raw)) => decode_user_tiles(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to read user tiles; starting empty");
                Vec::new()
            }
        };
        let last_id = tiles
            .iter()
            .filter_map(|user| numeric_id(&user.tile.id))
            .max()
            .unwrap_or(0);
        info!(count = tiles.len(), "loaded user tiles");
        Self {
            store,
            tiles,
            last_id,
        }
    }

    pub fn all(&self) -> &[UserTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// User tiles for `board_id`, in creation order.
    pub fn for_board<'a>(&'a self, board_id: &'a str) -> impl Iterator<Item = &'a Tile> + 'a {
        self.tiles
            .iter()
            .filter(move |user| user.board_id == board_id)
            .map(|user| &user.tile)
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    /// Create, persist and remember a tile on `board_id`.
    ///
    /// Returns `Ok(None)` without writing when the label is blank. The in-memory
    /// collection only changes once the write succeeded.
    pub fn add(&mut self, board_id: &str, draft: &TileDraft) -> Result<Option<UserTile>> {
        self.add_at(board_id, draft, now_millis())
    }

    pub(crate) fn add_at(
        &mut self,
        board_id: &str,
        draft: &TileDraft,
        now_ms: u64,
    ) -> Result<Option<UserTile>> {
        let Some(label) = non_blank(Some(draft.label.as_str())) else {
            return Ok(None);
        };
        let speak = non_blank(draft.speak.as_deref()).unwrap_or_else(|| label.clone());
        let color = non_blank(draft.color.as_deref())
            .unwrap_or_else(|| DEFAULT_TILE_COLOR.to_string());
        let icon = non_blank(draft.icon.as_deref());

        let stamp = now_ms.max(self.last_id.saturating_add(1));
        let tile = Tile {
            id: format!("{USER_TILE_ID_PREFIX}{stamp}"),
            label,
            action: TileAction::Say { text: Some(speak) },
            color: Some(color),
            icon,
            hint: None,
        };
        let user = UserTile {
            board_id: board_id.to_string(),
            tile,
        };

        let mut next = self.tiles.clone();
        next.push(user.clone());
        let blob = serde_json::to_string(&next).context("failed to encode user tiles")?;
        self.store
            .set(USER_TILES_KEY, &blob)
            .context("failed to save user tiles")?;

        self.tiles = next;
        self.last_id = stamp;
        info!(board_id, id = %user.tile.id, "added user tile");
        Ok(Some(user))
    }
}
