//! Board and tile data model plus the read-only catalog that resolves board ids.
//!
//! Tiles accept two on-disk encodings: the plain one (`speak` / `toBoardId`) and the
//! tagged one (`action: {type: ...}`). Both collapse into [`TileAction`] at load time.

mod builtin;
mod file;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use file::load_catalog_file;

/// Board id every catalog must define; also the root of navigation history.
pub const HOME_ID: &str = "home";

/// What a tile does when activated. Exactly one action fires per activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TileAction {
    /// Speak `text` (or the label when `text` is absent/blank) and append the label.
    #[serde(rename = "say")]
    Say {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    /// Navigate to another board.
    #[serde(rename = "open")]
    Open {
        #[serde(rename = "boardId")]
        board_id: String,
    },
    #[serde(rename = "back")]
    Back,
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "delete")]
    DeleteLast,
}

/// A single activatable cell on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TileRecord", into = "TileRecord")]
pub struct Tile {
    pub id: String,
    pub label: String,
    pub action: TileAction,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub hint: Option<String>,
}

impl Tile {
    pub fn say(id: &str, label: &str, text: Option<&str>) -> Self {
        Self::with_action(
            id,
            label,
            TileAction::Say {
                text: text.map(str::to_string),
            },
        )
    }

    pub fn open(id: &str, label: &str, board_id: &str) -> Self {
        Self::with_action(
            id,
            label,
            TileAction::Open {
                board_id: board_id.to_string(),
            },
        )
    }

    pub fn with_action(id: &str, label: &str, action: TileAction) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action,
            color: None,
            icon: None,
            hint: None,
        }
    }

    pub fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    /// Target board when this is a navigation tile.
    pub fn target_board(&self) -> Option<&str> {
        match &self.action {
            TileAction::Open { board_id } => Some(board_id),
            _ => None,
        }
    }

    /// Text handed to the speech engine: the trimmed override, else the trimmed label.
    ///
    /// Returns `None` when both are blank, or when the tile does not speak at all.
    pub fn spoken_text(&self) -> Option<&str> {
        let TileAction::Say { text } = &self.action else {
            return None;
        };
        let resolved = text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| self.label.trim());
        if resolved.is_empty() {
            None
        } else {
            Some(resolved)
        }
    }
}

/// Wire shape accepted for tiles; see the module docs for the precedence rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TileRecord {
    pub(crate) id: String,
    pub(crate) label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) speak: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) to_board_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) action: Option<TileAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) hint: Option<String>,
}

impl From<TileRecord> for Tile {
    fn from(record: TileRecord) -> Self {
        // Any non-empty target pre-empts speaking, even a tagged `say`.
        let target = record.to_board_id.filter(|board_id| !board_id.is_empty());
        let action = match (record.action, target) {
            (Some(TileAction::Say { .. }) | None, Some(board_id)) => TileAction::Open { board_id },
            (Some(action), _) => action,
            (None, None) => TileAction::Say {
                text: record.speak,
            },
        };
        Self {
            id: record.id,
            label: record.label,
            action,
            color: record.color,
            icon: record.icon,
            hint: record.hint,
        }
    }
}

impl From<Tile> for TileRecord {
    fn from(tile: Tile) -> Self {
        let mut record = TileRecord {
            id: tile.id,
            label: tile.label,
            color: tile.color,
            icon: tile.icon,
            hint: tile.hint,
            ..TileRecord::default()
        };
        match tile.action {
            TileAction::Say { text } => record.speak = text,
            TileAction::Open { board_id } => record.to_board_id = Some(board_id),
            other => record.action = Some(other),
        }
        record
    }
}

/// A named, ordered collection of tiles. Tile order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub tiles: Vec<Tile>,
}

impl Board {
    pub fn new(id: &str, title: &str, tiles: Vec<Tile>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            tiles,
        }
    }
}

/// Built-in vocabularies shipped with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuiltinCatalog {
    /// Home, needs, feelings and pain boards.
    Classic,
    /// Nine boards including people, food, places, actions and questions.
    Extended,
}

impl BuiltinCatalog {
    pub fn label(self) -> &'static str {
        match self {
            BuiltinCatalog::Classic => "classic",
            BuiltinCatalog::Extended => "extended",
        }
    }

    pub fn build(self) -> BoardCatalog {
        match self {
            BuiltinCatalog::Classic => builtin::classic(),
            BuiltinCatalog::Extended => builtin::extended(),
        }
    }
}

/// Immutable board lookup. Always contains the home board.
#[derive(Debug, Clone)]
pub struct BoardCatalog {
    home_id: String,
    boards: HashMap<String, Board>,
    order: Vec<String>,
    core_tiles: Vec<Tile>,
}

impl BoardCatalog {
    /// Build a catalog; returns `None` when `home_id` is not among `boards`.
    ///
    /// Later boards with a duplicate id replace earlier ones; file loading rejects
    /// duplicates before reaching this point.
    pub fn new(home_id: &str, boards: Vec<Board>, core_tiles: Vec<Tile>) -> Option<Self> {
        let mut order = Vec::with_capacity(boards.len());
        let mut map = HashMap::with_capacity(boards.len());
        for board in boards {
            if !map.contains_key(&board.id) {
                order.push(board.id.clone());
            }
            map.insert(board.id.clone(), board);
        }
        if !map.contains_key(home_id) {
            return None;
        }
        Some(Self {
            home_id: home_id.to_string(),
            boards: map,
            order,
            core_tiles,
        })
    }

    pub fn home_id(&self) -> &str {
        &self.home_id
    }

    pub fn home(&self) -> &Board {
        // Constructor guarantees the home entry.
        &self.boards[&self.home_id]
    }

    /// Board for `board_id`, or the home board when the id is unknown.
    pub fn resolve(&self, board_id: &str) -> &Board {
        self.boards.get(board_id).unwrap_or_else(|| self.home())
    }

    pub fn contains(&self, board_id: &str) -> bool {
        self.boards.contains_key(board_id)
    }

    /// Boards in definition order.
    pub fn boards(&self) -> impl Iterator<Item = &Board> {
        self.order.iter().filter_map(|id| self.boards.get(id))
    }

    pub fn core_tiles(&self) -> &[Tile] {
        &self.core_tiles
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
