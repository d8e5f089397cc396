//! One user's board session: navigation, the sentence buffer, user tiles and speech.
//!
//! Every mutation the UI can perform goes through [`BoardSession`]; there is no other
//! shared state.

use crate::board::{Board, BoardCatalog, Tile, TileAction};
use crate::navigation::Navigator;
use crate::speech::Speaker;
use crate::store::{CustomTiles, KeyValueStore, TileDraft, UserTile};
use crate::utterance::Utterance;
use crate::log_content_enabled;
use anyhow::Result;
use tracing::debug;

/// Which effect a tile activation had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileEffect {
    Navigated,
    Spoke,
    WentBack,
    Cleared,
    DeletedLast,
    /// Nothing observable happened (blank tile, back at root, nothing to delete).
    Ignored,
}

pub struct BoardSession<S = Box<dyn Speaker>, K = Box<dyn KeyValueStore>>
where
    S: Speaker,
    K: KeyValueStore,
{
    catalog: BoardCatalog,
    navigator: Navigator,
    utterance: Utterance,
    custom: CustomTiles<K>,
    speaker: S,
}

impl<S: Speaker, K: KeyValueStore> BoardSession<S, K> {
    pub fn new(catalog: BoardCatalog, custom: CustomTiles<K>, speaker: S) -> Self {
        let navigator = Navigator::new(catalog.home_id());
        Self {
            catalog,
            navigator,
            utterance: Utterance::new(),
            custom,
            speaker,
        }
    }

    pub fn catalog(&self) -> &BoardCatalog {
        &self.catalog
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn speaker(&self) -> &S {
        &self.speaker
    }

    pub fn custom_tiles(&self) -> &CustomTiles<K> {
        &self.custom
    }

    /// The board on screen; unknown ids resolve to home.
    pub fn current_board(&self) -> &Board {
        self.catalog.resolve(self.navigator.current())
    }

    /// Built-in tiles of the current board followed by user tiles added to it.
    ///
    /// User tiles match on the navigation id, so tiles added while an unknown id was
    /// showing the home board stay with that id.
    pub fn visible_tiles(&self) -> Vec<&Tile> {
        let current = self.navigator.current();
        self.current_board()
            .tiles
            .iter()
            .chain(self.custom.for_board(current))
            .collect()
    }

    pub fn core_tiles(&self) -> &[Tile] {
        self.catalog.core_tiles()
    }

    pub fn words(&self) -> &[String] {
        self.utterance.words()
    }

    pub fn sentence(&self) -> String {
        self.utterance.sentence()
    }

    pub fn can_go_back(&self) -> bool {
        self.navigator.can_go_back()
    }

    /// Run the tile's single action.
    pub fn activate(&mut self, tile: &Tile) -> TileEffect {
        if log_content_enabled() {
            debug!(tile = %tile.id, label = %tile.label, "tile activated");
        } else {
            debug!(tile = %tile.id, "tile activated");
        }
        match &tile.action {
            TileAction::Open { board_id } => {
                self.open(board_id);
                TileEffect::Navigated
            }
            TileAction::Say { .. } => {
                if self.utterance.speak_tile(tile, &mut self.speaker) {
                    TileEffect::Spoke
                } else {
                    TileEffect::Ignored
                }
            }
            TileAction::Back => {
                if self.back() {
                    TileEffect::WentBack
                } else {
                    TileEffect::Ignored
                }
            }
            TileAction::Clear => {
                self.clear();
                TileEffect::Cleared
            }
            TileAction::DeleteLast => {
                if self.delete_last().is_some() {
                    TileEffect::DeletedLast
                } else {
                    TileEffect::Ignored
                }
            }
        }
    }

    pub fn open(&mut self, board_id: &str) {
        self.navigator.open(board_id);
        debug!(board = board_id, depth = self.navigator.history().len(), "opened board");
    }

    pub fn back(&mut self) -> bool {
        self.navigator.back()
    }

    pub fn home(&mut self) {
        self.navigator.home();
    }

    pub fn speak_all(&mut self) -> bool {
        self.utterance.speak_all(&mut self.speaker)
    }

    pub fn clear(&mut self) {
        self.utterance.clear();
    }

    pub fn delete_last(&mut self) -> Option<String> {
        self.utterance.delete_last()
    }

    /// Add a user tile to the board currently on screen.
    pub fn add_tile(&mut self, draft: &TileDraft) -> Result<Option<UserTile>> {
        let board_id = self.navigator.current().to_string();
        self.custom.add(&board_id, draft)
    }
}
