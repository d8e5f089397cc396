use super::form::AddTileForm;
use crate::board::Tile;
use crate::session::{BoardSession, TileEffect};
use crate::log_content_enabled;
use tracing::{debug, warn};

/// Tiles per row on the board grid.
pub const GRID_COLUMNS: usize = 6;
/// Tiles per row in the core-words dock.
pub const DOCK_COLUMNS: usize = 12;

macro_rules! state_change {
    ($self:expr, $field:ident, $value:expr) => {{
        $self.$field = $value;
        $self.request_redraw();
    }};
    ($self:expr, $body:block) => {{
        $body
        $self.request_redraw();
    }};
}

/// Where the keyboard cursor sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Grid(usize),
    Dock(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// TUI state wrapped around one [`BoardSession`].
pub struct App {
    session: BoardSession,
    selection: Selection,
    form: Option<AddTileForm>,
    status: String,
    needs_redraw: bool,
}

impl App {
    pub fn new(session: BoardSession) -> Self {
        let status = if session.speaker().is_available() {
            format!("Speech: {}", session.speaker().label())
        } else {
            "Speech unavailable; tiles still build the sentence".to_string()
        };
        Self {
            session,
            selection: Selection::Grid(0),
            form: None,
            status,
            needs_redraw: true,
        }
    }

    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    pub fn form(&self) -> Option<&AddTileForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut AddTileForm> {
        self.needs_redraw = true;
        self.form.as_mut()
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn grid_len(&self) -> usize {
        self.session.visible_tiles().len()
    }

    fn dock_len(&self) -> usize {
        self.session.core_tiles().len()
    }

    /// The tile under the cursor, cloned so it can be activated against `&mut self`.
    pub fn selected_tile(&self) -> Option<Tile> {
        match self.selection {
            Selection::Grid(index) => self.session.visible_tiles().get(index).map(|t| (*t).clone()),
            Selection::Dock(index) => self.session.core_tiles().get(index).cloned(),
        }
    }

    pub fn move_selection(&mut self, direction: Move) {
        let grid_len = self.grid_len();
        let dock_len = self.dock_len();
        let next = match (self.selection, direction) {
            (Selection::Grid(i), Move::Left) => Selection::Grid(i.saturating_sub(1)),
            (Selection::Grid(i), Move::Right) if i + 1 < grid_len => Selection::Grid(i + 1),
            (Selection::Grid(i), Move::Up) if i >= GRID_COLUMNS => Selection::Grid(i - GRID_COLUMNS),
            (Selection::Grid(i), Move::Down) if i + GRID_COLUMNS < grid_len => {
                Selection::Grid(i + GRID_COLUMNS)
            }
            (Selection::Grid(i), Move::Down) if dock_len > 0 => {
                Selection::Dock((i % GRID_COLUMNS).min(dock_len - 1))
            }
            (Selection::Dock(i), Move::Left) => Selection::Dock(i.saturating_sub(1)),
            (Selection::Dock(i), Move::Right) if i + 1 < dock_len => Selection::Dock(i + 1),
            (Selection::Dock(i), Move::Down) if i + DOCK_COLUMNS < dock_len => {
                Selection::Dock(i + DOCK_COLUMNS)
            }
            (Selection::Dock(i), Move::Up) if i >= DOCK_COLUMNS => Selection::Dock(i - DOCK_COLUMNS),
            (Selection::Dock(i), Move::Up) if grid_len > 0 => {
                let last_row_start = (grid_len - 1) / GRID_COLUMNS * GRID_COLUMNS;
                let column = (i % DOCK_COLUMNS).min(GRID_COLUMNS - 1);
                Selection::Grid((last_row_start + column).min(grid_len - 1))
            }
            (current, _) => current,
        };
        state_change!(self, selection, next);
    }

    pub fn select(&mut self, selection: Selection) {
        state_change!(self, selection, selection);
    }

    pub fn activate_selected(&mut self) {
        if let Some(tile) = self.selected_tile() {
            self.activate(&tile);
        }
    }

    pub fn activate(&mut self, tile: &Tile) {
        let effect = self.session.activate(tile);
        match effect {
            TileEffect::Navigated | TileEffect::WentBack => self.board_changed(),
            TileEffect::Spoke if !self.session.speaker().is_available() => {
                self.status = "Added to sentence (speech unavailable)".to_string();
            }
            _ => {}
        }
        self.request_redraw();
    }

    pub fn go_back(&mut self) {
        if self.session.back() {
            self.board_changed();
        }
        self.request_redraw();
    }

    pub fn go_home(&mut self) {
        self.session.home();
        self.board_changed();
    }

    pub fn speak_sentence(&mut self) {
        if !self.session.speak_all() {
            self.status = "Sentence is empty".to_string();
        }
        self.request_redraw();
    }

    pub fn clear_sentence(&mut self) {
        state_change!(self, {
            self.session.clear();
        });
    }

    pub fn delete_last_word(&mut self) {
        state_change!(self, {
            self.session.delete_last();
        });
    }

    pub fn open_form(&mut self) {
        state_change!(self, form, Some(AddTileForm::new()));
    }

    pub fn cancel_form(&mut self) {
        state_change!(self, form, None);
    }

    /// Save the form as a tile on the current board. A blank label keeps the form open.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        if form.label_is_blank() {
            self.status = "Label is required".to_string();
            self.request_redraw();
            return;
        }
        let draft = form.to_draft();
        match self.session.add_tile(&draft) {
            Ok(Some(user)) => {
                if log_content_enabled() {
                    debug!(tile = %user.tile.id, label = %user.tile.label, "user tile added");
                } else {
                    debug!(tile = %user.tile.id, "user tile added");
                }
                self.status = format!("Added tile to {}", self.session.current_board().title);
                self.form = None;
            }
            Ok(None) => {
                self.status = "Label is required".to_string();
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "failed to save user tile");
                self.status = format!("Could not save tile: {err:#}");
            }
        }
        self.request_redraw();
    }

    fn board_changed(&mut self) {
        state_change!(self, selection, Selection::Grid(0));
    }
}
