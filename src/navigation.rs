//! Board navigation history. The last history entry is always the current board.

/// Navigation state: a non-empty stack of board ids rooted at the home board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    home_id: String,
    history: Vec<String>,
}

impl Navigator {
    pub fn new(home_id: &str) -> Self {
        Self {
            home_id: home_id.to_string(),
            history: vec![home_id.to_string()],
        }
    }

    /// Currently displayed board id. May name an unknown board; rendering resolves it.
    pub fn current(&self) -> &str {
        self.history
            .last()
            .map(String::as_str)
            .unwrap_or(&self.home_id)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn home_id(&self) -> &str {
        &self.home_id
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Push `board_id` without validating it against the catalog.
    pub fn open(&mut self, board_id: &str) {
        self.history.push(board_id.to_string());
    }

    /// Pop one level. No-op at the root. Returns whether anything changed.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.history.pop();
        if self.history.is_empty() {
            self.history.push(self.home_id.clone());
        }
        true
    }

    /// Hard reset to `[home]`, discarding all history.
    pub fn home(&mut self) {
        self.history.clear();
        self.history.push(self.home_id.clone());
    }
}
