//! Board UI state and the process-wide logging gates.

mod form;
mod logging;
mod state;

pub use form::{AddTileForm, FormField, FORM_FIELDS};
#[cfg(test)]
pub(crate) use logging::set_logging_for_tests;
pub use logging::{crash_log_path, init_logging, log_content_enabled, log_panic};
pub use state::{App, Move, Selection, DOCK_COLUMNS, GRID_COLUMNS};
