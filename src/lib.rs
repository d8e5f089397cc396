//! Vocaboard: a terminal AAC (augmentative and alternative communication) board.
//!
//! Tiles either speak a word or open another board. Spoken words accumulate into a
//! sentence that can be replayed, trimmed or cleared, and users can add their own tiles,
//! which persist between runs.

pub mod app;
pub mod board;
pub mod config;
pub mod navigation;
pub mod session;
pub mod speech;
pub mod store;
pub mod terminal_restore;
mod telemetry;
pub mod ui;
pub mod utterance;

pub use app::*;
pub use session::{BoardSession, TileEffect};
pub use telemetry::init_tracing;
