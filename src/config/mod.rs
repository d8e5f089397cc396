//! Command-line parsing and validation helpers.

mod defaults;
#[cfg(test)]
mod tests;
mod validation;

use crate::board::BuiltinCatalog;
use clap::Parser;
use std::path::PathBuf;

pub use defaults::{
    default_data_dir, DEFAULT_SPEECH_PITCH, DEFAULT_SPEECH_RATE, DEFAULT_SPEECH_VOLUME,
};

/// CLI options for the Vocaboard TUI.
#[derive(Debug, Parser, Clone)]
#[command(
    about = "Vocaboard: a terminal AAC board that speaks tapped tiles",
    author,
    version
)]
pub struct AppConfig {
    /// Directory holding saved custom tiles
    #[arg(long = "data-dir", env = "VOCABOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Built-in board set to show
    #[arg(long, value_enum, default_value_t = BuiltinCatalog::Classic)]
    pub catalog: BuiltinCatalog,

    /// Load boards from a JSON or YAML file instead of a built-in set
    #[arg(long = "catalog-file", value_name = "PATH")]
    pub catalog_file: Option<PathBuf>,

    /// Speech command to run (text is appended as the last argument)
    #[arg(long = "speech-cmd", env = "VOCABOARD_SPEECH_CMD", value_name = "CMD")]
    pub speech_cmd: Option<String>,

    /// Never call a speech engine
    #[arg(long = "no-speech", default_value_t = false)]
    pub no_speech: bool,

    /// Speech rate multiplier (0.1 - 10)
    #[arg(long = "speech-rate", default_value_t = DEFAULT_SPEECH_RATE)]
    pub speech_rate: f32,

    /// Speech pitch (0 - 2)
    #[arg(long = "speech-pitch", default_value_t = DEFAULT_SPEECH_PITCH)]
    pub speech_pitch: f32,

    /// Speech volume (0 - 1)
    #[arg(long = "speech-volume", default_value_t = DEFAULT_SPEECH_VOLUME)]
    pub speech_volume: f32,

    /// Print every board (with saved custom tiles) and exit
    #[arg(long = "list-boards", default_value_t = false)]
    pub list_boards: bool,

    /// Enable file logging (debug)
    #[arg(long = "logs", env = "VOCABOARD_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "VOCABOARD_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Allow logging tile labels and spoken text (debug log only)
    #[arg(
        long = "log-content",
        env = "VOCABOARD_LOG_CONTENT",
        default_value_t = false
    )]
    pub log_content: bool,
}
