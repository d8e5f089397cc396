use std::env;
use std::path::PathBuf;

pub const DEFAULT_SPEECH_RATE: f32 = 1.0;
pub const DEFAULT_SPEECH_PITCH: f32 = 1.0;
pub const DEFAULT_SPEECH_VOLUME: f32 = 1.0;

pub(super) const MIN_SPEECH_RATE: f32 = 0.1;
pub(super) const MAX_SPEECH_RATE: f32 = 10.0;
pub(super) const MAX_SPEECH_PITCH: f32 = 2.0;
pub(super) const MAX_SPEECH_VOLUME: f32 = 1.0;
pub(super) const MAX_SPEECH_CMD_BYTES: usize = 1024;

const APP_DIR_NAME: &str = "vocaboard";

/// `$XDG_DATA_HOME/vocaboard`, else `~/.local/share/vocaboard`, else the temp dir.
pub fn default_data_dir() -> PathBuf {
    if let Some(xdg) = env::var_os("XDG_DATA_HOME").filter(|value| !value.is_empty()) {
        return PathBuf::from(xdg).join(APP_DIR_NAME);
    }
    if let Some(home) = env::var_os("HOME").filter(|value| !value.is_empty()) {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR_NAME);
    }
    env::temp_dir().join(APP_DIR_NAME)
}
