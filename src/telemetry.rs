use crate::config::AppConfig;
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

const TRACE_LOG_ENV: &str = "VOCABOARD_TRACE_LOG";

static TRACE_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// `VOCABOARD_TRACE_LOG` when set to something non-blank, else `<tmp>/vocaboard_trace.jsonl`.
pub(crate) fn tracing_log_path() -> PathBuf {
    env::var_os(TRACE_LOG_ENV)
        .filter(|value| !value.to_string_lossy().trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("vocaboard_trace.jsonl"))
}

/// Board ids, effects and store events are debug-level; content stays gated separately.
fn trace_level(config: &AppConfig) -> Level {
    if config.log_content {
        Level::TRACE
    } else {
        Level::DEBUG
    }
}

/// Install the JSON file subscriber when `--logs` is on (and `--no-logs` is off).
///
/// Returns the file events go to, or `None` when tracing stays off. The TUI owns
/// stdout, so events never go there.
pub fn init_tracing(config: &AppConfig) -> Option<PathBuf> {
    if !config.logging_enabled() {
        return None;
    }
    TRACE_PATH
        .get_or_init(|| {
            let path = tracing_log_path();
            if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(parent).ok()?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_timer(UtcTime::rfc_3339())
                .with_max_level(trace_level(config))
                .with_target(false)
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok()?;
            Some(path)
        })
        .clone()
}
