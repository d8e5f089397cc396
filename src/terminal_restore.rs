//! Board-screen setup and teardown. Whatever was switched on is switched off again,
//! on normal exit and from the panic hook.

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::{
    io::{self, Write},
    panic,
    sync::{
        atomic::{AtomicU8, Ordering},
        OnceLock,
    },
};

/// Terminal modes the board screen needs, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScreenMode {
    Raw,
    AltScreen,
    MouseCapture,
}

impl ScreenMode {
    const ENTER_ORDER: [ScreenMode; 3] = [Self::Raw, Self::AltScreen, Self::MouseCapture];

    fn bit(self) -> u8 {
        match self {
            Self::Raw => 0b001,
            Self::AltScreen => 0b010,
            Self::MouseCapture => 0b100,
        }
    }

    fn enter(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => enable_raw_mode(),
            Self::AltScreen => execute!(out, EnterAlternateScreen),
            Self::MouseCapture => execute!(out, EnableMouseCapture),
        }
    }

    fn leave(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Raw => disable_raw_mode(),
            Self::AltScreen => execute!(out, LeaveAlternateScreen),
            Self::MouseCapture => execute!(out, DisableMouseCapture),
        }
    }
}

static ACTIVE_MODES: AtomicU8 = AtomicU8::new(0);
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

fn mark_active(mode: ScreenMode) {
    ACTIVE_MODES.fetch_or(mode.bit(), Ordering::SeqCst);
}

/// Clears the active set and returns it in teardown order (reverse of entry).
fn take_active() -> Vec<ScreenMode> {
    let active = ACTIVE_MODES.swap(0, Ordering::SeqCst);
    ScreenMode::ENTER_ORDER
        .iter()
        .rev()
        .copied()
        .filter(|mode| active & mode.bit() != 0)
        .collect()
}

/// Owns the board screen: raw input, alternate screen and mouse clicks on tiles.
/// Dropping it puts the terminal back.
pub struct TerminalRestoreGuard;

impl TerminalRestoreGuard {
    /// Enter every mode the board screen needs. A mode that fails to switch on
    /// leaves the earlier ones recorded, so drop still undoes them.
    pub fn enter(out: &mut impl Write) -> io::Result<Self> {
        install_terminal_panic_hook();
        let guard = TerminalRestoreGuard;
        for mode in ScreenMode::ENTER_ORDER {
            mode.enter(out)?;
            mark_active(mode);
        }
        Ok(guard)
    }

    pub fn restore(&self) {
        restore_terminal();
    }
}

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Undo whatever is still active. Safe to call more than once.
pub fn restore_terminal() {
    let mut stdout = io::stdout();
    for mode in take_active() {
        if let Err(err) = mode.leave(&mut stdout) {
            tracing::debug!(?mode, error = %err, "terminal mode restore failed");
        }
    }
    let _ = execute!(stdout, Show);
    let _ = stdout.flush();
}

pub fn install_terminal_panic_hook() {
    PANIC_HOOK_INSTALLED.get_or_init(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            crate::log_panic(info);
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            tracing::error!(%location, "panic while the board screen was up");
            previous(info);
        }));
    });
}
