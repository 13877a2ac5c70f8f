//! Raw mode and alternate screen handling.
//!
//! The runtime restores the terminal when dropped; the panic hook covers
//! unwinding. There is no signal handler: in raw mode Ctrl+C is a key event
//! and quits through the reducer.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Enters raw mode and the alternate screen with bracketed paste on.
///
/// Install the panic hook first so a panic during setup still restores.
///
/// # Errors
/// Returns an error if any terminal mode cannot be switched.
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

/// Undoes `setup_terminal`. Safe to call more than once.
///
/// Raw mode is always left, even if leaving the alternate screen fails.
///
/// # Errors
/// Returns the first failure.
pub fn restore_terminal() -> Result<()> {
    let screen = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)
        .context("Failed to leave alternate screen");
    let raw = disable_raw_mode().context("Failed to disable raw mode");
    screen.and(raw)
}

/// Chains a hook that restores the terminal before the default panic output.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
