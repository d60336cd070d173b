/*
[INPUT]:  Stdout, terminal raw mode, ratatui backend
[OUTPUT]: TerminalGuard owning the taskdeck screen session
[POS]:    TUI terminal lifecycle guard
[UPDATE]: When the terminal setup or teardown sequence changes
*/

use std::io;
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};

type Backend = CrosstermBackend<io::Stdout>;

static PANIC_HOOK: Once = Once::new();

/// Screen session for the task list and the missing-owner screen.
///
/// Dropping the guard, or panicking while it is alive, puts the terminal back
/// into cooked mode on the main screen.
pub(super) struct TerminalGuard {
    terminal: Terminal<Backend>,
}

impl TerminalGuard {
    pub(super) fn new() -> Result<Self> {
        install_panic_hook();

        enable_raw_mode().context("enable raw mode")?;
        let terminal = open_screen().inspect_err(|_| restore_terminal())?;
        Ok(Self { terminal })
    }

    pub(super) fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render).context("draw frame")?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        restore_terminal();
    }
}

fn open_screen() -> Result<Terminal<Backend>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).context("create terminal")?;
    terminal.clear().context("clear screen")?;
    Ok(terminal)
}

/// Safe to call more than once
fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_terminal();
            previous(info);
        }));
    });
}
