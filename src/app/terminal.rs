use std::{
    io::{self, Stdout},
    sync::Once,
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};

type Backend = CrosstermBackend<Stdout>;

static PANIC_HOOK: Once = Once::new();

/// Owns the alternate screen while the editor runs.
///
/// Saved views go to stdout only after the screen is handed back, either
/// through [`TerminalGuard::restore`] or on drop.
pub struct TerminalGuard {
    terminal: Terminal<Backend>,
    restored: bool,
}

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        install_panic_hook();
        enable_raw_mode().context("failed to enable raw mode")?;
        let terminal = open_alternate_screen().inspect_err(|_| release_screen())?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal
            .draw(render)
            .context("failed to draw the editor")?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.terminal
            .resize(Rect::new(0, 0, width, height))
            .context("failed to resize the terminal")
    }

    /// Leave the alternate screen, reporting the first step that failed.
    /// Every step is attempted regardless.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        let cursor = self.terminal.show_cursor().context("failed to show cursor");
        let raw = disable_raw_mode().context("failed to disable raw mode");
        let screen = execute!(io::stdout(), LeaveAlternateScreen, Show)
            .context("failed to leave alternate screen");
        cursor.and(raw).and(screen)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        let _ = self.terminal.show_cursor();
        release_screen();
    }
}

fn open_alternate_screen() -> Result<Terminal<Backend>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All))
        .context("failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("failed to initialize terminal")
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            release_screen();
            previous(panic_info);
        }));
    });
}

fn release_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}
