#![forbid(unsafe_code)]

//! RAII terminal guard.
//!
//! Entering the guard switches to raw mode, the alternate screen and a hidden
//! cursor. Dropping it (or panicking while it is alive) restores all three in
//! reverse order.

use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::{cursor, execute, terminal};

/// Owns the terminal modes for the demo's lifetime.
#[derive(Debug)]
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns an error if raw mode or the alternate screen cannot be
    /// enabled. Anything already enabled is restored before returning.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        tracing::info!("terminal raw mode enabled");
        let mut guard = Self {
            alternate_screen: false,
        };

        let mut stdout = io::stdout();
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
        guard.alternate_screen = true;
        tracing::info!("alternate screen enabled");
        Ok(guard)
    }

    fn restore(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.alternate_screen {
            let _ = execute!(stdout, terminal::LeaveAlternateScreen);
            self.alternate_screen = false;
            tracing::info!("alternate screen disabled");
        }
        // Raw mode goes last so the escape sequences above are not echoed.
        let _ = terminal::disable_raw_mode();
        tracing::info!("terminal raw mode disabled");
        let _ = stdout.flush();
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let mut stdout = io::stdout();
            let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            let _ = stdout.flush();
            previous(info);
        }));
    });
}
