//! Terminal state for deep focus mode.
//!
//! Focus mode hides the cursor and turns off input echo for the length of
//! a session. [`FocusGuard`] restores both when dropped, which covers the
//! normal exit, an interrupted session, and an early `?` return.

use crossterm::{cursor, execute};
use std::io::{self, Write};

/// Terminal bell
pub const BEEP: &str = "\x07";

/// Restores the terminal on drop
pub struct FocusGuard {
    active: bool,
    #[cfg(unix)]
    saved_termios: Option<libc::termios>,
}

impl FocusGuard {
    /// Enter focus mode when `enabled`, otherwise a no-op guard
    pub fn enter(enabled: bool) -> Self {
        if !enabled {
            return Self::inactive();
        }

        if let Err(e) = execute!(io::stdout(), cursor::Hide) {
            tracing::debug!(error = %e, "could not hide cursor");
        }

        Self {
            active: true,
            #[cfg(unix)]
            saved_termios: disable_echo(),
        }
    }

    pub fn inactive() -> Self {
        Self {
            active: false,
            #[cfg(unix)]
            saved_termios: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ring the bell if focus mode is on
    pub fn beep(&self) {
        if self.active {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(BEEP.as_bytes());
            let _ = stdout.flush();
        }
    }

    fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        self.restore_echo();

        if let Err(e) = execute!(io::stdout(), cursor::Show) {
            tracing::debug!(error = %e, "could not show cursor");
        }
    }
}

impl FocusGuard {
    #[cfg(unix)]
    fn restore_echo(&mut self) {
        if let Some(saved) = self.saved_termios.take() {
            restore_termios(&saved);
        }
    }

    #[cfg(not(unix))]
    fn restore_echo(&mut self) {}
}

impl Drop for FocusGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Clear ECHO on stdin, returning the previous settings
#[cfg(unix)]
fn disable_echo() -> Option<libc::termios> {
    // SAFETY: termios is plain data; tcgetattr fills it or fails without writing.
    unsafe {
        if libc::isatty(libc::STDIN_FILENO) != 1 {
            return None;
        }
        let mut original: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(libc::STDIN_FILENO, &mut original) != 0 {
            tracing::debug!("tcgetattr failed, leaving echo on");
            return None;
        }
        let mut silent = original;
        silent.c_lflag &= !libc::ECHO;
        if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &silent) != 0 {
            tracing::debug!("tcsetattr failed, leaving echo on");
            return None;
        }
        Some(original)
    }
}

#[cfg(unix)]
fn restore_termios(saved: &libc::termios) {
    // SAFETY: `saved` came from a successful tcgetattr on the same descriptor.
    unsafe {
        libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, saved);
    }
}
