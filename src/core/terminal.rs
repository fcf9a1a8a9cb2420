//! Terminal trait and raw-mode lifecycle helpers.

use std::io;

/// Minimal blocking terminal interface for the selector.
pub trait Terminal {
    /// Switch input to raw mode (unbuffered, unechoed single bytes).
    ///
    /// Implementations remember the prior configuration so that
    /// [`Terminal::restore_mode`] can put it back.
    fn enable_raw_mode(&mut self) -> io::Result<()>;

    /// Restore the configuration captured by [`Terminal::enable_raw_mode`].
    ///
    /// Calling this without a prior successful `enable_raw_mode` is a no-op.
    fn restore_mode(&mut self) -> io::Result<()>;

    /// Block until one byte of input is available and return it.
    fn read_byte(&mut self) -> io::Result<u8>;

    /// Write output to the terminal.
    fn write(&mut self, data: &str) -> io::Result<()>;

    /// Terminal width in columns.
    fn columns(&self) -> u16;
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn enable_raw_mode(&mut self) -> io::Result<()> {
        (**self).enable_raw_mode()
    }

    fn restore_mode(&mut self) -> io::Result<()> {
        (**self).restore_mode()
    }

    fn read_byte(&mut self) -> io::Result<u8> {
        (**self).read_byte()
    }

    fn write(&mut self, data: &str) -> io::Result<()> {
        (**self).write(data)
    }

    fn columns(&self) -> u16 {
        (**self).columns()
    }
}

/// RAII guard that holds the terminal in raw mode and restores it on drop.
///
/// Restoration runs on every exit path: explicit [`RawModeGuard::restore`],
/// early `?` returns and panics unwinding through the owner.
pub struct RawModeGuard<T: Terminal> {
    terminal: Option<T>,
}

impl<T: Terminal> RawModeGuard<T> {
    /// Enter raw mode. On failure nothing needs restoring and the error is returned.
    pub fn enter(mut terminal: T) -> io::Result<Self> {
        terminal.enable_raw_mode()?;
        Ok(Self {
            terminal: Some(terminal),
        })
    }

    /// Access the wrapped terminal.
    pub fn terminal_mut(&mut self) -> &mut T {
        self.terminal
            .as_mut()
            .expect("terminal already taken from guard")
    }

    /// Restore the terminal now and surface any restore error.
    pub fn restore(mut self) -> io::Result<T> {
        let mut terminal = self
            .terminal
            .take()
            .expect("terminal already taken from guard");
        terminal.restore_mode()?;
        Ok(terminal)
    }
}

impl<T: Terminal> Drop for RawModeGuard<T> {
    fn drop(&mut self) {
        if let Some(terminal) = self.terminal.as_mut() {
            if let Err(err) = terminal.restore_mode() {
                tracing::warn!(error = %err, "failed to restore terminal mode");
            }
        }
    }
}
