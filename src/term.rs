//! Raw terminal mode control
//!
//! Puts the controlling terminal into raw (unbuffered, no-echo) mode and
//! guarantees the original attributes come back on every exit path,
//! normal return or fatal error.

use std::io;

use log::debug;
use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use crate::error::{Error, Result};

/// RAII guard for raw terminal mode.
///
/// Raw mode is acquired once by [`RawMode::enable`] and released by
/// [`restore`](RawMode::restore) or by `Drop`, whichever comes first.
/// Restoring more than once is safe: the same saved attributes are
/// re-applied each time.
pub struct RawMode {
    original: Termios,
    restored: bool,
}

impl RawMode {
    /// Capture the current attributes on stdin and apply raw mode.
    ///
    /// Raw mode disables input translation (break, CR-to-NL, parity
    /// check, high-bit stripping, flow control), output post-processing,
    /// echo, canonical line buffering, extended input processing, and
    /// signal-generating keys, and forces 8-bit characters. `VMIN`/`VTIME`
    /// are set so a read returns as soon as one byte arrives, or after
    /// ~100ms idle with zero bytes.
    pub fn enable() -> Result<Self> {
        let original = termios::tcgetattr(io::stdin())
            .map_err(|e| Error::TerminalConfig(format!("tcgetattr: {}", e)))?;

        let mut raw = original.clone();
        raw.input_flags.remove(
            InputFlags::BRKINT
                | InputFlags::ICRNL
                | InputFlags::INPCK
                | InputFlags::ISTRIP
                | InputFlags::IXON,
        );
        raw.output_flags.remove(OutputFlags::OPOST);
        raw.control_flags.insert(ControlFlags::CS8);
        raw.local_flags.remove(
            LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
        );
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 1;

        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &raw)
            .map_err(|e| Error::TerminalConfig(format!("tcsetattr: {}", e)))?;

        debug!("raw mode enabled");
        Ok(Self {
            original,
            restored: false,
        })
    }

    /// Restore the originally captured attributes.
    pub fn restore(&mut self) -> Result<()> {
        termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original)
            .map_err(|e| Error::TerminalConfig(format!("tcsetattr: {}", e)))?;
        self.restored = true;
        debug!("raw mode restored");
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if !self.restored {
            let _ = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original);
        }
    }
}
