//! Viewport dimensions

use std::io;

use crate::error::{Error, Result};

/// Visible terminal area in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    /// Number of rows (characters)
    pub rows: u16,
    /// Number of columns (characters)
    pub cols: u16,
}

impl ViewportSize {
    /// Create a new viewport size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { rows, cols }
    }

    /// Query the controlling terminal via `TIOCGWINSZ`.
    ///
    /// Fails if the ioctl fails or the terminal reports zero rows or
    /// columns; there is no usable fallback when the size cannot be
    /// determined.
    pub fn query() -> Result<Self> {
        let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
        let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
        if result == -1 {
            return Err(Error::TerminalQuery(io::Error::last_os_error().to_string()));
        }
        if ws.ws_col == 0 || ws.ws_row == 0 {
            return Err(Error::TerminalQuery(format!(
                "terminal reported {}x{}",
                ws.ws_col, ws.ws_row
            )));
        }
        Ok(Self::from(ws))
    }
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl From<libc::winsize> for ViewportSize {
    fn from(ws: libc::winsize) -> Self {
        Self {
            rows: ws.ws_row,
            cols: ws.ws_col,
        }
    }
}
