//! Frame composition
//!
//! Builds one complete escape-sequence program per refresh into a single
//! buffer and hands it to the terminal in one write. The cursor is hidden
//! before any row content changes and shown again only after the final
//! cursor placement; together with the single flush this is what keeps
//! redraws flicker-free.

use std::io::Write;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::size::ViewportSize;

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
const CURSOR_HOME: &[u8] = b"\x1b[H";
const ERASE_LINE: &[u8] = b"\x1b[K";

/// Clear the whole screen and park the cursor at the top-left. Written
/// on quit and on the fatal-error path so the shell stays readable.
pub const CLEAR_AND_HOME: &[u8] = b"\x1b[2J\x1b[H";

/// Supplies the text for each visible row.
///
/// The editing core implements this over its line buffer; rows without
/// content return `None` and draw as the placeholder marker.
pub trait RowProvider {
    fn row(&self, y: u16) -> Option<&str>;
}

/// A document with no content; every row draws as a placeholder.
#[derive(Debug, Default)]
pub struct EmptyDocument;

impl RowProvider for EmptyDocument {
    fn row(&self, _y: u16) -> Option<&str> {
        None
    }
}

/// One in-progress frame: an append-only byte buffer flushed exactly
/// once per refresh.
///
/// The buffer is owned exclusively for the duration of one cycle and
/// never read mid-construction; nothing reaches the terminal before
/// [`flush`](Frame::flush).
#[derive(Debug, Default)]
pub struct Frame {
    buf: Vec<u8>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write the whole frame to `sink` in one call and clear the buffer.
    pub fn flush(&mut self, sink: &mut impl Write) -> Result<()> {
        sink.write_all(&self.buf)?;
        sink.flush()?;
        self.buf.clear();
        Ok(())
    }
}

/// Append one full-frame escape program to `frame`:
/// hide cursor, home, every viewport row top-to-bottom (each erased to
/// end of line), the 1-based cursor position, show cursor. The caller
/// flushes afterwards.
pub fn compose(
    frame: &mut Frame,
    size: ViewportSize,
    cursor: Cursor,
    provider: &impl RowProvider,
    banner: bool,
) {
    frame.push_bytes(HIDE_CURSOR);
    frame.push_bytes(CURSOR_HOME);

    for y in 0..size.rows {
        match provider.row(y) {
            Some(text) => frame.push_str(clip_to_width(text, size.cols as usize)),
            None if banner && y == size.rows / 3 => push_banner(frame, size.cols as usize),
            None => frame.push_str("~"),
        }
        frame.push_bytes(ERASE_LINE);
        if y + 1 < size.rows {
            frame.push_str("\r\n");
        }
    }

    // 0-based model position to the terminal's 1-based coordinates
    frame.push_str(&format!("\x1b[{};{}H", cursor.y + 1, cursor.x + 1));
    frame.push_bytes(SHOW_CURSOR);
}

/// Center the product banner on an otherwise empty row.
fn push_banner(frame: &mut Frame, cols: usize) {
    let banner = format!("quill editor -- version {}", env!("CARGO_PKG_VERSION"));
    let banner = clip_to_width(&banner, cols);
    let mut padding = cols.saturating_sub(banner.width()) / 2;
    if padding > 0 {
        frame.push_str("~");
        padding -= 1;
    }
    for _ in 0..padding {
        frame.push_str(" ");
    }
    frame.push_str(banner);
}

/// Clip `text` to at most `cols` display columns.
fn clip_to_width(text: &str, cols: usize) -> &str {
    let mut width = 0;
    for (i, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > cols {
            return &text[..i];
        }
        width += w;
    }
    text
}
