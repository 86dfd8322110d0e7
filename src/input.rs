//! Input decoding
//!
//! Turns the raw byte stream from the terminal into logical key events.
//! Only the 3-byte CSI arrow sequences are recognized for now; any other
//! escape sequence degrades to a bare [`Key::Escape`] event rather than
//! blocking for bytes that may never arrive.

use std::io::{self, Read};

use log::trace;

use crate::error::Result;

const ESC: u8 = 0x1b;

/// A decoded key event.
///
/// Constructed once per read cycle and consumed immediately by dispatch.
/// Future key families (function keys, Home/End, page keys) extend this
/// enum rather than adding sentinel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character byte
    Char(u8),
    /// Control combination, carrying the un-shifted key in caret
    /// notation: Ctrl-Q arrives as `Ctrl(b'q')`, DEL as `Ctrl(b'?')`
    Ctrl(u8),
    /// Bare escape, or an escape sequence we do not recognize
    Escape,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl Key {
    /// Classify a single non-escape input byte.
    fn from_byte(b: u8) -> Self {
        match b {
            // Ctrl-A .. Ctrl-Z map back to their lowercase letters
            0x01..=0x1a => Key::Ctrl(b | 0x60),
            // Remaining control bytes in caret notation (^@, ^\, ^?, ...)
            0x00 | 0x1c..=0x1f | 0x7f => Key::Ctrl(b ^ 0x40),
            _ => Key::Char(b),
        }
    }
}

/// Decodes key events from a raw byte stream.
///
/// Generic over the reader so tests can drive it with in-memory input.
/// With the terminal in raw mode (`VMIN=0`, `VTIME=1`) a read returns
/// zero bytes after the idle timeout, which surfaces here as `Ok(None)`.
pub struct KeyDecoder<R> {
    input: R,
}

impl<R: Read> KeyDecoder<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Read and decode one key event.
    ///
    /// Returns `Ok(None)` when the idle timeout elapsed before any input
    /// arrived; no event is produced and decoding resumes on the next
    /// call. Read errors other than `WouldBlock`/`Interrupted` propagate
    /// and are fatal upstream.
    pub fn poll_key(&mut self) -> Result<Option<Key>> {
        let b = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(None),
        };

        if b != ESC {
            let key = Key::from_byte(b);
            trace!("decoded {:?}", key);
            return Ok(Some(key));
        }

        // Escape: try to complete a 3-byte CSI sequence within this call.
        // A sequence split across read boundaries degrades to a bare
        // escape so the loop never waits unboundedly for a tail that may
        // never come.
        let b1 = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(Some(Key::Escape)),
        };
        let b2 = match self.read_byte()? {
            Some(b) => b,
            None => return Ok(Some(Key::Escape)),
        };

        let key = match (b1, b2) {
            (b'[', b'A') => Key::ArrowUp,
            (b'[', b'B') => Key::ArrowDown,
            (b'[', b'C') => Key::ArrowRight,
            (b'[', b'D') => Key::ArrowLeft,
            // Reserved: numeric CSI parameters, SS3, function keys
            _ => Key::Escape,
        };
        trace!("decoded {:?}", key);
        Ok(Some(key))
    }

    /// One byte from the input; `None` on a timed-out (zero-byte) read.
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }
}
