//! Main application loop
//!
//! Owns the editor context (viewport size, cursor, frame buffer) and
//! runs the refresh-read-dispatch cycle. Single-threaded: one thread
//! owns the terminal and the frame buffer, and the only suspension
//! point is the bounded input read, so the loop regains control at
//! least every idle-timeout interval.

use std::io::{Read, Write};

use log::{debug, info};

use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::Result;
use crate::input::{Key, KeyDecoder};
use crate::renderer::{self, Frame, RowProvider};
use crate::size::ViewportSize;

/// Receives every key not claimed by quit or movement.
///
/// The editing core plugs in here; until one is attached the default
/// sink just records the event for diagnostics.
pub trait KeySink {
    fn handle(&mut self, key: Key);
}

/// Default sink used when no editing core is attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl KeySink for LogSink {
    fn handle(&mut self, key: Key) {
        debug!("unhandled key: {:?}", key);
    }
}

/// Editor application state
pub struct App {
    size: ViewportSize,
    cursor: Cursor,
    frame: Frame,
    banner: bool,
}

impl App {
    pub fn new(config: &Config, size: ViewportSize) -> Self {
        Self {
            size,
            cursor: Cursor::new(),
            frame: Frame::new(),
            banner: config.banner,
        }
    }

    /// Run the event loop until the quit key (Ctrl-Q) arrives.
    ///
    /// Each iteration repaints the screen, then reads and dispatches one
    /// key event. An idle timeout dispatches nothing and loops again.
    /// On quit a final clear-and-home frame is written before returning.
    pub fn run<R: Read, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
        provider: &impl RowProvider,
        sink: &mut impl KeySink,
    ) -> Result<()> {
        let mut decoder = KeyDecoder::new(input);
        loop {
            self.refresh(output, provider)?;
            let key = match decoder.poll_key()? {
                Some(key) => key,
                None => continue,
            };
            match key {
                Key::Ctrl(b'q') => {
                    info!("quit requested");
                    self.frame.push_bytes(renderer::CLEAR_AND_HOME);
                    self.frame.flush(output)?;
                    return Ok(());
                }
                Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                    self.cursor.move_key(key, self.size);
                }
                other => sink.handle(other),
            }
        }
    }

    /// Current cursor position (for tests and status reporting)
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn refresh<W: Write>(&mut self, output: &mut W, provider: &impl RowProvider) -> Result<()> {
        renderer::compose(&mut self.frame, self.size, self.cursor, provider, self.banner);
        self.frame.flush(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::EmptyDocument;
    use std::io::Cursor as IoCursor;

    struct CollectSink(Vec<Key>);

    impl KeySink for CollectSink {
        fn handle(&mut self, key: Key) {
            self.0.push(key);
        }
    }

    /// Reader that reports a timeout (zero-byte read) between chunks.
    struct ChunkedInput {
        chunks: Vec<Vec<u8>>,
        pos: usize,
        offset: usize,
    }

    impl ChunkedInput {
        fn new(chunks: &[&[u8]]) -> Self {
            Self {
                chunks: chunks.iter().map(|c| c.to_vec()).collect(),
                pos: 0,
                offset: 0,
            }
        }
    }

    impl std::io::Read for ChunkedInput {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.pos >= self.chunks.len() {
                return Ok(0);
            }
            let chunk = &self.chunks[self.pos];
            if self.offset < chunk.len() {
                buf[0] = chunk[self.offset];
                self.offset += 1;
                return Ok(1);
            }
            self.pos += 1;
            self.offset = 0;
            Ok(0)
        }
    }

    fn run_script(bytes: &[u8]) -> (App, Vec<u8>, Vec<Key>) {
        let config = Config::default();
        let mut app = App::new(&config, ViewportSize::new(80, 24));
        let mut output = Vec::new();
        let mut sink = CollectSink(Vec::new());
        app.run(
            IoCursor::new(bytes.to_vec()),
            &mut output,
            &EmptyDocument,
            &mut sink,
        )
        .expect("loop runs to quit");
        (app, output, sink.0)
    }

    const CTRL_Q: u8 = 0x11;

    #[test]
    fn test_quit_writes_final_clear() {
        let (_, output, _) = run_script(&[CTRL_Q]);
        assert!(output.ends_with(renderer::CLEAR_AND_HOME));
    }

    #[test]
    fn test_movement_updates_cursor() {
        let (app, _, _) = run_script(b"\x1b[C\x1b[C\x1b[B\x11");
        assert_eq!(app.cursor(), crate::cursor::Cursor { x: 2, y: 1 });
    }

    #[test]
    fn test_movement_round_trip() {
        let (app, _, _) = run_script(b"\x1b[C\x1b[D\x11");
        assert_eq!(app.cursor(), crate::cursor::Cursor { x: 0, y: 0 });
    }

    #[test]
    fn test_unclaimed_keys_reach_sink() {
        let (_, _, keys) = run_script(b"ab\x1b[Z\x11");
        assert_eq!(
            keys,
            vec![Key::Char(b'a'), Key::Char(b'b'), Key::Escape]
        );
    }

    #[test]
    fn test_one_frame_per_dispatched_key() {
        // refresh before every read: 3 keys + quit = 4 frames, then the
        // final clear. Each frame hides the cursor exactly once.
        let (_, output, _) = run_script(b"ab\x1b[C\x11");
        let out = String::from_utf8(output).unwrap();
        assert_eq!(out.matches("\x1b[?25l").count(), 4);
    }

    #[test]
    fn test_timeouts_keep_looping() {
        // An empty chunk is a pure timeout: no event is dispatched, the
        // screen repaints, and the loop keeps waiting for the quit key.
        let config = Config::default();
        let mut app = App::new(&config, ViewportSize::new(80, 24));
        let mut output = Vec::new();
        let mut sink = CollectSink(Vec::new());
        app.run(
            ChunkedInput::new(&[b"", &[CTRL_Q]]),
            &mut output,
            &EmptyDocument,
            &mut sink,
        )
        .expect("loop runs to quit");
        let out = String::from_utf8(output).unwrap();
        assert!(sink.0.is_empty());
        // one frame for the timeout iteration, one before the quit read
        assert_eq!(out.matches("\x1b[?25l").count(), 2);
        assert!(out.ends_with("\x1b[2J\x1b[H"));
    }

    #[test]
    fn test_split_escape_degrades_without_blocking() {
        // ESC whose tail arrives after a timeout: the decoder reports a
        // bare escape instead of waiting, and the leftover bytes decode
        // as literals on later iterations.
        let config = Config::default();
        let mut app = App::new(&config, ViewportSize::new(80, 24));
        let mut output = Vec::new();
        let mut sink = CollectSink(Vec::new());
        app.run(
            ChunkedInput::new(&[b"\x1b", b"[A", &[CTRL_Q]]),
            &mut output,
            &EmptyDocument,
            &mut sink,
        )
        .expect("loop runs to quit");
        assert_eq!(
            sink.0,
            vec![Key::Escape, Key::Char(b'['), Key::Char(b'A')]
        );
    }
}
