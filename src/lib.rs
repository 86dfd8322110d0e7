//! Quill editor core
//!
//! The rendering-and-input core of a terminal screen editor:
//! - raw terminal mode with guaranteed restore on every exit path
//! - decoding of raw bytes (including CSI arrow sequences) into key events
//! - a cursor model clamped to the viewport
//! - single-buffer, single-flush frame composition per input cycle
//!
//! Document storage, text editing, highlighting, and search live outside
//! this crate; they attach through the [`RowProvider`] and [`KeySink`]
//! seams.

pub mod app;
pub mod config;
pub mod cursor;
pub mod error;
pub mod input;
pub mod renderer;
pub mod size;
pub mod term;

pub use app::{App, KeySink, LogSink};
pub use config::{CliArgs, Config};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use input::{Key, KeyDecoder};
pub use renderer::{EmptyDocument, Frame, RowProvider};
pub use size::ViewportSize;
pub use term::RawMode;
