//! Library exports for pngclip.
//!
//! [`clipboard::Clipboard`] is the single entry point for putting a PNG on the system
//! clipboard; [`output`] keeps a copy on disk when that fails.

pub mod clipboard;
pub mod config;
pub mod output;

pub use clipboard::{Clipboard, ClipboardError, CopyResult};
pub use config::Config;
