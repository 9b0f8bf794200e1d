//! Platform integrations
//!
//! Keeps operating system calls behind small traits so the rest of the
//! application stays portable and testable.

pub mod clipboard;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
