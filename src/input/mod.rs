//! User input decoding
//!
//! Turns raw user events into values the controller understands: numeric
//! field edits and whole command lines.

pub mod commands;
pub mod field;

pub use commands::{Command, CommandError};
pub use field::{FieldInput, NumericField};
