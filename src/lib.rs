//! Gridsmith: an interactive CSS grid layout generator
//!
//! The user picks column and row counts, gap sizes and per-track `fr`
//! weights; the tool keeps a live preview and produces matching CSS and
//! HTML that can be copied to the clipboard.
//!
//! Layers, from the bottom up:
//! * [`domain`] - grid configuration, track mutation, code generation
//! * [`config`] - bounds, variants, theme and the settings file
//! * [`input`] - numeric field events and command decoding
//! * [`platform`] - clipboard access
//! * [`ui`] - preview layout/rasterization and the code panel
//! * [`app`] - controller, panel state machine and the session loop

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod logging;
pub mod platform;
pub mod ui;
