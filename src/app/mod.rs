//! Application orchestration layer
//!
//! This module coordinates between input, domain, UI, and platform layers.
//! It manages the tool state and routes decoded commands to the controller.

pub mod controller;
pub mod session;
pub mod state;

pub use controller::{ControllerError, CopyOutcome, GridController, TrackClickOutcome};
pub use session::{Session, SessionError, Step};
pub use state::{CopyTarget, StateEvent, ToolState};
