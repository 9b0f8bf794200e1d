//! Tool state management
//!
//! Defines the two-state panel machine and the transient "copied"
//! acknowledgement shown on the copy buttons.

use std::time::{Duration, Instant};

use tracing::debug;

/// How long a copy button reads "Copied" after a successful copy
pub const COPY_ACK_DURATION: Duration = Duration::from_secs(2);

/// Visible state of the tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Controls and preview visible, code panel hidden
    #[default]
    Editing,
    /// Code panel open over the preview
    ViewingCode,
}

/// Possible state transition events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// "Get code" was triggered
    RequestCode,
    /// Close button on the panel
    Dismiss,
    /// Click on the dimmed overlay outside the panel
    OverlayClicked,
}

/// State machine for panel visibility
pub struct StateMachine;

impl StateMachine {
    /// Processes a state event and returns the new state
    ///
    /// # Arguments
    /// * `current_state` - Current tool state
    /// * `event` - Event to process
    ///
    /// # Returns
    /// New tool state after processing the event
    pub fn process_event(current_state: ToolState, event: StateEvent) -> ToolState {
        let next = match (current_state, event) {
            (ToolState::Editing, StateEvent::RequestCode) => ToolState::ViewingCode,
            (ToolState::ViewingCode, StateEvent::Dismiss) => ToolState::Editing,
            (ToolState::ViewingCode, StateEvent::OverlayClicked) => ToolState::Editing,

            // Invalid transitions - ignore event
            (state, _) => state,
        };

        if next != current_state {
            debug!(from = ?current_state, to = ?next, ?event, "tool state changed");
        }
        next
    }
}

/// Which generated snippet a copy refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Css,
    Html,
}

impl std::fmt::Display for CopyTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyTarget::Css => f.write_str("CSS"),
            CopyTarget::Html => f.write_str("HTML"),
        }
    }
}

/// Per-target acknowledgement timers
///
/// Each successful copy records its instant. The acknowledgement is active
/// for [`COPY_ACK_DURATION`] and then clears itself on the next `tick`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyFeedback {
    css_copied_at: Option<Instant>,
    html_copied_at: Option<Instant>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the acknowledgement for `target`
    pub fn mark(&mut self, target: CopyTarget, now: Instant) {
        *self.slot_mut(target) = Some(now);
    }

    /// Checks whether `target` should still read "Copied"
    pub fn is_active(&self, target: CopyTarget, now: Instant) -> bool {
        match self.slot(target) {
            Some(copied_at) => now.saturating_duration_since(copied_at) < COPY_ACK_DURATION,
            None => false,
        }
    }

    /// Drops every expired acknowledgement
    pub fn tick(&mut self, now: Instant) {
        for target in [CopyTarget::Css, CopyTarget::Html] {
            if self.slot(target).is_some() && !self.is_active(target, now) {
                debug!(%target, "copy acknowledgement expired");
                *self.slot_mut(target) = None;
            }
        }
    }

    /// Returns true when no acknowledgement is pending
    pub fn is_idle(&self) -> bool {
        self.css_copied_at.is_none() && self.html_copied_at.is_none()
    }

    fn slot(&self, target: CopyTarget) -> Option<Instant> {
        match target {
            CopyTarget::Css => self.css_copied_at,
            CopyTarget::Html => self.html_copied_at,
        }
    }

    fn slot_mut(&mut self, target: CopyTarget) -> &mut Option<Instant> {
        match target {
            CopyTarget::Css => &mut self.css_copied_at,
            CopyTarget::Html => &mut self.html_copied_at,
        }
    }
}
