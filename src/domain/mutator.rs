//! Track size mutation rules
//!
//! Pure functions only. Increment cycles the `fr` value through 1..=4,
//! decrement steps down and stops at 1.

use crate::domain::track::TrackSize;

/// Smallest `fr` value a track can take
pub const MIN_FR: u32 = 1;
/// Largest `fr` value before increment wraps back to [`MIN_FR`]
pub const MAX_FR: u32 = 4;

/// Direction of a track size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackAction {
    /// Primary click: +1fr, wrapping after [`MAX_FR`]
    Increment,
    /// Secondary click: -1fr, never below [`MIN_FR`]
    Decrement,
}

impl TrackAction {
    /// Maps a click on a track label to an action
    pub fn from_click(is_secondary: bool) -> Self {
        if is_secondary {
            TrackAction::Decrement
        } else {
            TrackAction::Increment
        }
    }
}

/// Computes the token that replaces `current` after `action`
///
/// # Arguments
/// * `current` - Token currently shown on the track label
/// * `action` - Requested direction
///
/// # Returns
/// The next token. A decrement at the floor returns `current` unchanged.
///
/// # Example
/// ```rust
/// use gridsmith::domain::mutator::{next_token, TrackAction};
/// use gridsmith::domain::track::TrackSize;
///
/// let next = next_token(&TrackSize::from("4fr"), TrackAction::Increment);
/// assert_eq!(next.as_str(), "1fr");
/// ```
pub fn next_token(current: &TrackSize, action: TrackAction) -> TrackSize {
    let base = current.base_value();

    match action {
        TrackAction::Increment => {
            let next = if base >= MAX_FR { MIN_FR } else { base + 1 };
            TrackSize::fr(next)
        }
        TrackAction::Decrement => {
            if base <= MIN_FR {
                return current.clone();
            }
            TrackSize::fr(base - 1)
        }
    }
}
