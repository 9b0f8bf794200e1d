//! Interaction controller
//!
//! The controller owns the grid, validates every user action against the
//! configured bounds and drives the panel state machine. It does no
//! rendering; views read state back through the accessors.

use std::time::Instant;

use tracing::{debug, warn};

use crate::app::state::{CopyFeedback, CopyTarget, StateEvent, StateMachine, ToolState};
use crate::config::grid::{GridBounds, ToolVariant};
use crate::domain::codegen;
use crate::domain::grid::{Axis, GridConfig, GridError};
use crate::domain::mutator::{self, TrackAction};
use crate::domain::track::TrackSize;
use crate::input::field::{FieldInput, NumericField};
use crate::platform::clipboard::Clipboard;

/// Errors reported by controller operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Result of a track click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackClickOutcome {
    /// The track now carries this token
    Changed(TrackSize),
    /// The click had no effect (decrement at floor, or unsupported)
    Unchanged,
}

/// Result of a copy request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Copy failed and was logged; the text is still on screen
    Failed,
    /// The code panel is closed, so there is nothing to copy from
    PanelClosed,
}

/// Main interaction controller
///
/// One controller per tool session. Dropping it discards the grid and any
/// pending copy acknowledgement.
#[derive(Debug, Clone)]
pub struct GridController {
    grid: GridConfig,
    bounds: GridBounds,
    decrement_supported: bool,
    state: ToolState,
    feedback: CopyFeedback,
}

impl GridController {
    /// Creates a controller with the variant's starting grid
    ///
    /// # Example
    /// ```rust
    /// use gridsmith::app::controller::GridController;
    /// use gridsmith::config::{GridBounds, ToolVariant};
    ///
    /// let controller = GridController::new(ToolVariant::Extended, GridBounds::default());
    /// assert_eq!(controller.grid().dimensions(), (3, 2));
    /// ```
    pub fn new(variant: ToolVariant, bounds: GridBounds) -> Self {
        Self::with_grid(variant.initial_grid(), bounds, variant.decrement_supported())
    }

    /// Creates a controller around an existing grid
    ///
    /// The grid is brought within `bounds` first.
    pub fn with_grid(grid: GridConfig, bounds: GridBounds, decrement_supported: bool) -> Self {
        let mut controller = Self {
            grid,
            bounds,
            decrement_supported,
            state: ToolState::default(),
            feedback: CopyFeedback::new(),
        };
        for field in NumericField::ALL {
            let current = controller.field_value(field);
            controller.apply_value(field, current);
        }
        controller
    }

    pub fn grid(&self) -> &GridConfig {
        &self.grid
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn decrement_supported(&self) -> bool {
        self.decrement_supported
    }

    /// Sets the column count, clamped to `[0, max_columns]`
    ///
    /// # Returns
    /// The count actually stored
    pub fn set_column_count(&mut self, requested: i64) -> usize {
        self.set_count(Axis::Column, requested)
    }

    /// Sets the row count, clamped to `[0, max_rows]`
    pub fn set_row_count(&mut self, requested: i64) -> usize {
        self.set_count(Axis::Row, requested)
    }

    /// Sets the column gap, clamped to `[0, max_gap_px]`
    pub fn set_column_gap(&mut self, px: i64) -> u32 {
        self.set_gap(Axis::Column, px)
    }

    /// Sets the row gap, clamped to `[0, max_gap_px]`
    pub fn set_row_gap(&mut self, px: i64) -> u32 {
        self.set_gap(Axis::Row, px)
    }

    /// Current value shown by a numeric field
    pub fn field_value(&self, field: NumericField) -> i64 {
        let axis = field.axis();
        if field.is_gap() {
            i64::from(self.grid.gap(axis))
        } else {
            self.grid.count(axis) as i64
        }
    }

    /// Applies one input event to a numeric field
    ///
    /// # Returns
    /// The value the field holds afterwards
    pub fn apply_field_input(&mut self, field: NumericField, input: &FieldInput) -> i64 {
        let current = self.field_value(field);
        match input.resolve(current) {
            Some(requested) => self.apply_value(field, requested),
            None => current,
        }
    }

    /// Handles a click on a track label
    ///
    /// # Arguments
    /// * `axis` - Column or row strip
    /// * `index` - Track index, must be below the axis count
    /// * `is_secondary` - Right-click / context action
    ///
    /// # Returns
    /// What happened to the track, or `ControllerError` for a bad index
    pub fn on_track_click(
        &mut self,
        axis: Axis,
        index: usize,
        is_secondary: bool,
    ) -> Result<TrackClickOutcome, ControllerError> {
        let current = self.grid.track(axis, index)?.clone();

        if is_secondary && !self.decrement_supported {
            debug!(%axis, index, "secondary click ignored, decrement unsupported");
            return Ok(TrackClickOutcome::Unchanged);
        }

        let action = TrackAction::from_click(is_secondary);
        let next = mutator::next_token(&current, action);
        if next == current {
            return Ok(TrackClickOutcome::Unchanged);
        }

        debug!(%axis, index, from = %current, to = %next, ?action, "track resized");
        self.grid.replace_track(axis, index, next.clone())?;
        Ok(TrackClickOutcome::Changed(next))
    }

    /// Opens the code panel
    pub fn request_code_view(&mut self) -> ToolState {
        self.dispatch(StateEvent::RequestCode)
    }

    /// Closes the code panel via its close button
    pub fn dismiss_code_view(&mut self) -> ToolState {
        self.dispatch(StateEvent::Dismiss)
    }

    /// Closes the code panel via a click outside it
    pub fn overlay_clicked(&mut self) -> ToolState {
        self.dispatch(StateEvent::OverlayClicked)
    }

    pub fn is_code_visible(&self) -> bool {
        self.state == ToolState::ViewingCode
    }

    /// Generated CSS for the current grid
    pub fn css(&self) -> String {
        codegen::generate_css(&self.grid)
    }

    /// Generated HTML skeleton
    pub fn html(&self) -> String {
        codegen::generate_html()
    }

    /// Text a copy of `target` would place on the clipboard
    pub fn snippet(&self, target: CopyTarget) -> String {
        match target {
            CopyTarget::Css => self.css(),
            CopyTarget::Html => self.html(),
        }
    }

    /// Copies a generated snippet to `clipboard`
    ///
    /// Failures are logged and reported as [`CopyOutcome::Failed`]; they
    /// never propagate.
    pub fn copy(
        &mut self,
        target: CopyTarget,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> CopyOutcome {
        if !self.is_code_visible() {
            debug!(%target, "copy ignored, code panel closed");
            return CopyOutcome::PanelClosed;
        }

        match clipboard.set_text(&self.snippet(target)) {
            Ok(()) => {
                self.feedback.mark(target, now);
                debug!(%target, "snippet copied");
                CopyOutcome::Copied
            }
            Err(err) => {
                warn!(%target, error = %err, "failed to copy snippet");
                CopyOutcome::Failed
            }
        }
    }

    /// Whether the copy button for `target` reads "Copied"
    pub fn is_copied(&self, target: CopyTarget, now: Instant) -> bool {
        self.feedback.is_active(target, now)
    }

    /// Expires stale copy acknowledgements
    pub fn tick(&mut self, now: Instant) {
        self.feedback.tick(now);
    }

    fn dispatch(&mut self, event: StateEvent) -> ToolState {
        self.state = StateMachine::process_event(self.state, event);
        self.state
    }

    fn apply_value(&mut self, field: NumericField, requested: i64) -> i64 {
        let axis = field.axis();
        if field.is_gap() {
            i64::from(self.set_gap(axis, requested))
        } else {
            self.set_count(axis, requested) as i64
        }
    }

    fn set_count(&mut self, axis: Axis, requested: i64) -> usize {
        let count = self.bounds.clamp_count(axis, requested);
        if count != self.grid.count(axis) {
            debug!(%axis, requested, count, "track count changed");
        }
        self.grid.set_count(axis, count);
        count
    }

    fn set_gap(&mut self, axis: Axis, requested: i64) -> u32 {
        let px = self.bounds.clamp_gap(requested);
        self.grid.set_gap(axis, px);
        px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::clipboard::{ClipboardError, MemoryClipboard};
    use std::time::Duration;

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Busy)
        }
    }

    fn extended() -> GridController {
        GridController::new(ToolVariant::Extended, GridBounds::default())
    }

    #[test]
    fn controller_creation() {
        let controller = extended();
        assert_eq!(controller.grid().dimensions(), (3, 2));
        assert_eq!(controller.state(), ToolState::Editing);
        assert!(controller.decrement_supported());

        let basic = GridController::new(ToolVariant::Basic, GridBounds::default());
        assert_eq!(basic.grid().dimensions(), (5, 5));
        assert!(!basic.decrement_supported());
    }

    #[test]
    fn with_grid_applies_bounds() {
        let controller = GridController::with_grid(
            GridConfig::new(30, 30),
            GridBounds::default(),
            true,
        );
        assert_eq!(controller.grid().dimensions(), (12, 20));
    }

    #[test]
    fn counts_are_clamped() {
        let mut controller = extended();
        assert_eq!(controller.set_column_count(-5), 0);
        assert_eq!(controller.set_column_count(99), 12);
        assert_eq!(controller.set_row_count(99), 20);
        assert_eq!(controller.grid().column_sizes().len(), 12);
        assert_eq!(controller.grid().row_sizes().len(), 20);
    }

    #[test]
    fn gaps_are_clamped() {
        let mut controller = extended();
        assert_eq!(controller.set_column_gap(-3), 0);
        assert_eq!(controller.set_row_gap(250), 20);
        assert_eq!(controller.set_column_gap(8), 8);
        assert_eq!(controller.grid().column_gap_px(), 8);
    }

    #[test]
    fn field_inputs_route_to_setters() {
        let mut controller = extended();
        let columns = NumericField::Columns;

        assert_eq!(controller.apply_field_input(columns, &FieldInput::StepUp), 4);
        assert_eq!(controller.apply_field_input(columns, &FieldInput::Wheel(120)), 3);
        assert_eq!(
            controller.apply_field_input(columns, &FieldInput::Typed("abc".into())),
            0
        );
        assert_eq!(controller.apply_field_input(columns, &FieldInput::StepDown), 0);
        assert_eq!(controller.apply_field_input(columns, &FieldInput::Wheel(0)), 0);

        let gap = NumericField::RowGap;
        assert_eq!(
            controller.apply_field_input(gap, &FieldInput::Typed("15px".into())),
            15
        );
        assert_eq!(controller.grid().row_gap_px(), 15);
    }

    #[test]
    fn zero_wheel_delta_keeps_value() {
        let mut controller = extended();
        let rows = NumericField::Rows;
        assert_eq!(controller.apply_field_input(rows, &FieldInput::Wheel(0)), 2);
        assert_eq!(controller.grid().row_count(), 2);
    }

    #[test]
    fn primary_click_cycles() {
        let mut controller = extended();
        let mut seen = Vec::new();
        for _ in 0..4 {
            controller.on_track_click(Axis::Column, 0, false).unwrap();
            seen.push(controller.grid().column_sizes()[0].to_string());
        }
        assert_eq!(seen, ["2fr", "3fr", "4fr", "1fr"]);
    }

    #[test]
    fn secondary_click_decrements_to_floor() {
        let mut controller = extended();
        controller.on_track_click(Axis::Row, 1, false).unwrap();

        let outcome = controller.on_track_click(Axis::Row, 1, true).unwrap();
        assert_eq!(outcome, TrackClickOutcome::Changed(TrackSize::fr(1)));

        let outcome = controller.on_track_click(Axis::Row, 1, true).unwrap();
        assert_eq!(outcome, TrackClickOutcome::Unchanged);
        assert_eq!(controller.grid().row_sizes()[1].as_str(), "1fr");
    }

    #[test]
    fn secondary_click_ignored_without_capability() {
        let mut controller = GridController::new(ToolVariant::Basic, GridBounds::default());
        controller.on_track_click(Axis::Column, 2, false).unwrap();

        let outcome = controller.on_track_click(Axis::Column, 2, true).unwrap();
        assert_eq!(outcome, TrackClickOutcome::Unchanged);
        assert_eq!(controller.grid().column_sizes()[2].as_str(), "2fr");
    }

    #[test]
    fn out_of_range_click_is_an_error() {
        let mut controller = extended();
        let before = controller.grid().clone();
        let err = controller.on_track_click(Axis::Column, 3, false).unwrap_err();
        assert_eq!(
            err,
            ControllerError::Grid(GridError::TrackOutOfRange {
                axis: Axis::Column,
                index: 3,
                count: 3
            })
        );
        assert_eq!(controller.grid(), &before);
    }

    #[test]
    fn code_view_transitions() {
        let mut controller = extended();
        assert_eq!(controller.request_code_view(), ToolState::ViewingCode);
        assert!(controller.is_code_visible());
        assert_eq!(controller.overlay_clicked(), ToolState::Editing);
        controller.request_code_view();
        assert_eq!(controller.dismiss_code_view(), ToolState::Editing);
    }

    #[test]
    fn grid_stays_editable_while_viewing_code() {
        let mut controller = extended();
        controller.request_code_view();
        controller.set_column_count(4);
        assert!(controller.css().contains("grid-template-columns: 1fr 1fr 1fr 1fr;"));
    }

    #[test]
    fn copy_requires_open_panel() {
        let mut controller = extended();
        let mut clipboard = MemoryClipboard::new();
        let now = Instant::now();

        let outcome = controller.copy(CopyTarget::Css, &mut clipboard, now);
        assert_eq!(outcome, CopyOutcome::PanelClosed);
        assert_eq!(clipboard.contents(), None);
    }

    #[test]
    fn copy_sets_acknowledgement() {
        let mut controller = extended();
        let mut clipboard = MemoryClipboard::new();
        let now = Instant::now();
        controller.request_code_view();

        let outcome = controller.copy(CopyTarget::Html, &mut clipboard, now);
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(clipboard.contents(), Some("<div class=\"parent\">\n</div>"));
        assert!(controller.is_copied(CopyTarget::Html, now + Duration::from_secs(1)));
        assert!(!controller.is_copied(CopyTarget::Css, now));

        controller.tick(now + Duration::from_secs(3));
        assert!(!controller.is_copied(CopyTarget::Html, now + Duration::from_secs(3)));
    }

    #[test]
    fn failed_copy_is_reported_not_raised() {
        let mut controller = extended();
        let now = Instant::now();
        controller.request_code_view();

        let outcome = controller.copy(CopyTarget::Css, &mut FailingClipboard, now);
        assert_eq!(outcome, CopyOutcome::Failed);
        assert!(!controller.is_copied(CopyTarget::Css, now));
        assert!(controller.is_code_visible());
    }
}
