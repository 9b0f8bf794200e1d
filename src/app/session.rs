//! Interactive session
//!
//! Glues a [`GridController`] to everything around it: the theme, the
//! preview renderer, the clipboard and the optional settings store. The
//! binary feeds it decoded commands; tests drive it the same way.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::app::controller::{ControllerError, CopyOutcome, GridController, TrackClickOutcome};
use crate::app::state::{CopyTarget, StateEvent};
use crate::config::settings::{SettingsError, SettingsStore};
use crate::config::theme::{Theme, ThemeContext};
use crate::domain::grid::Axis;
use crate::domain::track;
use crate::input::commands::{Command, HELP};
use crate::input::field::{FieldInput, NumericField};
use crate::platform::clipboard::Clipboard;
use crate::ui::code_panel::CodePanel;
use crate::ui::renderer::{
    PreviewLayout, PreviewRenderer, RendererError, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};

/// Errors surfaced to the user for a single command
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// What the caller should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the text and read the next command
    Continue(String),
    Quit,
}

/// One running tool instance
pub struct Session {
    controller: GridController,
    theme: ThemeContext,
    renderer: PreviewRenderer,
    clipboard: Box<dyn Clipboard>,
    store: Option<SettingsStore>,
    color: bool,
}

impl Session {
    /// # Arguments
    /// * `controller` - Controller holding the starting grid
    /// * `theme` - Resolved theme context
    /// * `clipboard` - Destination for copy commands
    pub fn new(
        controller: GridController,
        theme: ThemeContext,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        Self {
            controller,
            theme,
            renderer: PreviewRenderer::new(),
            clipboard,
            store: None,
            color: false,
        }
    }

    /// Uses `renderer` for preview output
    pub fn with_renderer(mut self, renderer: PreviewRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Persists theme changes through `store`
    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Highlights code panel lines with ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn controller(&self) -> &GridController {
        &self.controller
    }

    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    /// Runs one command
    ///
    /// Expired copy acknowledgements are cleared first so every reply
    /// reflects the state at `now`.
    pub fn execute(&mut self, command: Command, now: Instant) -> Result<Step, SessionError> {
        self.controller.tick(now);

        let reply = match command {
            Command::Field(field, input) => self.edit_field(field, &input),
            Command::TrackClick {
                axis,
                index,
                secondary,
            } => self.click_track(axis, index, secondary)?,
            Command::Pointer { x, y, secondary } => self.pointer(x, y, secondary)?,
            Command::RequestCode => {
                self.controller.request_code_view();
                self.panel_text(now)
            }
            Command::DismissCode => self.close_panel(StateEvent::Dismiss),
            Command::OverlayClick => self.close_panel(StateEvent::OverlayClicked),
            Command::Copy(target) => self.copy(target, now),
            Command::Show => {
                let mut text = self.summary();
                if self.controller.is_code_visible() {
                    text.push_str("\n\n");
                    text.push_str(&self.panel_text(now));
                }
                text
            }
            Command::Preview(path) => self.write_preview(&path)?,
            Command::SetTheme(theme) => self.set_theme(theme),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Step::Quit),
        };

        Ok(Step::Continue(reply))
    }

    /// One-paragraph description of the current grid
    pub fn summary(&self) -> String {
        let grid = self.controller.grid();
        let (columns, rows) = grid.dimensions();
        let panel = if self.controller.is_code_visible() {
            "open"
        } else {
            "closed"
        };
        [
            format!("grid {columns}x{rows}"),
            format!("  columns: {}", track::join(grid.column_sizes())),
            format!("  rows: {}", track::join(grid.row_sizes())),
            format!(
                "  gaps: {}px column, {}px row",
                grid.column_gap_px(),
                grid.row_gap_px()
            ),
            format!("  theme: {}", self.theme.theme()),
            format!("  code panel: {panel}"),
        ]
        .join("\n")
    }

    /// Layout of the preview at the default canvas size
    pub fn layout(&self) -> Result<PreviewLayout, RendererError> {
        PreviewLayout::compute(
            self.controller.grid(),
            DEFAULT_CANVAS_WIDTH,
            DEFAULT_CANVAS_HEIGHT,
        )
    }

    fn edit_field(&mut self, field: NumericField, input: &FieldInput) -> String {
        let value = self.controller.apply_field_input(field, input);
        format!("{}: {value}", field.label())
    }

    fn click_track(
        &mut self,
        axis: Axis,
        index: usize,
        secondary: bool,
    ) -> Result<String, SessionError> {
        let reply = match self.controller.on_track_click(axis, index, secondary)? {
            TrackClickOutcome::Changed(token) => format!("{axis} {index}: {token}"),
            TrackClickOutcome::Unchanged => {
                let current = self
                    .controller
                    .grid()
                    .track(axis, index)
                    .map_err(ControllerError::from)?;
                format!("{axis} {index}: {current} (unchanged)")
            }
        };
        Ok(reply)
    }

    fn pointer(&mut self, x: i32, y: i32, secondary: bool) -> Result<String, SessionError> {
        match self.layout()?.track_at(x, y) {
            Some((axis, index)) => self.click_track(axis, index, secondary),
            None => Ok(format!("no track label at ({x}, {y})")),
        }
    }

    fn copy(&mut self, target: CopyTarget, now: Instant) -> String {
        match self.controller.copy(target, self.clipboard.as_mut(), now) {
            CopyOutcome::Copied => format!("{target} copied"),
            CopyOutcome::Failed => {
                format!("could not copy {target}, select it from the panel instead")
            }
            CopyOutcome::PanelClosed => "open the code panel first ('code')".to_string(),
        }
    }

    fn write_preview(&self, path: &Path) -> Result<String, SessionError> {
        let layout = self.layout()?;
        self.renderer.save_png(&layout, &self.theme, path)?;
        Ok(format!("preview written to {}", path.display()))
    }

    fn set_theme(&mut self, theme: Theme) -> String {
        self.theme.set(theme);
        info!(%theme, "theme changed");

        let Some(store) = &self.store else {
            return format!("theme: {theme}");
        };
        match store.save_theme(theme) {
            Ok(()) => format!("theme: {theme} (saved)"),
            Err(err) => {
                warn!(error = %err, "failed to persist theme");
                format!("theme: {theme} (not saved: {err})")
            }
        }
    }

    fn close_panel(&mut self, event: StateEvent) -> String {
        if !self.controller.is_code_visible() {
            return "nothing to close".to_string();
        }
        match event {
            StateEvent::OverlayClicked => self.controller.overlay_clicked(),
            _ => self.controller.dismiss_code_view(),
        };
        "code panel closed".to_string()
    }

    fn panel_text(&self, now: Instant) -> String {
        CodePanel::from_controller(&self.controller, now)
            .to_text(self.color)
            .trim_end()
            .to_string()
    }
}
