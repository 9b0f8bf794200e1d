//! Code panel view model
//!
//! Builds what the "get code" panel shows: a CSS section and an HTML
//! section, each with its copy button caption and per-line highlighting of
//! the grid properties. Drawing is left to the caller; [`CodePanel::to_text`]
//! renders the terminal version.

use std::fmt::Write as _;
use std::time::Instant;

use crate::app::controller::GridController;
use crate::app::state::CopyTarget;

/// Caption of an idle copy button
pub const COPY_CAPTION: &str = "Copy";
/// Caption while the copy acknowledgement is active
pub const COPIED_CAPTION: &str = "Copied";

/// Substrings that mark a line as a grid property worth highlighting
const HIGHLIGHT_MARKERS: [&str; 4] = [
    "display:",
    "grid-template-",
    "grid-column-gap",
    "grid-row-gap",
];

const ANSI_HIGHLIGHT: &str = "\x1b[36m";
const ANSI_RESET: &str = "\x1b[0m";

/// One line of generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLine {
    pub text: String,
    pub highlighted: bool,
}

/// A titled block of code with its copy button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSection {
    pub target: CopyTarget,
    pub lines: Vec<CodeLine>,
    pub copied: bool,
}

impl CodeSection {
    /// Splits `source` into lines and marks the grid properties
    pub fn new(target: CopyTarget, source: &str, copied: bool) -> Self {
        let lines = source
            .lines()
            .map(|line| CodeLine {
                text: line.to_string(),
                highlighted: is_highlighted(line),
            })
            .collect();
        Self {
            target,
            lines,
            copied,
        }
    }

    pub fn title(&self) -> String {
        self.target.to_string()
    }

    /// "Copied" while the acknowledgement runs, "Copy" otherwise
    pub fn caption(&self) -> &'static str {
        if self.copied {
            COPIED_CAPTION
        } else {
            COPY_CAPTION
        }
    }
}

/// Everything the open code panel displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodePanel {
    pub css: CodeSection,
    pub html: CodeSection,
}

impl CodePanel {
    /// # Arguments
    /// * `css` - Generated stylesheet
    /// * `html` - Generated markup
    /// * `css_copied` - Whether the CSS button is acknowledging a copy
    /// * `html_copied` - Whether the HTML button is acknowledging a copy
    pub fn build(css: &str, html: &str, css_copied: bool, html_copied: bool) -> Self {
        Self {
            css: CodeSection::new(CopyTarget::Css, css, css_copied),
            html: CodeSection::new(CopyTarget::Html, html, html_copied),
        }
    }

    /// Builds the panel from the controller's current grid and copy state
    pub fn from_controller(controller: &GridController, now: Instant) -> Self {
        Self::build(
            &controller.css(),
            &controller.html(),
            controller.is_copied(CopyTarget::Css, now),
            controller.is_copied(CopyTarget::Html, now),
        )
    }

    pub fn sections(&self) -> [&CodeSection; 2] {
        [&self.css, &self.html]
    }

    /// Renders the panel for a terminal
    ///
    /// Highlighted lines are wrapped in ANSI color codes when `color` is set.
    pub fn to_text(&self, color: bool) -> String {
        let mut out = String::new();
        for (i, section) in self.sections().into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{} [{}]", section.title(), section.caption());
            for line in &section.lines {
                if color && line.highlighted {
                    let _ = writeln!(out, "  {ANSI_HIGHLIGHT}{}{ANSI_RESET}", line.text);
                } else {
                    let _ = writeln!(out, "  {}", line.text);
                }
            }
        }
        out
    }
}

fn is_highlighted(line: &str) -> bool {
    HIGHLIGHT_MARKERS.iter().any(|marker| line.contains(marker))
}
