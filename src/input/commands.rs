//! Terminal command decoding
//!
//! The binary feeds the controller one line per user event. This module
//! turns a line into a [`Command`]; it never touches controller state.

use std::path::PathBuf;

use crate::app::state::CopyTarget;
use crate::config::theme::Theme;
use crate::domain::grid::Axis;
use crate::input::field::{FieldInput, NumericField};

/// Errors that can occur while decoding a command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{command}' cannot use '{value}'")]
    InvalidArgument { command: &'static str, value: String },
}

/// One decoded user event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit one of the numeric controls
    Field(NumericField, FieldInput),
    /// Click on a track label by index
    TrackClick {
        axis: Axis,
        index: usize,
        secondary: bool,
    },
    /// Click at a preview coordinate; hit-tested against track labels
    Pointer { x: i32, y: i32, secondary: bool },
    RequestCode,
    DismissCode,
    OverlayClick,
    Copy(CopyTarget),
    Show,
    Preview(PathBuf),
    SetTheme(Theme),
    Help,
    Quit,
}

/// Summary printed by `help`
pub const HELP: &str = "\
cols|rows|col-gap|row-gap <value>   type a value (non-numeric reads as 0)
cols|rows|col-gap|row-gap up|down   step by one
cols|rows|col-gap|row-gap wheel <d> scroll (negative = up)
click|rclick col|row <index>        primary / secondary click on a track label
tap|rtap <x> <y>                    click at a preview coordinate
code | close | outside              open the code panel / close it / click outside
copy css|html                       copy a snippet (panel must be open)
show                                print the grid and the code panel
preview <file.png>                  write the live preview
theme light|dark                    switch and remember the theme
help | quit";

impl Command {
    /// Decodes one command line
    ///
    /// # Example
    /// ```rust
    /// use gridsmith::input::commands::Command;
    /// use gridsmith::input::field::{FieldInput, NumericField};
    ///
    /// let command = Command::parse("cols up").unwrap();
    /// assert_eq!(command, Command::Field(NumericField::Columns, FieldInput::StepUp));
    /// ```
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "cols" | "columns" => Ok(Self::field(NumericField::Columns, rest)),
            "rows" => Ok(Self::field(NumericField::Rows, rest)),
            "col-gap" => Ok(Self::field(NumericField::ColumnGap, rest)),
            "row-gap" => Ok(Self::field(NumericField::RowGap, rest)),
            "click" => Self::track_click("click", rest, false),
            "rclick" => Self::track_click("rclick", rest, true),
            "tap" => Self::pointer("tap", rest, false),
            "rtap" => Self::pointer("rtap", rest, true),
            "code" => Ok(Command::RequestCode),
            "close" => Ok(Command::DismissCode),
            "outside" => Ok(Command::OverlayClick),
            "copy" => match rest.to_ascii_lowercase().as_str() {
                "css" => Ok(Command::Copy(CopyTarget::Css)),
                "html" => Ok(Command::Copy(CopyTarget::Html)),
                "" => Err(CommandError::MissingArgument {
                    command: "copy",
                    expected: "'css' or 'html'",
                }),
                _ => Err(CommandError::InvalidArgument {
                    command: "copy",
                    value: rest.to_string(),
                }),
            },
            "show" => Ok(Command::Show),
            "preview" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "preview",
                        expected: "an output path",
                    });
                }
                Ok(Command::Preview(PathBuf::from(rest)))
            }
            "theme" => Theme::parse(rest)
                .map(Command::SetTheme)
                .ok_or_else(|| CommandError::InvalidArgument {
                    command: "theme",
                    value: rest.to_string(),
                }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    fn field(field: NumericField, rest: &str) -> Command {
        let mut words = rest.split_whitespace();
        let input = match (words.next(), words.next()) {
            (Some("up"), None) => FieldInput::StepUp,
            (Some("down"), None) => FieldInput::StepDown,
            (Some("wheel"), Some(delta)) => match delta.parse::<i32>() {
                Ok(delta) => FieldInput::Wheel(delta),
                Err(_) => FieldInput::Typed(rest.to_string()),
            },
            _ => FieldInput::Typed(rest.to_string()),
        };
        Command::Field(field, input)
    }

    fn track_click(
        command: &'static str,
        rest: &str,
        secondary: bool,
    ) -> Result<Command, CommandError> {
        let mut words = rest.split_whitespace();
        let (Some(axis), Some(index)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingArgument {
                command,
                expected: "'col' or 'row' and a track index",
            });
        };

        let axis = match axis.to_ascii_lowercase().as_str() {
            "col" | "column" => Axis::Column,
            "row" => Axis::Row,
            _ => {
                return Err(CommandError::InvalidArgument {
                    command,
                    value: axis.to_string(),
                });
            }
        };

        let index = index
            .parse::<usize>()
            .map_err(|_| CommandError::InvalidArgument {
                command,
                value: index.to_string(),
            })?;

        Ok(Command::TrackClick {
            axis,
            index,
            secondary,
        })
    }

    fn pointer(
        command: &'static str,
        rest: &str,
        secondary: bool,
    ) -> Result<Command, CommandError> {
        let mut words = rest.split_whitespace();
        let (Some(x), Some(y)) = (words.next(), words.next()) else {
            return Err(CommandError::MissingArgument {
                command,
                expected: "x and y preview coordinates",
            });
        };

        let parse = |value: &str| {
            value
                .parse::<i32>()
                .map_err(|_| CommandError::InvalidArgument {
                    command,
                    value: value.to_string(),
                })
        };

        Ok(Command::Pointer {
            x: parse(x)?,
            y: parse(y)?,
            secondary,
        })
    }
}
