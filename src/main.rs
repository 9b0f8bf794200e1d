//! Gridsmith: interactive CSS grid generator
//!
//! Reads one command per line from stdin and prints the result. Type
//! `help` for the command list. A settings file that cannot be read is
//! logged and replaced by defaults.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, error, warn};

use gridsmith::app::controller::GridController;
use gridsmith::app::session::{Session, Step};
use gridsmith::config::settings::SETTINGS_ENV;
use gridsmith::config::{Settings, SettingsStore, ThemeContext, ToolVariant};
use gridsmith::input::commands::Command;
use gridsmith::logging;
use gridsmith::platform::clipboard::SystemClipboard;
use gridsmith::ui::renderer::PreviewRenderer;

const PROMPT: &str = "gridsmith> ";

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Interactive CSS grid generator
#[derive(Debug, Parser)]
#[command(name = "gridsmith", version)]
#[command(about = "Interactive CSS grid generator; type 'help' at the prompt for commands")]
struct CliArgs {
    /// JSON settings file
    #[arg(long, value_name = "FILE", env = SETTINGS_ENV)]
    settings: Option<PathBuf>,
    /// Starting grid and click behaviour
    #[arg(long, value_enum, ignore_case = true)]
    variant: Option<ToolVariant>,
    /// Disable highlighting in the code panel
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

fn main() -> ExitCode {
    logging::init_tracing();
    let args = CliArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "gridsmith stopped");
            eprintln!("gridsmith: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), AppError> {
    let store = SettingsStore::locate(args.settings);
    let settings = load_settings(store.as_ref());
    debug!(?settings, "settings loaded");

    let variant = args.variant.unwrap_or(settings.variant);
    let controller = GridController::new(variant, settings.bounds());
    let theme = ThemeContext::detect(settings.theme);
    let color =
        !args.no_color && io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();

    let mut session = Session::new(controller, theme, Box::new(SystemClipboard::new()))
        .with_renderer(load_renderer(&settings))
        .with_color(color);
    if let Some(store) = store {
        session = session.with_store(store);
    }

    let interactive = io::stdin().is_terminal();
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}\n", session.summary())?;

    let mut lines = io::stdin().lock().lines();
    loop {
        if interactive {
            write!(stdout, "{PROMPT}")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(stdout, "error: {e}")?;
                continue;
            }
        };

        match session.execute(command, Instant::now()) {
            Ok(Step::Continue(reply)) => writeln!(stdout, "{reply}")?,
            Ok(Step::Quit) => break,
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
    }

    Ok(())
}

/// Settings from `store`, or defaults when there is none or it is unreadable
fn load_settings(store: Option<&SettingsStore>) -> Settings {
    let Some(store) = store else {
        return Settings::default();
    };
    store.load().unwrap_or_else(|e| {
        warn!(error = %e, "settings unreadable, using defaults");
        Settings::default()
    })
}

/// Label font from the settings, falling back to pip labels
fn load_renderer(settings: &Settings) -> PreviewRenderer {
    let Some(path) = &settings.font_path else {
        return PreviewRenderer::new();
    };
    match PreviewRenderer::with_font_file(path) {
        Ok(renderer) => renderer,
        Err(e) => {
            warn!(error = %e, "label font unavailable, using pip labels");
            PreviewRenderer::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(raw: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("gridsmith").chain(raw.iter().copied()))
    }

    #[test]
    fn parses_all_flags() {
        let parsed =
            args(&["--settings", "g.json", "--variant", "Basic", "--no-color"]).unwrap();
        assert_eq!(parsed.settings, Some(PathBuf::from("g.json")));
        assert_eq!(parsed.variant, Some(ToolVariant::Basic));
        assert!(parsed.no_color);
    }

    #[test]
    fn variant_and_color_are_optional() {
        let parsed = args(&["--variant", "extended"]).unwrap();
        assert_eq!(parsed.variant, Some(ToolVariant::Extended));
        assert!(!parsed.no_color);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(args(&["--settings"]).is_err());

        let err = args(&["--variant", "huge"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);

        let err = args(&["--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn corrupt_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ variant: ").unwrap();

        let settings = load_settings(Some(&SettingsStore::new(&path)));
        assert_eq!(settings, Settings::default());
        assert_eq!(load_settings(None), Settings::default());
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
