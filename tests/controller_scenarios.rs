//! End-to-end scenarios driven through the public API, the way the binary
//! drives a session: decoded commands in, replies and grid state out.

use std::time::{Duration, Instant};

use gridsmith::app::controller::GridController;
use gridsmith::app::session::{Session, Step};
use gridsmith::config::{GridBounds, SettingsStore, Theme, ThemeContext, ToolVariant};
use gridsmith::domain::grid::Axis;
use gridsmith::input::commands::Command;
use gridsmith::platform::clipboard::MemoryClipboard;

fn sizes(controller: &GridController, axis: Axis) -> Vec<String> {
    controller
        .grid()
        .tracks(axis)
        .iter()
        .map(|t| t.to_string())
        .collect()
}

fn session(variant: ToolVariant) -> Session {
    Session::new(
        GridController::new(variant, GridBounds::default()),
        ThemeContext::new(None, Theme::Light),
        Box::new(MemoryClipboard::new()),
    )
}

fn run(session: &mut Session, lines: &[&str], now: Instant) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let command = Command::parse(line).unwrap();
            match session.execute(command, now).unwrap() {
                Step::Continue(reply) => reply,
                Step::Quit => String::from("<quit>"),
            }
        })
        .collect()
}

#[test]
fn first_column_cycles_through_four_sizes() {
    let mut session = session(ToolVariant::Extended);
    let replies = run(
        &mut session,
        &["click col 0", "click col 0", "click col 0", "click col 0"],
        Instant::now(),
    );
    assert_eq!(
        replies,
        ["column 0: 2fr", "column 0: 3fr", "column 0: 4fr", "column 0: 1fr"]
    );
}

#[test]
fn growing_then_shrinking_columns() {
    let mut session = session(ToolVariant::Extended);
    let now = Instant::now();

    run(&mut session, &["cols 5"], now);
    assert_eq!(
        sizes(session.controller(), Axis::Column),
        ["1fr", "1fr", "1fr", "1fr", "1fr"]
    );

    run(&mut session, &["cols 2"], now);
    assert_eq!(sizes(session.controller(), Axis::Column), ["1fr", "1fr"]);
}

#[test]
fn shrinking_keeps_customized_prefix() {
    let mut session = session(ToolVariant::Extended);
    let now = Instant::now();
    run(
        &mut session,
        &["click col 1", "click col 1", "cols 6", "cols 2"],
        now,
    );
    assert_eq!(sizes(session.controller(), Axis::Column), ["1fr", "3fr"]);
}

#[test]
fn basic_variant_ignores_secondary_clicks() {
    let mut session = session(ToolVariant::Basic);
    let now = Instant::now();
    let replies = run(&mut session, &["click row 4", "rclick row 4"], now);
    assert_eq!(replies, ["row 4: 2fr", "row 4: 2fr (unchanged)"]);
}

#[test]
fn generated_css_follows_edits() {
    let mut session = session(ToolVariant::Extended);
    let now = Instant::now();
    run(
        &mut session,
        &[
            "cols 2",
            "rows 1",
            "click col 1",
            "click row 0",
            "click row 0",
            "col-gap 4",
            "row-gap 5px",
        ],
        now,
    );

    let expected = ".parent {
  display: grid;
  grid-template-columns: 1fr 2fr;
  grid-template-rows: 3fr;
  grid-column-gap: 4px;
  grid-row-gap: 5px;
}";
    assert_eq!(session.controller().css(), expected);
}

#[test]
fn gap_ceiling_from_bounds() {
    let mut session = Session::new(
        GridController::new(ToolVariant::Extended, GridBounds::with_max_gap(64)),
        ThemeContext::new(None, Theme::Light),
        Box::new(MemoryClipboard::new()),
    );
    let replies = run(&mut session, &["col-gap 50", "row-gap 500", "row-gap -3"], Instant::now());
    assert_eq!(
        replies,
        ["Column Gap (px): 50", "Row Gap (px): 64", "Row Gap (px): 0"]
    );
}

#[test]
fn editing_continues_while_code_is_visible() {
    let mut session = session(ToolVariant::Extended);
    let now = Instant::now();
    run(&mut session, &["code", "cols 4", "copy css"], now);

    let shown = run(&mut session, &["show"], now + Duration::from_millis(500));
    assert!(shown[0].contains("grid-template-columns: 1fr 1fr 1fr 1fr;"));
    assert!(shown[0].contains("CSS [Copied]"));

    run(&mut session, &["close"], now);
    assert!(!session.controller().is_code_visible());
}

#[test]
fn theme_choice_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let store = SettingsStore::new(&path);
    let mut session = session(ToolVariant::Extended).with_store(store.clone());

    let replies = run(&mut session, &["theme dark"], Instant::now());
    assert_eq!(replies, ["theme: dark (saved)"]);
    assert_eq!(store.load().unwrap().theme, Some(Theme::Dark));

    let restored = ThemeContext::new(store.load().unwrap().theme, Theme::Light);
    assert_eq!(restored.theme(), Theme::Dark);
}

#[test]
fn preview_is_written_as_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preview.png");
    let mut session = session(ToolVariant::Basic);
    let line = format!("preview {}", path.display());

    let replies = run(&mut session, &[line.as_str()], Instant::now());
    assert!(replies[0].starts_with("preview written to"));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}
