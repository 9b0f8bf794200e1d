//! CSS and HTML generation
//!
//! Output is literal text. Every interpolated value comes from the
//! mutator or from clamped integers, so nothing needs escaping.

use crate::domain::grid::GridConfig;
use crate::domain::track;

/// Class name of the generated container
pub const PARENT_CLASS: &str = "parent";

/// Renders the `.parent` rule for the current grid
///
/// # Example
/// ```rust
/// use gridsmith::domain::codegen::generate_css;
/// use gridsmith::domain::grid::GridConfig;
///
/// let css = generate_css(&GridConfig::new(2, 1));
/// assert!(css.contains("grid-template-columns: 1fr 1fr;"));
/// ```
pub fn generate_css(config: &GridConfig) -> String {
    format!(
        concat!(
            ".{} {{\n",
            "  display: grid;\n",
            "  grid-template-columns: {};\n",
            "  grid-template-rows: {};\n",
            "  grid-column-gap: {}px;\n",
            "  grid-row-gap: {}px;\n",
            "}}",
        ),
        PARENT_CLASS,
        track::join(config.column_sizes()),
        track::join(config.row_sizes()),
        config.column_gap_px(),
        config.row_gap_px(),
    )
}

/// Renders the HTML skeleton
///
/// The skeleton is the bare container. Child cells are intentionally not
/// emitted.
pub fn generate_html() -> String {
    format!("<div class=\"{PARENT_CLASS}\">\n</div>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Axis;
    use crate::domain::track::TrackSize;

    #[test]
    fn css_matches_template() {
        let mut config = GridConfig::new(2, 1);
        config.replace_track(Axis::Column, 1, TrackSize::fr(2)).unwrap();
        config.replace_track(Axis::Row, 0, TrackSize::fr(3)).unwrap();
        config.set_gap(Axis::Column, 4);
        config.set_gap(Axis::Row, 5);

        let expected = ".parent {
  display: grid;
  grid-template-columns: 1fr 2fr;
  grid-template-rows: 3fr;
  grid-column-gap: 4px;
  grid-row-gap: 5px;
}";
        assert_eq!(generate_css(&config), expected);
    }

    #[test]
    fn css_with_no_tracks_keeps_declarations() {
        let css = generate_css(&GridConfig::new(0, 0));
        assert!(css.contains("grid-template-columns: ;"));
        assert!(css.contains("grid-template-rows: ;"));
    }

    #[test]
    fn html_is_static() {
        assert_eq!(generate_html(), "<div class=\"parent\">\n</div>");
    }
}
