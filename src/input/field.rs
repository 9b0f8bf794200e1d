//! Numeric control fields
//!
//! Each control accepts three kinds of input: typed text, arrow-key steps
//! and scroll-wheel steps. This module turns any of them into a requested
//! value; the controller then clamps it to the field's bounds.

use crate::domain::grid::Axis;

/// The four numeric controls of the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    Columns,
    Rows,
    ColumnGap,
    RowGap,
}

impl NumericField {
    pub const ALL: [NumericField; 4] = [
        NumericField::Columns,
        NumericField::Rows,
        NumericField::ColumnGap,
        NumericField::RowGap,
    ];

    /// Axis the field acts on
    pub fn axis(self) -> Axis {
        match self {
            NumericField::Columns | NumericField::ColumnGap => Axis::Column,
            NumericField::Rows | NumericField::RowGap => Axis::Row,
        }
    }

    /// True for the two gap fields
    pub fn is_gap(self) -> bool {
        matches!(self, NumericField::ColumnGap | NumericField::RowGap)
    }

    pub fn label(self) -> &'static str {
        match self {
            NumericField::Columns => "Columns",
            NumericField::Rows => "Rows",
            NumericField::ColumnGap => "Column Gap (px)",
            NumericField::RowGap => "Row Gap (px)",
        }
    }
}

/// One input event on a numeric field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Full text of the field after an edit
    Typed(String),
    /// Arrow up
    StepUp,
    /// Arrow down
    StepDown,
    /// Scroll wheel; negative deltas scroll up, positive deltas scroll down
    ///
    /// A zero delta (horizontal-only or inertial scroll events) changes
    /// nothing rather than counting as a downward step.
    Wheel(i32),
}

impl FieldInput {
    /// Computes the requested (unclamped) value
    ///
    /// # Arguments
    /// * `current` - Value the field shows right now
    ///
    /// # Returns
    /// The requested value, or `None` when the event changes nothing
    pub fn resolve(&self, current: i64) -> Option<i64> {
        match self {
            FieldInput::Typed(text) => Some(parse_leading_int(text)),
            FieldInput::StepUp => Some(current.saturating_add(1)),
            FieldInput::StepDown => Some(current.saturating_sub(1)),
            FieldInput::Wheel(0) => None,
            FieldInput::Wheel(delta) if *delta < 0 => Some(current.saturating_add(1)),
            FieldInput::Wheel(_) => Some(current.saturating_sub(1)),
        }
    }
}

/// Reads the integer at the start of `text`
///
/// Leading whitespace and one sign character are accepted, digits are read
/// until the first non-digit and the rest is ignored. Text without any
/// leading digit reads as 0. Values beyond `i64` saturate.
///
/// # Example
/// ```rust
/// use gridsmith::input::field::parse_leading_int;
///
/// assert_eq!(parse_leading_int("12px"), 12);
/// assert_eq!(parse_leading_int("abc"), 0);
/// ```
pub fn parse_leading_int(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let magnitude = unsigned
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_text_uses_leading_integer() {
        assert_eq!(parse_leading_int("5"), 5);
        assert_eq!(parse_leading_int("  7 "), 7);
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("-5"), -5);
        assert_eq!(parse_leading_int("+3"), 3);
    }

    #[test]
    fn non_numeric_text_reads_as_zero() {
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("px12"), 0);
    }

    #[test]
    fn huge_values_saturate() {
        assert_eq!(parse_leading_int("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn steps_and_wheel() {
        assert_eq!(FieldInput::StepUp.resolve(3), Some(4));
        assert_eq!(FieldInput::StepDown.resolve(0), Some(-1));
        assert_eq!(FieldInput::Wheel(-120).resolve(3), Some(4));
        assert_eq!(FieldInput::Wheel(120).resolve(3), Some(2));
        assert_eq!(FieldInput::Wheel(0).resolve(3), None);
        assert_eq!(FieldInput::Typed("9".into()).resolve(3), Some(9));
    }

    #[test]
    fn fields_map_to_axes() {
        assert_eq!(NumericField::Columns.axis(), Axis::Column);
        assert_eq!(NumericField::RowGap.axis(), Axis::Row);
        assert!(NumericField::ColumnGap.is_gap());
        assert!(!NumericField::Rows.is_gap());
    }
}
