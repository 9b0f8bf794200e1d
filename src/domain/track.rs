//! Track size tokens and the track-list model
//!
//! A track is one column or one row of the generated grid. Its size is a
//! CSS token such as `2fr`. Lists of tokens are kept exactly as long as the
//! corresponding count: growing appends the default token, shrinking
//! truncates from the end.

use std::fmt;

/// Size token used for every newly created track
pub const DEFAULT_TRACK: &str = "1fr";

/// Unit appended to every token the mutator produces
pub const TRACK_UNIT: &str = "fr";

/// A single track size token, e.g. `"1fr"`
///
/// The token is stored verbatim. Only its leading integer matters to the
/// mutator; anything after it is the unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackSize(String);

impl TrackSize {
    /// Base value used when a token carries no usable leading integer
    pub const FALLBACK_BASE: u32 = 1;

    /// Creates a token from a whole `fr` value
    pub fn fr(value: u32) -> Self {
        Self(format!("{value}{TRACK_UNIT}"))
    }

    /// Returns the token as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric part of the token
    ///
    /// Leading whitespace and a single `+` sign are skipped, then decimal
    /// digits are read up to the first non-digit. A missing, zero, negative
    /// or overflowing value falls back to [`Self::FALLBACK_BASE`].
    ///
    /// # Example
    /// ```rust
    /// use gridsmith::domain::track::TrackSize;
    ///
    /// assert_eq!(TrackSize::from("3fr").base_value(), 3);
    /// assert_eq!(TrackSize::from("auto").base_value(), 1);
    /// ```
    pub fn base_value(&self) -> u32 {
        let trimmed = self.0.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());

        match unsigned[..end].parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => Self::FALLBACK_BASE,
        }
    }
}

impl Default for TrackSize {
    fn default() -> Self {
        Self(DEFAULT_TRACK.to_string())
    }
}

impl From<&str> for TrackSize {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for TrackSize {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns `current` resized to exactly `new_count` tokens
///
/// Existing entries keep their order. Missing entries are filled with
/// [`DEFAULT_TRACK`]; extra entries are dropped from the end.
///
/// # Arguments
/// * `current` - Current ordered list of tokens
/// * `new_count` - Desired length, already clamped by the caller
///
/// # Returns
/// New list of `new_count` tokens
pub fn resize(current: &[TrackSize], new_count: usize) -> Vec<TrackSize> {
    if new_count <= current.len() {
        return current[..new_count].to_vec();
    }

    let mut resized = Vec::with_capacity(new_count);
    resized.extend_from_slice(current);
    resized.resize_with(new_count, TrackSize::default);
    resized
}

/// Builds a list of `count` default tokens
pub fn uniform(count: usize) -> Vec<TrackSize> {
    vec![TrackSize::default(); count]
}

/// Joins tokens with single spaces, the way `grid-template-*` expects
pub fn join(tracks: &[TrackSize]) -> String {
    tracks
        .iter()
        .map(TrackSize::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &[&str]) -> Vec<TrackSize> {
        raw.iter().map(|t| TrackSize::from(*t)).collect()
    }

    #[test]
    fn base_value_reads_leading_digits() {
        assert_eq!(TrackSize::from("1fr").base_value(), 1);
        assert_eq!(TrackSize::from("4fr").base_value(), 4);
        assert_eq!(TrackSize::from("12fr").base_value(), 12);
        assert_eq!(TrackSize::from("  2fr").base_value(), 2);
        assert_eq!(TrackSize::from("+3fr").base_value(), 3);
    }

    #[test]
    fn base_value_falls_back_to_one() {
        assert_eq!(TrackSize::from("").base_value(), 1);
        assert_eq!(TrackSize::from("fr").base_value(), 1);
        assert_eq!(TrackSize::from("0fr").base_value(), 1);
        assert_eq!(TrackSize::from("-2fr").base_value(), 1);
        assert_eq!(TrackSize::from("99999999999fr").base_value(), 1);
    }

    #[test]
    fn fr_constructor_formats_token() {
        assert_eq!(TrackSize::fr(3).as_str(), "3fr");
        assert_eq!(TrackSize::default().as_str(), DEFAULT_TRACK);
    }

    #[test]
    fn resize_grows_with_default_tokens() {
        let grown = resize(&tokens(&["2fr", "3fr"]), 4);
        assert_eq!(grown, tokens(&["2fr", "3fr", "1fr", "1fr"]));
    }

    #[test]
    fn resize_truncates_from_the_end() {
        let shrunk = resize(&tokens(&["2fr", "3fr", "4fr"]), 1);
        assert_eq!(shrunk, tokens(&["2fr"]));
    }

    #[test]
    fn resize_to_zero_and_back() {
        assert!(resize(&tokens(&["2fr"]), 0).is_empty());
        assert_eq!(resize(&[], 2), uniform(2));
    }

    #[test]
    fn join_uses_single_spaces() {
        assert_eq!(join(&tokens(&["1fr", "2fr", "3fr"])), "1fr 2fr 3fr");
        assert_eq!(join(&[]), "");
    }
}
