use crate::domain::grid::{Axis, GridConfig};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which flavour of the generator is running
///
/// Both variants share one mutator; they differ in their starting grid and
/// in whether a secondary click may shrink a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToolVariant {
    /// Standalone tool: 5x5 start, increment only
    Basic,
    /// Embedded tool: 3x2 start, increment and decrement
    #[default]
    Extended,
}

impl ToolVariant {
    /// Starting (columns, rows) of a fresh grid
    pub fn default_dimensions(self) -> (usize, usize) {
        match self {
            ToolVariant::Basic => (5, 5),
            ToolVariant::Extended => (3, 2),
        }
    }

    /// Whether a secondary click decrements a track
    pub fn decrement_supported(self) -> bool {
        matches!(self, ToolVariant::Extended)
    }

    /// Builds the grid a new session starts with
    pub fn initial_grid(self) -> GridConfig {
        let (columns, rows) = self.default_dimensions();
        GridConfig::new(columns, rows)
    }
}

/// Limits applied to every user-supplied number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub max_columns: usize,
    pub max_rows: usize,
    pub max_gap_px: u32,
}

impl GridBounds {
    pub const MAX_COLUMNS: usize = 12;
    pub const MAX_ROWS: usize = 20;
    pub const DEFAULT_MAX_GAP_PX: u32 = 20;
    /// Hard ceiling for a configured gap limit
    pub const GAP_LIMIT_CEILING: u32 = 1000;

    /// Bounds with a custom gap ceiling
    ///
    /// The ceiling itself is sanitized to `[0, GAP_LIMIT_CEILING]`.
    pub fn with_max_gap(max_gap_px: u32) -> Self {
        Self {
            max_gap_px: Self::sanitize_gap_limit(max_gap_px),
            ..Self::default()
        }
    }

    pub fn sanitize_gap_limit(value: u32) -> u32 {
        value.min(Self::GAP_LIMIT_CEILING)
    }

    /// Largest track count allowed along `axis`
    pub fn max_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Column => self.max_columns,
            Axis::Row => self.max_rows,
        }
    }

    /// Clamps a requested track count into `[0, max_count(axis)]`
    pub fn clamp_count(&self, axis: Axis, requested: i64) -> usize {
        let max = self.max_count(axis) as i64;
        requested.clamp(0, max) as usize
    }

    /// Clamps a requested gap into `[0, max_gap_px]`
    pub fn clamp_gap(&self, requested: i64) -> u32 {
        requested.clamp(0, i64::from(self.max_gap_px)) as u32
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            max_columns: Self::MAX_COLUMNS,
            max_rows: Self::MAX_ROWS,
            max_gap_px: Self::DEFAULT_MAX_GAP_PX,
        }
    }
}
