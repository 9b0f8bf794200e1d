//! Grid configuration entity
//!
//! `GridConfig` is the only piece of domain state: how many columns and
//! rows exist, how each track is sized and how far apart tracks are.
//! Bounds are enforced one level up by the controller; this type only
//! guarantees that the size lists always match the counts.

use crate::domain::track::{self, TrackSize};

/// Errors that can occur during grid operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Track index is outside the active tracks of the axis
    #[error("{axis} track {index} is out of range (count is {count})")]
    TrackOutOfRange { axis: Axis, index: usize, count: usize },
}

/// Which list of tracks an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Column,
    Row,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Column => f.write_str("column"),
            Axis::Row => f.write_str("row"),
        }
    }
}

/// Current state of the generated grid
///
/// Counts are derived from the size lists, so the lists and counts can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// One token per active column
    column_sizes: Vec<TrackSize>,
    /// One token per active row
    row_sizes: Vec<TrackSize>,
    /// Horizontal spacing between columns, in pixels
    column_gap_px: u32,
    /// Vertical spacing between rows, in pixels
    row_gap_px: u32,
}

impl GridConfig {
    /// Creates a grid with uniform `1fr` tracks and no gaps
    ///
    /// # Arguments
    /// * `columns` - Number of columns
    /// * `rows` - Number of rows
    ///
    /// # Example
    /// ```rust
    /// use gridsmith::domain::grid::GridConfig;
    ///
    /// let grid = GridConfig::new(3, 2);
    /// assert_eq!(grid.dimensions(), (3, 2));
    /// ```
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            column_sizes: track::uniform(columns),
            row_sizes: track::uniform(rows),
            column_gap_px: 0,
            row_gap_px: 0,
        }
    }

    /// Returns the grid dimensions as (columns, rows)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.column_sizes.len(), self.row_sizes.len())
    }

    /// Returns the number of tracks along `axis`
    pub fn count(&self, axis: Axis) -> usize {
        self.tracks(axis).len()
    }

    pub fn column_count(&self) -> usize {
        self.column_sizes.len()
    }

    pub fn row_count(&self) -> usize {
        self.row_sizes.len()
    }

    /// Returns the active tokens along `axis`
    pub fn tracks(&self, axis: Axis) -> &[TrackSize] {
        match axis {
            Axis::Column => &self.column_sizes,
            Axis::Row => &self.row_sizes,
        }
    }

    pub fn column_sizes(&self) -> &[TrackSize] {
        &self.column_sizes
    }

    pub fn row_sizes(&self) -> &[TrackSize] {
        &self.row_sizes
    }

    /// Returns the gap between tracks along `axis`, in pixels
    pub fn gap(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Column => self.column_gap_px,
            Axis::Row => self.row_gap_px,
        }
    }

    pub fn column_gap_px(&self) -> u32 {
        self.column_gap_px
    }

    pub fn row_gap_px(&self) -> u32 {
        self.row_gap_px
    }

    /// Resizes the track list along `axis` to exactly `count` entries
    pub fn set_count(&mut self, axis: Axis, count: usize) {
        let list = self.tracks_mut(axis);
        *list = track::resize(list, count);
    }

    /// Stores a gap value along `axis`
    pub fn set_gap(&mut self, axis: Axis, px: u32) {
        match axis {
            Axis::Column => self.column_gap_px = px,
            Axis::Row => self.row_gap_px = px,
        }
    }

    /// Returns the token of one track
    ///
    /// # Returns
    /// The token, or `GridError::TrackOutOfRange` if `index >= count`
    pub fn track(&self, axis: Axis, index: usize) -> Result<&TrackSize, GridError> {
        let tracks = self.tracks(axis);
        tracks.get(index).ok_or(GridError::TrackOutOfRange {
            axis,
            index,
            count: tracks.len(),
        })
    }

    /// Replaces the token of one track in place
    pub fn replace_track(
        &mut self,
        axis: Axis,
        index: usize,
        token: TrackSize,
    ) -> Result<(), GridError> {
        let tracks = self.tracks_mut(axis);
        let count = tracks.len();
        let slot = tracks
            .get_mut(index)
            .ok_or(GridError::TrackOutOfRange { axis, index, count })?;
        *slot = token;
        Ok(())
    }

    /// Number of cells the grid contains
    pub fn cell_count(&self) -> usize {
        self.column_count() * self.row_count()
    }

    fn tracks_mut(&mut self, axis: Axis) -> &mut Vec<TrackSize> {
        match axis {
            Axis::Column => &mut self.column_sizes,
            Axis::Row => &mut self.row_sizes,
        }
    }
}
