//! Live preview rendering
//!
//! Lays out the preview (track label strips, grid frame, cells) from the
//! current grid and rasterizes it with tiny-skia. Layout is computed
//! separately from drawing so hit-testing and geometry can be tested
//! without touching pixels.

use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect as SkiaRect, Stroke,
    Transform,
};
use tracing::{debug, info};

use crate::config::theme::{Palette, ThemeContext};
use crate::domain::core::Rect;
use crate::domain::grid::{Axis, GridConfig};
use crate::domain::track::TrackSize;

/// Default preview canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: i32 = 800;
/// Default preview canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: i32 = 520;

const MARGIN: i32 = 16;
const COLUMN_LABEL_HEIGHT: i32 = 28;
const ROW_LABEL_WIDTH: i32 = 48;
const LABEL_SPACING: i32 = 8;
const LABEL_INSET: i32 = 2;
const FRAME_BORDER: i32 = 4;
const FRAME_PADDING: i32 = 12;
const LABEL_FONT_SIZE: f32 = 14.0;
const PIP_RADIUS: f32 = 2.5;
const PIP_SPACING: f32 = 8.0;
const MAX_PIPS: u32 = 8;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create {width}x{height} pixmap for rendering")]
    PixmapCreationFailed { width: i32, height: i32 },

    #[error("Preview canvas {width}x{height} is too small")]
    CanvasTooSmall { width: i32, height: i32 },

    #[error("Failed to read font {}: {source}", .path.display())]
    FontRead { path: PathBuf, source: std::io::Error },

    #[error("Font {} could not be parsed", .0.display())]
    InvalidFont(PathBuf),

    #[error("Failed to encode preview: {0}")]
    Encode(String),
}

/// A clickable track label in the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLabel {
    pub axis: Axis,
    pub index: usize,
    pub rect: Rect,
    pub text: String,
    /// `fr` weight of the track
    pub weight: u32,
}

/// Pre-calculated layout for preview rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLayout {
    /// Whole canvas
    pub canvas: Rect,
    /// Outer edge of the highlighted grid frame
    pub frame: Rect,
    /// Area inside the frame border and padding where tracks live
    pub content: Rect,
    pub column_labels: Vec<TrackLabel>,
    pub row_labels: Vec<TrackLabel>,
    /// One rect per cell, row-major
    pub cells: Vec<Rect>,
}

impl PreviewLayout {
    /// Computes the layout of `grid` on a `width` x `height` canvas
    ///
    /// Column labels sit above the frame aligned with their tracks, row
    /// labels sit left of it. Tracks share the content area in proportion
    /// to their `fr` weight after gaps are taken out.
    pub fn compute(grid: &GridConfig, width: i32, height: i32) -> Result<Self, RendererError> {
        let canvas = Rect::new(0, 0, width, height);
        let frame_x = MARGIN + ROW_LABEL_WIDTH + LABEL_SPACING;
        let frame_y = MARGIN + COLUMN_LABEL_HEIGHT + LABEL_SPACING;
        let frame = Rect::new(
            frame_x,
            frame_y,
            width - frame_x - MARGIN,
            height - frame_y - MARGIN,
        );
        let content = frame.inset(FRAME_BORDER + FRAME_PADDING);
        if content.is_empty() {
            return Err(RendererError::CanvasTooSmall { width, height });
        }

        let columns = distribute_tracks(content.w, grid.column_sizes(), grid.column_gap_px());
        let rows = distribute_tracks(content.h, grid.row_sizes(), grid.row_gap_px());

        let column_labels =
            build_labels(Axis::Column, grid.column_sizes(), &columns, |start, size| {
                Rect::new(content.x + start, MARGIN, size, COLUMN_LABEL_HEIGHT)
            });
        let row_labels = build_labels(Axis::Row, grid.row_sizes(), &rows, |start, size| {
            Rect::new(MARGIN, content.y + start, ROW_LABEL_WIDTH, size)
        });

        let mut cells = Vec::with_capacity(grid.cell_count());
        for &(row_start, row_size) in &rows {
            for &(col_start, col_size) in &columns {
                cells.push(Rect::new(
                    content.x + col_start,
                    content.y + row_start,
                    col_size,
                    row_size,
                ));
            }
        }

        Ok(Self {
            canvas,
            frame,
            content,
            column_labels,
            row_labels,
            cells,
        })
    }

    /// Finds the track label under a preview coordinate
    ///
    /// # Returns
    /// `(axis, index)` of the label hit, or `None`
    pub fn track_at(&self, x: i32, y: i32) -> Option<(Axis, usize)> {
        self.column_labels
            .iter()
            .chain(&self.row_labels)
            .find(|label| label.rect.contains_point(x, y))
            .map(|label| (label.axis, label.index))
    }
}

/// Splits `total` pixels between tracks by `fr` weight
///
/// Gaps together never take more than half of `total`; a wider gap is
/// drawn narrower so every track stays visible and clickable. The
/// generated CSS keeps the configured value.
///
/// # Returns
/// `(offset, size)` per track, offsets relative to the start of the area.
/// Leftover pixels from integer division go to the first tracks.
pub fn distribute_tracks(total: i32, tracks: &[TrackSize], gap: u32) -> Vec<(i32, i32)> {
    if tracks.is_empty() {
        return Vec::new();
    }

    let total = total.max(0);
    let gutters = tracks.len() as i32 - 1;
    let gap = match gutters {
        0 => 0,
        n => i32::try_from(gap).unwrap_or(i32::MAX).min(total / 2 / n),
    };
    let available = i64::from(total - gap * gutters);
    let weights: Vec<i64> = tracks.iter().map(|t| i64::from(t.base_value())).collect();
    let weight_sum: i64 = weights.iter().sum();

    let mut sizes: Vec<i64> = weights.iter().map(|w| available * w / weight_sum).collect();
    let mut leftover = available - sizes.iter().sum::<i64>();
    for size in sizes.iter_mut() {
        if leftover == 0 {
            break;
        }
        *size += 1;
        leftover -= 1;
    }

    let mut offset = 0i32;
    sizes
        .into_iter()
        .map(|size| {
            let size = size as i32;
            let start = offset;
            offset = offset.saturating_add(size).saturating_add(gap);
            (start, size)
        })
        .collect()
}

fn build_labels(
    axis: Axis,
    tracks: &[TrackSize],
    extents: &[(i32, i32)],
    place: impl Fn(i32, i32) -> Rect,
) -> Vec<TrackLabel> {
    tracks
        .iter()
        .zip(extents)
        .enumerate()
        .map(|(index, (token, &(start, size)))| TrackLabel {
            axis,
            index,
            rect: place(start, size),
            text: token.to_string(),
            weight: token.base_value(),
        })
        .collect()
}

/// Rasterizes preview layouts
#[derive(Debug, Default)]
pub struct PreviewRenderer {
    /// Font for label text; labels fall back to pips without one
    font: Option<FontVec>,
}

impl PreviewRenderer {
    /// Create a renderer without a label font
    pub fn new() -> Self {
        Self { font: None }
    }

    /// Create a renderer that draws labels with the font at `path`
    pub fn with_font_file(path: &Path) -> Result<Self, RendererError> {
        let bytes = std::fs::read(path).map_err(|source| RendererError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|_| RendererError::InvalidFont(path.to_path_buf()))?;
        debug!(path = %path.display(), "label font loaded");
        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Render a preview layout to a pixmap
    pub fn render(
        &self,
        layout: &PreviewLayout,
        theme: &ThemeContext,
    ) -> Result<Pixmap, RendererError> {
        let palette = theme.palette();
        let (width, height) = (layout.canvas.w, layout.canvas.h);
        let mut pixmap = Pixmap::new(width.max(0) as u32, height.max(0) as u32)
            .ok_or(RendererError::PixmapCreationFailed { width, height })?;

        pixmap.fill(palette.background);

        fill_rect(&mut pixmap, layout.frame, palette.frame);
        fill_rect(&mut pixmap, layout.frame.inset(FRAME_BORDER), palette.background);

        for cell in &layout.cells {
            fill_rect(&mut pixmap, *cell, palette.cell);
            stroke_rect(&mut pixmap, *cell, palette.cell_border);
        }

        for label in layout.column_labels.iter().chain(&layout.row_labels) {
            self.render_label(&mut pixmap, label, &palette);
        }

        Ok(pixmap)
    }

    /// Render and write a PNG file
    pub fn save_png(
        &self,
        layout: &PreviewLayout,
        theme: &ThemeContext,
        path: &Path,
    ) -> Result<(), RendererError> {
        let pixmap = self.render(layout, theme)?;
        pixmap
            .save_png(path)
            .map_err(|e| RendererError::Encode(e.to_string()))?;
        info!(
            path = %path.display(),
            width = pixmap.width(),
            height = pixmap.height(),
            "preview written"
        );
        Ok(())
    }

    fn render_label(&self, pixmap: &mut Pixmap, label: &TrackLabel, palette: &Palette) {
        let rect = label.rect.inset(LABEL_INSET);
        if rect.is_empty() {
            return;
        }
        fill_rect(pixmap, rect, palette.label);

        let (cx, cy) = rect.center();
        let center = (cx as f32, cy as f32);
        match &self.font {
            Some(font) => draw_text(pixmap, font, &label.text, center, palette.text),
            None => draw_pips(pixmap, label.weight, center, palette.text),
        }
    }
}

fn to_skia(rect: Rect) -> Option<SkiaRect> {
    if rect.is_empty() {
        return None;
    }
    SkiaRect::from_xywh(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = false;
    paint
}

fn fill_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    if let Some(rect) = to_skia(rect) {
        pixmap.fill_rect(rect, &solid(color), Transform::identity(), None);
    }
}

fn stroke_rect(pixmap: &mut Pixmap, rect: Rect, color: Color) {
    if let Some(path) = to_skia(rect).map(PathBuilder::from_rect) {
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }
}

/// One dot per `fr`, centered on the label
fn draw_pips(pixmap: &mut Pixmap, weight: u32, center: (f32, f32), color: Color) {
    let count = weight.clamp(1, MAX_PIPS);
    let span = (count - 1) as f32 * PIP_SPACING;
    let mut builder = PathBuilder::new();
    for i in 0..count {
        let x = center.0 - span / 2.0 + i as f32 * PIP_SPACING;
        builder.push_circle(x, center.1, PIP_RADIUS);
    }

    if let Some(path) = builder.finish() {
        let mut paint = solid(color);
        paint.anti_alias = true;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn draw_text(pixmap: &mut Pixmap, font: &FontVec, text: &str, center: (f32, f32), color: Color) {
    let scaled = font.as_scaled(PxScale::from(LABEL_FONT_SIZE));
    let width: f32 = text
        .chars()
        .map(|c| scaled.h_advance(scaled.glyph_id(c)))
        .sum();
    let baseline = center.1 + (scaled.ascent() + scaled.descent()) / 2.0;
    let mut caret = center.0 - width / 2.0;

    let stride = pixmap.width() as i32;
    let rows = pixmap.height() as i32;
    let pixels = pixmap.pixels_mut();

    for c in text.chars() {
        let glyph = scaled.scaled_glyph(c);
        let advance = scaled.h_advance(glyph.id);
        let glyph = glyph.id.with_scale_and_position(scaled.scale(), point(caret, baseline));
        caret += advance;

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i32 + gx as i32;
            let y = bounds.min.y as i32 + gy as i32;
            if x < 0 || y < 0 || x >= stride || y >= rows {
                return;
            }
            let idx = (y * stride + x) as usize;
            pixels[idx] = blend(pixels[idx], color, coverage);
        });
    }
}

/// Source-over blend of `color` at `coverage` onto a premultiplied pixel
fn blend(dst: PremultipliedColorU8, color: Color, coverage: f32) -> PremultipliedColorU8 {
    let alpha = (color.alpha() * coverage).clamp(0.0, 1.0);
    let keep = 1.0 - alpha;
    let channel = |src: f32, dst: u8| ((src * alpha * 255.0) + f32::from(dst) * keep).round();

    let a = channel(1.0, dst.alpha()).min(255.0) as u8;
    let r = channel(color.red(), dst.red()).min(f32::from(a)) as u8;
    let g = channel(color.green(), dst.green()).min(f32::from(a)) as u8;
    let b = channel(color.blue(), dst.blue()).min(f32::from(a)) as u8;
    PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(dst)
}
