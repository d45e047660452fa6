//! Rendering: live ink during a gesture, full replay from history, and the
//! guide grid.
//!
//! Live drawing and replay share one [`Pen`], so a history replayed onto a
//! blank surface paints the same segments, widths and colors that the live
//! gesture painted. The pen only starts a new path where it has to: at the
//! first sample of a run, or where the brush changed. In the latter case the
//! new path starts at the pen position so the segment leading to the sample
//! is drawn in the sample's own brush.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::brush::Brush;
use crate::config::valid_cell;
use crate::consts::{GRID_BACKGROUND, GRID_LINE_WIDTH, HALF_PIXEL};
use crate::history::Sample;
use crate::sampler::Point;
use crate::surface::{Surface, SurfaceError};

/// Pen position plus the brush last applied to the surface.
#[derive(Debug, Clone, Default)]
pub struct Pen {
    applied: Option<Brush>,
    cursor: Option<Point>,
    /// The surface's current path belongs to this pen.
    path_open: bool,
    /// Segments were added since the last stroke.
    pending: bool,
}

impl Pen {
    /// Current pen position, if a path is in progress.
    #[must_use]
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Start a new path at `at` with a zero-length segment, so a lone point
    /// still shows as a round dot.
    pub fn begin<S: Surface + ?Sized>(&mut self, surface: &mut S, at: Point, brush: &Brush) {
        self.flush(surface);
        self.apply(surface, brush);
        surface.begin_path();
        surface.move_to(at);
        surface.line_to(at);
        self.cursor = Some(at);
        self.path_open = true;
        self.pending = true;
    }

    /// Draw a segment from the pen position to `to` in `brush`.
    ///
    /// With no pen position this behaves as [`Pen::begin`].
    pub fn extend<S: Surface + ?Sized>(&mut self, surface: &mut S, to: Point, brush: &Brush) {
        let Some(from) = self.cursor else {
            self.begin(surface, to, brush);
            return;
        };
        if !self.path_open || self.applied.as_ref() != Some(brush) {
            self.flush(surface);
            self.apply(surface, brush);
            surface.begin_path();
            surface.move_to(from);
            self.path_open = true;
        }
        surface.line_to(to);
        self.cursor = Some(to);
        self.pending = true;
    }

    /// Stroke whatever was drawn since the last stroke.
    pub fn flush<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.pending {
            surface.stroke();
            self.pending = false;
        }
    }

    /// Finish the path: stroke anything pending and forget the position.
    pub fn lift<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.flush(surface);
        self.cursor = None;
        self.path_open = false;
    }

    /// Move the pen to `at` without drawing; the next segment opens a path
    /// there.
    pub fn place(&mut self, at: Point) {
        self.cursor = Some(at);
        self.path_open = false;
    }

    /// Note that something else replaced the surface's current path; the
    /// next segment re-opens a path at the pen position.
    pub fn reopen(&mut self) {
        self.path_open = false;
    }

    fn apply<S: Surface + ?Sized>(&mut self, surface: &mut S, brush: &Brush) {
        if self.applied.as_ref() == Some(brush) {
            return;
        }
        surface.set_line_width(brush.width);
        surface.set_stroke_color(&brush.color);
        self.applied = Some(brush.clone());
    }
}

// =============================================================
// Replay
// =============================================================

/// Clear the surface and repaint every sample in order.
///
/// Runs are stroked at their closing sample; anything still pending after the
/// last sample (an unterminated run) is stroked at the end. Returns the pen
/// so the caller's applied-brush cache matches the surface.
pub fn redraw_all<S: Surface + ?Sized>(samples: &[Sample], surface: &mut S) -> Pen {
    surface.clear();
    let mut pen = Pen::default();
    for sample in samples {
        if sample.role.opens() {
            pen.begin(surface, sample.position, &sample.brush);
        } else {
            pen.extend(surface, sample.position, &sample.brush);
        }
        if sample.role.closes() {
            pen.lift(surface);
        }
    }
    pen.lift(surface);
    pen
}

// =============================================================
// Grid
// =============================================================

/// Paint an opaque background with guide lines every `cell_width` /
/// `cell_height`, offset by half a pixel for crisp thin lines.
///
/// Drawing state is saved before and restored after, so the brush applied to
/// the surface is unchanged.
///
/// # Errors
///
/// [`SurfaceError::InvalidGrid`] for cells that are non-finite or under one pixel.
pub fn draw_grid<S: Surface + ?Sized>(
    surface: &mut S,
    color: &str,
    cell_width: f64,
    cell_height: f64,
) -> Result<(), SurfaceError> {
    if !valid_cell(cell_width) || !valid_cell(cell_height) {
        return Err(SurfaceError::InvalidGrid { width: cell_width, height: cell_height });
    }
    let (width, height) = surface.size();

    surface.save();
    surface.set_stroke_color(color);
    surface.set_fill_color(GRID_BACKGROUND);
    surface.set_line_width(GRID_LINE_WIDTH);
    surface.fill_rect(0.0, 0.0, width, height);

    for x in guide_offsets(cell_width, width) {
        surface.begin_path();
        surface.move_to(Point::new(x, 0.0));
        surface.line_to(Point::new(x, height));
        surface.stroke();
    }
    for y in guide_offsets(cell_height, height) {
        surface.begin_path();
        surface.move_to(Point::new(0.0, y));
        surface.line_to(Point::new(width, y));
        surface.stroke();
    }

    surface.restore();
    tracing::debug!(%color, cell_width, cell_height, "grid drawn");
    Ok(())
}

/// `k*cell + 0.5` for `k = 1, 2, ...` below `limit`. Computed by index so
/// the offsets do not accumulate rounding error.
fn guide_offsets(cell: f64, limit: f64) -> impl Iterator<Item = f64> {
    (1_u32..).map(move |k| f64::from(k) * cell + HALF_PIXEL).take_while(move |x| *x < limit)
}
