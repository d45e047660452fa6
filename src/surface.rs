//! Drawing surface abstraction.
//!
//! [`Surface`] is the small set of 2D raster primitives the engine needs:
//! path building, stroking, rectangle clear/fill, state save/restore and
//! image export. The browser binding implements it over
//! `CanvasRenderingContext2d` ([`crate::web::WebSurface`]); [`RecordingSurface`]
//! implements it headlessly by logging every call and tracking which
//! segments are currently painted.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::collections::HashSet;

use serde::Serialize;

use crate::sampler::Point;

/// Error returned by surface operations that can fail.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SurfaceError {
    /// The host could not provide a drawing context.
    #[error("drawing surface is not initialized: {0}")]
    Uninitialized(String),
    /// The surface has no pixels to export.
    #[error("drawing surface has zero area")]
    EmptySurface,
    /// Serializing the surface failed.
    #[error("export failed: {0}")]
    Export(String),
    /// Grid cells must be finite and at least one pixel.
    #[error("invalid grid cell {width}x{height}")]
    InvalidGrid { width: f64, height: f64 },
}

/// Shape drawn at the ends of stroked lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

/// Shape drawn where two stroked segments meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Round,
    Bevel,
    #[default]
    Miter,
}

impl LineJoin {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Bevel => "bevel",
            Self::Miter => "miter",
        }
    }
}

/// 2D raster primitives consumed by the live renderer, replay and grid.
pub trait Surface {
    /// Width and height in surface pixels.
    fn size(&self) -> (f64, f64);

    fn set_line_width(&mut self, width: f64);
    fn set_stroke_color(&mut self, color: &str);
    fn set_fill_color(&mut self, color: &str);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    /// Discard the current path and start an empty one.
    fn begin_path(&mut self);
    /// Start a new subpath at `at`.
    fn move_to(&mut self, at: Point);
    /// Extend the current subpath to `to`.
    fn line_to(&mut self, to: Point);
    /// Paint the current path with the current line width and stroke color.
    fn stroke(&mut self);

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Push the drawing state (width, colors, cap, join).
    fn save(&mut self);
    /// Pop the drawing state pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    /// Serialize the current pixels to a data URI.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] when the surface cannot be serialized.
    fn to_data_url(&self) -> Result<String, SurfaceError>;

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (width, height) = self.size();
        self.clear_rect(0.0, 0.0, width, height);
    }
}

// =============================================================
// Recording surface
// =============================================================

/// One primitive call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetLineWidth(f64),
    SetStrokeColor(String),
    SetFillColor(String),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
    ClearRect { x: f64, y: f64, width: f64, height: f64 },
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    Save,
    Restore,
}

/// Drawing state covered by save/restore.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub line_width: f64,
    pub stroke_color: String,
    pub fill_color: String,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke_color: "#000000".to_string(),
            fill_color: "#000000".to_string(),
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

/// A straight piece of painted ink. `from == to` is a dot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InkSegment {
    pub from: Point,
    pub to: Point,
    pub width: f64,
    pub color: String,
}

impl InkSegment {
    /// Hashable identity. `+ 0.0` folds `-0.0` into `0.0` so the key agrees
    /// with `PartialEq`.
    fn key(&self) -> ([u64; 5], &str) {
        let bits = |v: f64| (v + 0.0).to_bits();
        (
            [bits(self.from.x), bits(self.from.y), bits(self.to.x), bits(self.to.y), bits(self.width)],
            self.color.as_str(),
        )
    }
}

/// A painted rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InkFill {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

/// Headless surface that logs primitives and models visible ink.
///
/// Every `stroke` paints all segments of the current path with the current
/// style, as a canvas does. Clearing removes painted ink whose extent lies
/// inside the cleared rectangle.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<Command>,
    state: DrawState,
    saved: Vec<DrawState>,
    subpaths: Vec<Vec<Point>>,
    strokes: Vec<InkSegment>,
    fills: Vec<InkFill>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ..Self::default() }
    }

    /// Every primitive call so far.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Drain the command log, leaving ink and state intact.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Current drawing state.
    #[must_use]
    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Painted stroke segments in paint order, including repaints.
    #[must_use]
    pub fn strokes(&self) -> &[InkSegment] {
        &self.strokes
    }

    /// Painted rectangles in paint order.
    #[must_use]
    pub fn fills(&self) -> &[InkFill] {
        &self.fills
    }

    /// Visible stroke ink: painted segments with repaints of an identical
    /// segment collapsed to the first occurrence.
    #[must_use]
    pub fn ink(&self) -> Vec<InkSegment> {
        let mut seen = HashSet::with_capacity(self.strokes.len());
        let mut unique = Vec::new();
        for seg in &self.strokes {
            if seen.insert(seg.key()) {
                unique.push(seg.clone());
            }
        }
        unique
    }

    /// Whether nothing is painted.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.strokes.is_empty() && self.fills.is_empty()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(Command::SetLineWidth(width));
        self.state.line_width = width;
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(Command::SetStrokeColor(color.to_string()));
        self.state.stroke_color = color.to_string();
    }

    fn set_fill_color(&mut self, color: &str) {
        self.commands.push(Command::SetFillColor(color.to_string()));
        self.state.fill_color = color.to_string();
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(Command::SetLineCap(cap));
        self.state.line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.commands.push(Command::SetLineJoin(join));
        self.state.line_join = join;
    }

    fn begin_path(&mut self) {
        self.commands.push(Command::BeginPath);
        self.subpaths.clear();
    }

    fn move_to(&mut self, at: Point) {
        self.commands.push(Command::MoveTo(at));
        self.subpaths.push(vec![at]);
    }

    fn line_to(&mut self, to: Point) {
        self.commands.push(Command::LineTo(to));
        // A line_to with no current point behaves as move_to.
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(to),
            None => self.subpaths.push(vec![to]),
        }
    }

    fn stroke(&mut self) {
        self.commands.push(Command::Stroke);
        for subpath in &self.subpaths {
            for pair in subpath.windows(2) {
                self.strokes.push(InkSegment {
                    from: pair[0],
                    to: pair[1],
                    width: self.state.line_width,
                    color: self.state.stroke_color.clone(),
                });
            }
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::ClearRect { x, y, width, height });
        let inside = |p: Point| p.x >= x && p.x <= x + width && p.y >= y && p.y <= y + height;
        self.strokes.retain(|seg| !(inside(seg.from) && inside(seg.to)));
        self.fills.retain(|f| {
            !(inside(Point::new(f.x, f.y)) && inside(Point::new(f.x + f.width, f.y + f.height)))
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::FillRect { x, y, width, height });
        self.fills.push(InkFill { x, y, width, height, color: self.state.fill_color.clone() });
    }

    fn save(&mut self) {
        self.commands.push(Command::Save);
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        self.commands.push(Command::Restore);
        // Unbalanced restore is a no-op, as on a canvas.
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(SurfaceError::EmptySurface);
        }
        let body = serde_json::json!({
            "width": self.width,
            "height": self.height,
            "fills": self.fills,
            "strokes": self.ink(),
        });
        let json = serde_json::to_string(&body).map_err(|e| SurfaceError::Export(e.to_string()))?;
        Ok(format!("data:application/json,{json}"))
    }
}
