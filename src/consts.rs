//! Shared numeric and style constants for the sketchpad crate.

// ── Brush ───────────────────────────────────────────────────────

/// Preset brush widths offered by the size selector, in surface pixels.
pub const BRUSH_SIZES: [f64; 4] = [5.0, 10.0, 25.0, 50.0];

/// Index into [`BRUSH_SIZES`] selected at startup (10 px).
pub const DEFAULT_SIZE_INDEX: usize = 1;

/// Accent stroke color selected at startup.
pub const DEFAULT_COLOR: &str = "red";

/// Colors offered by the palette selector.
pub const PALETTE: [&str; 8] = ["red", "orange", "yellow", "green", "blue", "purple", "black", "white"];

// ── Grid ────────────────────────────────────────────────────────

/// Opaque background painted beneath the guide lines.
pub const GRID_BACKGROUND: &str = "#ffffff";

/// Guide line thickness.
pub const GRID_LINE_WIDTH: f64 = 0.5;

/// Smallest grid pitch accepted; one surface pixel.
pub const MIN_GRID_CELL: f64 = 1.0;

/// Offset that centers a thin line on a pixel row/column so it renders crisp.
pub const HALF_PIXEL: f64 = 0.5;

// ── Export ──────────────────────────────────────────────────────

/// Window name used when presenting an exported image.
pub const EXPORT_WINDOW_NAME: &str = "canvasImage";
