use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::brush::{BrushError, BrushState};
use crate::config::{ConfigError, SketchConfig};
use crate::history::{History, HistoryError, Role, Sample};
use crate::input::{GestureState, PointerEvent};
use crate::render::{self, Pen};
use crate::sampler::{InputSource, Point, Sampler};
use crate::surface::{LineCap, LineJoin, Surface, SurfaceError};
use crate::web::{self, CanvasInput, WebSurface};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Error returned while building an engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// A serialized snapshot of the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage {
    /// Image data URI.
    pub data_url: String,
    /// Surface width at export time.
    pub width: f64,
    /// Surface height at export time.
    pub height: f64,
}

/// Core engine state: gesture controller, recorder and renderer wiring.
///
/// Generic over the surface and input source so it can be tested without
/// WASM/browser dependencies; [`Engine`] binds it to a real canvas.
pub struct EngineCore<S: Surface, I: InputSource> {
    surface: S,
    input: I,
    sampler: Sampler,
    brush: BrushState,
    history: History,
    state: GestureState,
    pen: Pen,
}

impl<S: Surface, I: InputSource> EngineCore<S, I> {
    /// Build an engine with the stock presets.
    #[must_use]
    pub fn new(surface: S, input: I) -> Self {
        let config = SketchConfig::default();
        let mut core = Self::bare(surface, input, &config);
        core.prepare_surface();
        core
    }

    /// Build an engine from a config, drawing its grid if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the config is invalid.
    pub fn with_config(surface: S, input: I, config: &SketchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut core = Self::bare(surface, input, config);
        core.prepare_surface();
        if let Some(grid) = &config.grid {
            core.draw_grid(&grid.color, grid.cell_width, grid.cell_height)?;
        }
        Ok(core)
    }

    fn bare(surface: S, input: I, config: &SketchConfig) -> Self {
        Self {
            surface,
            input,
            sampler: Sampler::new(config.bounds),
            brush: BrushState::from_config(config),
            history: History::new(),
            state: GestureState::Idle,
            pen: Pen::default(),
        }
    }

    /// Round caps and joins for the whole session; default brush applied.
    fn prepare_surface(&mut self) {
        self.surface.set_line_cap(LineCap::Round);
        self.surface.set_line_join(LineJoin::Round);
        self.surface.set_line_width(self.brush.width());
        self.surface.set_stroke_color(self.brush.color());
    }

    // --- Pointer input ---

    /// Dispatch a pointer event at a page position.
    pub fn handle_pointer(&mut self, event: PointerEvent, page: Point) {
        match event {
            PointerEvent::Down => self.on_pointer_down(page),
            PointerEvent::Move => self.on_pointer_move(page),
            PointerEvent::Up => self.on_pointer_up(page),
            PointerEvent::Leave => self.on_pointer_leave(page),
        }
    }

    /// Start a gesture. Ignored while one is already in progress, or when the
    /// position is rejected by the sampler.
    pub fn on_pointer_down(&mut self, page: Point) {
        if self.state.is_dragging() {
            return;
        }
        let Some(at) = self.sampler.sample(&self.input, page) else {
            return;
        };
        let brush = self.brush.brush();
        if let Err(e) = self.history.record(Sample::new(at, brush.clone(), Role::Begin)) {
            tracing::warn!(error = %e, "gesture not started");
            return;
        }
        self.pen.begin(&mut self.surface, at, &brush);
        self.pen.flush(&mut self.surface);
        self.state = GestureState::Dragging;
        tracing::debug!(x = at.x, y = at.y, width = brush.width, color = %brush.color, "gesture started");
    }

    /// Extend the gesture with the current brush. No-op when idle.
    pub fn on_pointer_move(&mut self, page: Point) {
        if !self.state.is_dragging() {
            return;
        }
        let Some(to) = self.sampler.sample(&self.input, page) else {
            return;
        };
        let brush = self.brush.brush();
        self.pen.extend(&mut self.surface, to, &brush);
        self.pen.flush(&mut self.surface);
        if let Err(e) = self.history.record(Sample::new(to, brush, Role::Middle)) {
            tracing::warn!(error = %e, "sample not recorded");
        }
    }

    /// End the gesture. No-op when idle.
    pub fn on_pointer_up(&mut self, _page: Point) {
        self.end_gesture(PointerEvent::Up);
    }

    /// The pointer left the surface: end the gesture as if released.
    pub fn on_pointer_leave(&mut self, _page: Point) {
        self.end_gesture(PointerEvent::Leave);
    }

    fn end_gesture(&mut self, event: PointerEvent) {
        if !self.state.is_dragging() {
            return;
        }
        self.state = GestureState::Idle;
        self.pen.lift(&mut self.surface);
        match self.history.close_run() {
            Ok(samples) => tracing::debug!(?event, samples, runs = self.history.run_count(), "gesture ended"),
            Err(e) => tracing::warn!(?event, error = %e, "gesture ended without an open run"),
        }
    }

    // --- Actions ---

    /// Remove the most recent gesture and repaint from history.
    ///
    /// Returns `false` when there is nothing to undo or a gesture is still in
    /// progress.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_last_run() {
            Ok(run) => {
                self.redraw();
                tracing::debug!(removed = run.len(), remaining = self.history.len(), "undo");
                true
            }
            Err(HistoryError::Empty) => false,
            Err(e) => {
                tracing::debug!(reason = %e, "undo skipped");
                false
            }
        }
    }

    /// Clear the surface and repaint everything in history.
    pub fn redraw(&mut self) {
        self.pen = render::redraw_all(self.history.samples(), &mut self.surface);
        if self.state.is_dragging() {
            if let Some(last) = self.history.samples().last() {
                self.pen.place(last.position);
            }
        }
    }

    /// Drop all history and blank the surface. Abandons any open gesture.
    pub fn clear(&mut self) {
        self.pen.lift(&mut self.surface);
        self.history.clear();
        self.state = GestureState::Idle;
        self.surface.clear();
        tracing::debug!("cleared");
    }

    /// Serialize the current surface.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::EmptySurface`] for a zero-area surface, or whatever the
    /// surface reports when serialization fails.
    pub fn export_image(&self) -> Result<ExportedImage, SurfaceError> {
        let (width, height) = self.surface.size();
        if width <= 0.0 || height <= 0.0 {
            return Err(SurfaceError::EmptySurface);
        }
        let data_url = self.surface.to_data_url()?;
        Ok(ExportedImage { data_url, width, height })
    }

    /// Paint the guide grid over the surface.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::InvalidGrid`] for cells that are non-finite or under one pixel.
    pub fn draw_grid(&mut self, color: &str, cell_width: f64, cell_height: f64) -> Result<(), SurfaceError> {
        render::draw_grid(&mut self.surface, color, cell_width, cell_height)?;
        self.pen.reopen();
        Ok(())
    }

    // --- Brush ---

    /// Select a preset width for subsequent samples.
    ///
    /// # Errors
    ///
    /// [`BrushError::SizeIndex`] for an unknown preset.
    pub fn select_size(&mut self, index: usize) -> Result<(), BrushError> {
        self.brush.select_size(index)
    }

    /// Select a palette color for subsequent samples.
    ///
    /// # Errors
    ///
    /// [`BrushError::ColorIndex`] for an unknown palette entry.
    pub fn select_color(&mut self, index: usize) -> Result<(), BrushError> {
        self.brush.select_color(index)
    }

    /// Set a free CSS color for subsequent samples.
    ///
    /// # Errors
    ///
    /// [`BrushError::EmptyColor`] for a blank string.
    pub fn set_color(&mut self, color: &str) -> Result<(), BrushError> {
        self.brush.set_color(color)
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn input(&self) -> &I {
        &self.input
    }
}

/// The browser-facing engine. Wraps [`EngineCore`] over a canvas element and
/// is exported to JavaScript as `Sketchpad`.
#[wasm_bindgen(js_name = Sketchpad)]
pub struct Engine {
    core: EngineCore<WebSurface, CanvasInput>,
}

#[wasm_bindgen(js_class = Sketchpad)]
impl Engine {
    /// Bind to a canvas. `config` is an optional JSON config document.
    ///
    /// # Errors
    ///
    /// Throws if the config is invalid or the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: Option<String>) -> Result<Engine, JsValue> {
        let config = match config {
            Some(raw) => SketchConfig::from_json(&raw).map_err(js_error)?,
            None => SketchConfig::default(),
        };
        let surface = WebSurface::new(canvas.clone()).map_err(js_error)?;
        let core = EngineCore::with_config(surface, CanvasInput::new(canvas), &config).map_err(js_error)?;
        Ok(Self { core })
    }

    // --- Delegated pointer input (page coordinates) ---

    pub fn on_pointer_down(&mut self, page_x: f64, page_y: f64) {
        self.core.handle_pointer(PointerEvent::Down, Point::new(page_x, page_y));
    }

    pub fn on_pointer_move(&mut self, page_x: f64, page_y: f64) {
        self.core.handle_pointer(PointerEvent::Move, Point::new(page_x, page_y));
    }

    pub fn on_pointer_up(&mut self, page_x: f64, page_y: f64) {
        self.core.handle_pointer(PointerEvent::Up, Point::new(page_x, page_y));
    }

    pub fn on_pointer_leave(&mut self, page_x: f64, page_y: f64) {
        self.core.handle_pointer(PointerEvent::Leave, Point::new(page_x, page_y));
    }

    // --- Delegated actions ---

    pub fn undo(&mut self) -> bool {
        self.core.undo()
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// The canvas as a PNG data URI.
    ///
    /// # Errors
    ///
    /// Throws if the canvas cannot be serialized.
    pub fn export_data_url(&self) -> Result<String, JsValue> {
        self.core.export_image().map(|image| image.data_url).map_err(js_error)
    }

    /// Open the canvas image in a new window sized to the canvas.
    ///
    /// # Errors
    ///
    /// Throws if serialization fails or the window cannot be opened.
    pub fn export(&self) -> Result<(), JsValue> {
        let image = self.core.export_image().map_err(js_error)?;
        web::present_image(&image)
    }

    /// # Errors
    ///
    /// Throws for cells that are non-finite or under one pixel.
    pub fn draw_grid(&mut self, color: &str, cell_width: f64, cell_height: f64) -> Result<(), JsValue> {
        self.core.draw_grid(color, cell_width, cell_height).map_err(js_error)
    }

    /// # Errors
    ///
    /// Throws for an unknown preset.
    pub fn select_size(&mut self, index: usize) -> Result<(), JsValue> {
        self.core.select_size(index).map_err(js_error)
    }

    /// # Errors
    ///
    /// Throws for an unknown palette entry.
    pub fn select_color(&mut self, index: usize) -> Result<(), JsValue> {
        self.core.select_color(index).map_err(js_error)
    }

    /// # Errors
    ///
    /// Throws for a blank color.
    pub fn set_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.core.set_color(color).map_err(js_error)
    }

    // --- Delegated queries ---

    #[wasm_bindgen(getter)]
    pub fn dragging(&self) -> bool {
        self.core.state().is_dragging()
    }

    #[wasm_bindgen(getter)]
    pub fn sample_count(&self) -> usize {
        self.core.history().len()
    }

    #[wasm_bindgen(getter)]
    pub fn gesture_count(&self) -> usize {
        self.core.history().run_count()
    }

    #[wasm_bindgen(getter)]
    pub fn line_width(&self) -> f64 {
        self.core.brush().width()
    }

    #[wasm_bindgen(getter)]
    pub fn color(&self) -> String {
        self.core.brush().color().to_string()
    }
}

/// Convert a crate error into a thrown JavaScript `Error`.
fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
