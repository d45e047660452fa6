//! Browser bindings: a [`Surface`] over `CanvasRenderingContext2d`, an
//! [`InputSource`] over the canvas element's page offset, and the export
//! window.
//!
//! This module is the only place that touches `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::EXPORT_WINDOW_NAME;
use crate::engine::ExportedImage;
use crate::sampler::{InputSource, Point};
use crate::surface::{LineCap, LineJoin, Surface, SurfaceError};

/// Canvas-backed drawing surface.
pub struct WebSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebSurface {
    /// Acquire the canvas's 2D context.
    ///
    /// # Errors
    ///
    /// [`SurfaceError::Uninitialized`] if the canvas cannot provide one.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| SurfaceError::Uninitialized(describe(&e)))?
            .ok_or_else(|| SurfaceError::Uninitialized("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Uninitialized("context is not a CanvasRenderingContext2d".into()))?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for WebSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill_color(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.ctx.set_line_join(join.as_str());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, at: Point) {
        self.ctx.move_to(at.x, at.y);
    }

    fn line_to(&mut self, to: Point) {
        self.ctx.line_to(to.x, to.y);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.clear_rect(x, y, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn to_data_url(&self) -> Result<String, SurfaceError> {
        self.canvas.to_data_url().map_err(|e| SurfaceError::Export(describe(&e)))
    }
}

/// Reads the canvas element's page offset and size at event time, so layout
/// changes are picked up without re-binding.
pub struct CanvasInput {
    canvas: HtmlCanvasElement,
}

impl CanvasInput {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl InputSource for CanvasInput {
    fn origin(&self) -> Point {
        Point::new(f64::from(self.canvas.offset_left()), f64::from(self.canvas.offset_top()))
    }

    fn extent(&self) -> (f64, f64) {
        (f64::from(self.canvas.width()), f64::from(self.canvas.height()))
    }
}

/// Open `image` in a new window sized to the canvas.
///
/// # Errors
///
/// Returns `Err` if there is no window, the popup is blocked, or resizing
/// fails.
#[allow(clippy::cast_possible_truncation)]
pub fn present_image(image: &ExportedImage) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
    let features = format!(
        "left=0,top=0,width={},height={},toolbar=0,resizable=0",
        image.width, image.height
    );
    let Some(popup) = window.open_with_url_and_target_and_features(&image.data_url, EXPORT_WINDOW_NAME, &features)?
    else {
        return Err(JsValue::from_str("export window was blocked"));
    };
    // Chrome ignores the size features for data URIs.
    popup.resize_to(image.width as i32, image.height as i32)?;
    tracing::debug!(width = image.width, height = image.height, "export window opened");
    Ok(())
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
