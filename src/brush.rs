//! Brush state: the width and color applied to the next recorded sample.
//!
//! Widths come from a fixed preset list and colors from a palette (or a free
//! CSS color string). Changing the brush never touches samples that were
//! already recorded; each [`crate::history::Sample`] carries its own copy.

#[cfg(test)]
#[path = "brush_test.rs"]
mod brush_test;

use crate::config::SketchConfig;

/// Error returned by brush selection.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BrushError {
    /// The requested preset size does not exist.
    #[error("brush size index {index} out of range (have {len})")]
    SizeIndex { index: usize, len: usize },
    /// The requested palette entry does not exist.
    #[error("palette index {index} out of range (have {len})")]
    ColorIndex { index: usize, len: usize },
    /// Colors must be non-empty CSS color strings.
    #[error("brush color must not be empty")]
    EmptyColor,
}

/// A width/color pair as applied to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    /// Stroke thickness in surface pixels.
    pub width: f64,
    /// CSS color string.
    pub color: String,
}

impl Brush {
    #[must_use]
    pub fn new(width: f64, color: impl Into<String>) -> Self {
        Self { width, color: color.into() }
    }
}

/// The current brush selection plus the presets it is chosen from.
#[derive(Debug, Clone)]
pub struct BrushState {
    sizes: Vec<f64>,
    size_index: usize,
    palette: Vec<String>,
    color: String,
}

impl Default for BrushState {
    fn default() -> Self {
        Self::from_config(&SketchConfig::default())
    }
}

impl BrushState {
    /// Build the brush from a validated config.
    #[must_use]
    pub fn from_config(config: &SketchConfig) -> Self {
        Self {
            sizes: config.brush_sizes.clone(),
            size_index: config.default_size_index,
            palette: config.palette.clone(),
            color: config.default_color.clone(),
        }
    }

    /// Current stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.sizes.get(self.size_index).copied().unwrap_or_default()
    }

    /// Current stroke color.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Index of the selected preset size.
    #[must_use]
    pub fn size_index(&self) -> usize {
        self.size_index
    }

    #[must_use]
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    #[must_use]
    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Snapshot of the current selection.
    #[must_use]
    pub fn brush(&self) -> Brush {
        Brush::new(self.width(), self.color.clone())
    }

    /// Select a preset width by index.
    ///
    /// # Errors
    ///
    /// Returns [`BrushError::SizeIndex`] and keeps the current width if `index`
    /// is not a preset.
    pub fn select_size(&mut self, index: usize) -> Result<(), BrushError> {
        if index >= self.sizes.len() {
            return Err(BrushError::SizeIndex { index, len: self.sizes.len() });
        }
        self.size_index = index;
        Ok(())
    }

    /// Select a palette color by index.
    ///
    /// # Errors
    ///
    /// Returns [`BrushError::ColorIndex`] and keeps the current color if
    /// `index` is not in the palette.
    pub fn select_color(&mut self, index: usize) -> Result<(), BrushError> {
        let Some(color) = self.palette.get(index) else {
            return Err(BrushError::ColorIndex { index, len: self.palette.len() });
        };
        self.color.clone_from(color);
        Ok(())
    }

    /// Set an arbitrary CSS color, e.g. from a color picker.
    ///
    /// # Errors
    ///
    /// Returns [`BrushError::EmptyColor`] for a blank string.
    pub fn set_color(&mut self, color: &str) -> Result<(), BrushError> {
        let color = color.trim();
        if color.is_empty() {
            return Err(BrushError::EmptyColor);
        }
        self.color = color.to_string();
        Ok(())
    }
}
