//! Sketchpad configuration parsed from a host-supplied JSON document.
//!
//! Every field has a default, so `{}` (or no document at all) yields the
//! stock presets: sizes `5/10/25/50` with `10` selected, and a red accent.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{BRUSH_SIZES, DEFAULT_COLOR, DEFAULT_SIZE_INDEX, MIN_GRID_CELL, PALETTE};
use crate::sampler::BoundsPolicy;

/// Error returned by [`SketchConfig::from_json`] and [`SketchConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("brush_sizes must not be empty")]
    NoBrushSizes,
    #[error("brush size {0} must be positive and finite")]
    InvalidBrushSize(f64),
    #[error("default_size_index {index} out of range (have {len} sizes)")]
    SizeIndex { index: usize, len: usize },
    #[error("palette must not be empty")]
    EmptyPalette,
    #[error("colors must not be empty")]
    EmptyColor,
    #[error("grid cells must be finite and at least one pixel (got {width}x{height})")]
    InvalidGrid { width: f64, height: f64 },
}

/// Guide grid painted once at startup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    pub color: String,
    pub cell_width: f64,
    pub cell_height: f64,
}

/// Typed sketchpad configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Preset widths offered by the size selector.
    pub brush_sizes: Vec<f64>,
    /// Preset selected at startup.
    pub default_size_index: usize,
    /// Colors offered by the palette selector.
    pub palette: Vec<String>,
    /// Color selected at startup. Need not be in the palette.
    pub default_color: String,
    /// Handling of pointer positions outside the surface.
    pub bounds: BoundsPolicy,
    /// Optional guide grid.
    pub grid: Option<GridConfig>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            brush_sizes: BRUSH_SIZES.to_vec(),
            default_size_index: DEFAULT_SIZE_INDEX,
            palette: PALETTE.iter().map(ToString::to_string).collect(),
            default_color: DEFAULT_COLOR.to_string(),
            bounds: BoundsPolicy::default(),
            grid: None,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`SketchConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the brush and grid rely on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brush_sizes.is_empty() {
            return Err(ConfigError::NoBrushSizes);
        }
        if let Some(&bad) = self.brush_sizes.iter().find(|w| !(w.is_finite() && **w > 0.0)) {
            return Err(ConfigError::InvalidBrushSize(bad));
        }
        if self.default_size_index >= self.brush_sizes.len() {
            return Err(ConfigError::SizeIndex { index: self.default_size_index, len: self.brush_sizes.len() });
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.default_color.trim().is_empty() || self.palette.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::EmptyColor);
        }
        if let Some(grid) = &self.grid {
            if !valid_cell(grid.cell_width) || !valid_cell(grid.cell_height) {
                return Err(ConfigError::InvalidGrid { width: grid.cell_width, height: grid.cell_height });
            }
            if grid.color.trim().is_empty() {
                return Err(ConfigError::EmptyColor);
            }
        }
        Ok(())
    }
}

/// Grid pitch must be finite and at least [`MIN_GRID_CELL`].
pub(crate) fn valid_cell(len: f64) -> bool {
    len.is_finite() && len >= MIN_GRID_CELL
}
