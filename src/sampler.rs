//! Point sampling: page coordinates in, surface-local coordinates out.
//!
//! The host reports pointer positions in page space. An [`InputSource`]
//! describes where the drawing surface sits on the page and how large it is;
//! the [`Sampler`] subtracts the origin and applies the [`BoundsPolicy`] to
//! anything that lands outside the surface.

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;

use serde::{Deserialize, Serialize};

/// A point in page or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the drawing surface lives relative to page coordinates.
pub trait InputSource {
    /// Page position of the surface's top-left corner.
    fn origin(&self) -> Point;

    /// Surface width and height in the same units as [`InputSource::origin`].
    fn extent(&self) -> (f64, f64);
}

/// An input source with a fixed origin and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedSource {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl FixedSource {
    #[must_use]
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self { origin, width, height }
    }
}

impl InputSource for FixedSource {
    fn origin(&self) -> Point {
        self.origin
    }

    fn extent(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

/// What to do with a pointer position outside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Pull the position onto the nearest surface edge.
    #[default]
    Clamp,
    /// Drop the position entirely.
    Ignore,
}

/// Converts raw page positions into surface-local positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    pub policy: BoundsPolicy,
}

impl Sampler {
    #[must_use]
    pub fn new(policy: BoundsPolicy) -> Self {
        Self { policy }
    }

    /// Translate a page position to surface space.
    ///
    /// Returns `None` for non-finite input, and for out-of-bounds input under
    /// [`BoundsPolicy::Ignore`].
    #[must_use]
    pub fn sample(&self, source: &dyn InputSource, page: Point) -> Option<Point> {
        if !page.x.is_finite() || !page.y.is_finite() {
            tracing::trace!(x = page.x, y = page.y, "dropping non-finite pointer position");
            return None;
        }

        let origin = source.origin();
        let local = Point::new(page.x - origin.x, page.y - origin.y);
        let (width, height) = source.extent();
        let inside = (0.0..=width).contains(&local.x) && (0.0..=height).contains(&local.y);
        if inside {
            return Some(local);
        }

        match self.policy {
            BoundsPolicy::Clamp => Some(Point::new(
                local.x.clamp(0.0, width.max(0.0)),
                local.y.clamp(0.0, height.max(0.0)),
            )),
            BoundsPolicy::Ignore => {
                tracing::trace!(x = local.x, y = local.y, "ignoring out-of-bounds pointer position");
                None
            }
        }
    }
}
