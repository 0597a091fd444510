//! The finder region a detection must fall within.
//!
//! Coordinates are logical units in the host view's coordinate space.

use serde::{Deserialize, Serialize};

/// The on-screen rectangle a detected code must lie within.
///
/// Owned by the caller and typically mirrors the finder overlay's current
/// layout. Filters read it per evaluation and never keep it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinderRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FinderRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether a point lies inside this region, edges included.
    pub fn contains_point(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Whether the rectangle `(x, y, width, height)` lies fully inside this
    /// region. Touching an edge counts as inside.
    pub fn contains_rect(&self, x: f64, y: f64, width: f64, height: f64) -> bool {
        x >= self.x && x + width <= self.right() && y >= self.y && y + height <= self.bottom()
    }
}
