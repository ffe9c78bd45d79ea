//! Viewport and element measurements, in CSS pixels.

use serde::{Deserialize, Serialize};

/// Visible area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

/// Bounding box of an element, with `top` measured from the document origin
/// (not from the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
    pub width: f64,
}

impl ElementBounds {
    pub fn new(top: f64, height: f64, width: f64) -> Self {
        Self { top, height, width }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}
