use serde::{Deserialize, Serialize};
use vitrine_types::{ElementBounds, Viewport};

/// Scroll span `[start, end]` over which a region is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    pub start: f64,
    pub end: f64,
}

impl Boundary {
    /// Returns `None` for empty, inverted or non-finite spans.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        (start.is_finite() && end.is_finite() && end - start > 0.0).then_some(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn progress_at(&self, offset: f64) -> f32 {
        ((offset - self.start) / self.length()).clamp(0.0, 1.0) as f32
    }

    /// Page offset that yields `progress`.
    pub fn offset_for(&self, progress: f32) -> f64 {
        self.start + f64::from(progress.clamp(0.0, 1.0)) * self.length()
    }
}

/// How far the page scrolls while a region stays pinned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundarySizing {
    /// `items × fraction × viewport height`. Without a fraction the configured
    /// default applies.
    PerItem {
        #[serde(default)]
        fraction: Option<f64>,
    },
    /// The element's own height minus one viewport (tall sticky sections).
    ElementSpan,
    Fixed { distance: f64 },
}

impl Default for BoundarySizing {
    fn default() -> Self {
        BoundarySizing::PerItem { fraction: None }
    }
}

/// Derives a region's boundary from layout.
///
/// `trigger` is the viewport position (0 = top, 0.5 = center) the element's
/// top must reach for pinning to begin.
pub fn compute_boundary(
    sizing: BoundarySizing,
    bounds: ElementBounds,
    viewport: Viewport,
    item_count: usize,
    trigger: f64,
    default_fraction: f64,
) -> Option<Boundary> {
    let start = bounds.top - trigger * viewport.height;
    let length = match sizing {
        BoundarySizing::PerItem { fraction } => {
            item_count as f64 * fraction.unwrap_or(default_fraction) * viewport.height
        }
        BoundarySizing::ElementSpan => bounds.height - viewport.height,
        BoundarySizing::Fixed { distance } => distance,
    };
    Boundary::new(start, start + length)
}
