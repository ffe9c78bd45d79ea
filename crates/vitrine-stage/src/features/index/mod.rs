//! Progress to discrete item selection, plus the derived carousel values
//! (rotation, gap, track offset, step fill).

mod item_set;

use serde::{Deserialize, Serialize};
use vitrine_core::config::GapConfig;

pub use item_set::ItemSet;

/// Whether neighbor lookup wraps around the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexLayout {
    #[default]
    Linear,
    Circular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// One full turn across the whole sequence.
    PerSequence,
    /// Rotation advances one item's share of a turn across the sequence.
    PerItemCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Neighbors {
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

/// Presentation role of one item relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Active,
    Previous,
    Next,
    Hidden,
}

fn sanitize(progress: f32) -> f32 {
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// `min(floor(p * n), n - 1)`; `None` for an empty set.
pub fn active_index(progress: f32, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let raw = (f64::from(sanitize(progress)) * count as f64).floor() as usize;
    Some(raw.min(count - 1))
}

pub fn neighbors(index: usize, count: usize, layout: IndexLayout) -> Neighbors {
    if count == 0 || index >= count {
        return Neighbors::default();
    }
    match layout {
        IndexLayout::Circular => Neighbors {
            previous: Some((index + count - 1) % count),
            next: Some((index + 1) % count),
        },
        IndexLayout::Linear => Neighbors {
            previous: index.checked_sub(1),
            next: (index + 1 < count).then_some(index + 1),
        },
    }
}

pub fn slot(index: usize, active: usize, count: usize, layout: IndexLayout) -> Slot {
    if index == active {
        return Slot::Active;
    }
    let around = neighbors(active, count, layout);
    if around.next == Some(index) {
        Slot::Next
    } else if around.previous == Some(index) {
        Slot::Previous
    } else {
        Slot::Hidden
    }
}

pub fn rotation_deg(progress: f32, count: usize, mode: RotationMode) -> f32 {
    let p = sanitize(progress);
    match mode {
        RotationMode::PerSequence => p * 360.0,
        RotationMode::PerItemCount if count == 0 => 0.0,
        RotationMode::PerItemCount => p * 360.0 / count as f32,
    }
}

/// Gap between active and neighbor items, interpolated between breakpoints.
pub fn gap(viewport_width: f64, cfg: &GapConfig) -> f64 {
    if viewport_width <= cfg.min_width {
        cfg.min_gap
    } else if viewport_width >= cfg.max_width {
        cfg.max_gap
    } else {
        let t = (viewport_width - cfg.min_width) / (cfg.max_width - cfg.min_width);
        cfg.min_gap + t * (cfg.max_gap - cfg.min_gap)
    }
}

/// Horizontal translation of a strip wider than the viewport; never negative
/// travel when the strip fits.
pub fn track_offset(progress: f32, track_width: f64, viewport_width: f64) -> f64 {
    -f64::from(sanitize(progress)) * (track_width - viewport_width).max(0.0)
}

/// Fill of the step indicator for item `index`: 0 before it, 1 after it,
/// partial while progress is inside its slice.
pub fn step_fill(progress: f32, index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (sanitize(progress) * count as f32 - index as f32).clamp(0.0, 1.0)
}
