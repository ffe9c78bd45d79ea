use serde::{Deserialize, Serialize};

use crate::features::pinning::Boundary;

/// How a region derives its progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Progress follows the page scroll offset through the region's boundary.
    #[default]
    PageScroll,
    /// Native scrolling is locked; wheel/touch deltas feed an accumulator
    /// until it completes.
    InputIntercept,
}

/// Normalized progress of `offset` through `boundary`.
///
/// A missing (degenerate) boundary reports 0 instead of dividing by a zero
/// span.
pub fn page_progress(offset: f64, boundary: Option<&Boundary>) -> f32 {
    match boundary {
        Some(boundary) if offset.is_finite() => boundary.progress_at(offset),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_clamps_to_unit_range() {
        let boundary = Boundary::new(100.0, 500.0).unwrap();
        assert!(page_progress(0.0, Some(&boundary)).abs() < f32::EPSILON);
        assert!((page_progress(300.0, Some(&boundary)) - 0.5).abs() < 1e-6);
        assert!((page_progress(10_000.0, Some(&boundary)) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_degenerate_boundary_reports_zero() {
        assert!(page_progress(250.0, None).abs() < f32::EPSILON);
        assert!(Boundary::new(100.0, 100.0).is_none());
    }

    #[test]
    fn test_progress_is_monotonic_in_offset() {
        let boundary = Boundary::new(0.0, 1000.0).unwrap();
        let mut last = 0.0;
        for step in 0..=40 {
            let p = page_progress(f64::from(step) * 30.0, Some(&boundary));
            assert!(p >= last);
            last = p;
        }
    }
}
