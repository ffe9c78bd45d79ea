use serde::Serialize;

use super::Boundary;

/// Where the page sits relative to a region's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinPhase {
    #[default]
    Before,
    Pinned,
    After,
}

/// Edge-triggered boundary crossings, named after the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PinCrossing {
    /// Scrolling forward into the boundary.
    Enter,
    /// Scrolling forward past the end.
    LeaveForward,
    /// Scrolling backward into the boundary from past the end.
    EnterBack,
    /// Scrolling backward out past the start.
    LeaveBackward,
}

pub fn phase_at(boundary: Option<&Boundary>, offset: f64) -> PinPhase {
    match boundary {
        None => PinPhase::Before,
        Some(b) if offset < b.start => PinPhase::Before,
        Some(b) if offset > b.end => PinPhase::After,
        Some(_) => PinPhase::Pinned,
    }
}

/// Crossings fired when moving between phases.
///
/// A jump over the whole boundary fires both edges in travel order.
pub fn crossings(from: PinPhase, to: PinPhase) -> &'static [PinCrossing] {
    use PinCrossing::{Enter, EnterBack, LeaveBackward, LeaveForward};
    use PinPhase::{After, Before, Pinned};

    match (from, to) {
        (Before, Pinned) => &[Enter],
        (Before, After) => &[Enter, LeaveForward],
        (Pinned, After) => &[LeaveForward],
        (After, Pinned) => &[EnterBack],
        (After, Before) => &[EnterBack, LeaveBackward],
        (Pinned, Before) => &[LeaveBackward],
        _ => &[],
    }
}
