//! Pinned regions: boundaries, phase tracking and crossing callbacks.

mod boundary;
mod controller;
mod region;
pub mod update;

pub use boundary::{Boundary, BoundarySizing, compute_boundary};
pub use controller::{PinCrossing, PinPhase, crossings, phase_at};
pub use region::{RegionSpec, RegionState, RelayoutOutcome, ScrollOutcome};
