//! Scroll-driven presentation engine for Vitrine.
//!
//! The stage is an Elm-style core: a pure reducer (`update`) turns
//! `StageEvent`s into state changes plus `StageEffect`s, and a driver executes
//! those effects. Two drivers ship here:
//! - `runtime::StageRuntime`: tokio timers, async media and form tasks
//! - `sim::Simulation`: a virtual clock and page model for replays and tests

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod host;
pub mod runtime;
pub mod sim;
pub mod state;
pub mod update;

pub use effects::{Notice, StageEffect};
pub use events::{StageCommand, StageEvent};
pub use features::{contact, index, intro, navigation, pinning, progress, transition};
pub use host::{Host, InputDisposition, Measure};
pub use runtime::StageRuntime;
pub use sim::Simulation;
pub use state::{StageSnapshot, StageState};
pub use update::update;
