//! Load-time intro gate and deep-link resolution.
//!
//! One-way lifecycle: `Pending -> Playing -> Done`, or `Pending -> Done`
//! when the load targets an anchor. Region mounts arriving before `Done`
//! are queued and replayed in order.

mod gate;
pub mod update;

pub use gate::{DeepLink, IntroGate, IntroPhase, QueuedMount, intro_timeline};
