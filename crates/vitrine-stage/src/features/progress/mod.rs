//! Scroll progress sources.
//!
//! Two ways to turn raw input into a normalized `[0, 1]` position:
//! - page scroll measured against a pinned region's boundary (`source`)
//! - wheel/touch deltas accumulated while native scrolling is captured
//!   (`intercept`)
//!
//! `listeners` tracks which input subscriptions each owner holds so unmount
//! can release all of them.

mod intercept;
mod listeners;
mod source;
pub mod update;

pub use intercept::{InterceptOutcome, InterceptState, accumulate};
pub use listeners::{ListenerRegistry, listeners_for};
pub use source::{CaptureMode, page_progress};
