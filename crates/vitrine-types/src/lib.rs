//! Shared value types for Vitrine.
//!
//! These types cross crate boundaries: the stage reducer, the runtime drivers,
//! the CLI replay scripts and any host embedding. They carry no behavior beyond
//! small constructors and accessors.

pub mod content;
pub mod geometry;
pub mod id;
pub mod input;

pub use content::{ContentItem, MediaRef};
pub use geometry::{ElementBounds, Viewport};
pub use id::ElementId;
pub use input::{ListenerKind, RawInput};
