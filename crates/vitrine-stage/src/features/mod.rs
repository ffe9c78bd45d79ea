//! Feature slices for the stage (state/update per slice).

pub mod contact;
pub mod index;
pub mod intro;
pub mod navigation;
pub mod pinning;
pub mod progress;
pub mod transition;
