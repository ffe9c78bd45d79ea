//! Small shared types used across stage slices.

mod task;
mod timer;

pub use task::{TaskId, TaskSeq};
pub use timer::{ActiveTimers, TimerId, TimerOwner, TimerPurpose, TimerScope, TimerSeq};
