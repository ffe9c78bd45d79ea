//! Time-based transitions: entrance reveals, image crossfades, text reveals
//! and the tween/timeline primitives they share.

mod crossfade;
mod media_cache;
mod reveal;
mod text;
mod tween;
pub mod update;

use serde::Serialize;

pub use crossfade::{Crossfade, CrossfadeTrigger};
pub use media_cache::{MediaCache, MediaStatus};
pub use reveal::{EntranceReveal, RevealFrame};
pub use text::{TextReveal, TextRevealMode};
pub use tween::{Easing, Property, PropertyValue, Timeline, Tween, TweenDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    EntranceReveal,
    Crossfade,
    TextReveal,
    CharacterScramble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPhase {
    #[default]
    Idle,
    Running,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionState {
    pub kind: TransitionKind,
    pub phase: TransitionPhase,
    pub started_at_ms: Option<u64>,
}

impl TransitionState {
    pub fn new(kind: TransitionKind) -> Self {
        Self {
            kind,
            phase: TransitionPhase::Idle,
            started_at_ms: None,
        }
    }

    /// Starts unless already running.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.is_running() {
            return false;
        }
        self.phase = TransitionPhase::Running;
        self.started_at_ms = Some(now_ms);
        true
    }

    pub fn complete(&mut self) {
        self.phase = TransitionPhase::Complete;
    }

    pub fn is_running(&self) -> bool {
        self.phase == TransitionPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TransitionPhase::Complete
    }

    /// Milliseconds since start, or 0 when not started.
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.started_at_ms
            .map_or(0, |start| now_ms.saturating_sub(start))
    }
}
