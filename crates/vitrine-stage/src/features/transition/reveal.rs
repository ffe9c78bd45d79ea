use serde::Serialize;
use vitrine_core::config::TransitionsConfig;

use super::{Easing, TransitionKind, TransitionState, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealFrame {
    pub opacity: f32,
    pub translate_y: f32,
}

/// Fire-once entrance: hidden until the element is sufficiently visible,
/// then eased into place. Leaving and re-entering the viewport never
/// replays it.
#[derive(Debug, Clone)]
pub struct EntranceReveal {
    pub threshold: f32,
    pub transition: TransitionState,
    duration_ms: u64,
    distance_px: f32,
}

impl EntranceReveal {
    pub fn new(cfg: &TransitionsConfig) -> Self {
        Self {
            threshold: cfg.reveal_threshold,
            transition: TransitionState::new(TransitionKind::EntranceReveal),
            duration_ms: cfg.reveal_ms,
            distance_px: cfg.reveal_distance_px,
        }
    }

    /// Feeds a visibility ratio. Returns true when this call started the
    /// reveal.
    pub fn observe(&mut self, ratio: f32, now_ms: u64) -> bool {
        if self.transition.started_at_ms.is_some() || ratio < self.threshold {
            return false;
        }
        self.transition.start(now_ms)
    }

    /// Returns true on the frame the reveal finishes.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.transition.is_running() {
            return false;
        }
        if self.tween(1.0, 0.0).is_done(now_ms) {
            self.transition.complete();
            return true;
        }
        false
    }

    pub fn frame(&self, now_ms: u64) -> RevealFrame {
        match self.transition.started_at_ms {
            None => RevealFrame {
                opacity: 0.0,
                translate_y: self.distance_px,
            },
            Some(_) if self.transition.is_complete() => RevealFrame {
                opacity: 1.0,
                translate_y: 0.0,
            },
            Some(_) => RevealFrame {
                opacity: self.tween(0.0, 1.0).sample(now_ms),
                translate_y: self.tween(self.distance_px, 0.0).sample(now_ms),
            },
        }
    }

    fn tween(&self, from: f32, to: f32) -> Tween {
        Tween::new(
            from,
            to,
            self.transition.started_at_ms.unwrap_or(0),
            self.duration_ms,
            Easing::EaseOutCubic,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_fires_once() {
        let mut reveal = EntranceReveal::new(&TransitionsConfig::default());

        assert!(!reveal.observe(0.1, 0));
        assert!(reveal.observe(0.2, 100));
        assert!(!reveal.observe(0.9, 150));

        assert!(!reveal.tick(500));
        assert!(reveal.tick(900));
        assert!(reveal.transition.is_complete());

        // Leaving and coming back does nothing.
        assert!(!reveal.observe(0.0, 1000));
        assert!(!reveal.observe(1.0, 1100));
        assert!(!reveal.tick(2000));
        assert_eq!(
            reveal.frame(2000),
            RevealFrame {
                opacity: 1.0,
                translate_y: 0.0
            }
        );
    }

    #[test]
    fn test_hidden_state_before_trigger() {
        let reveal = EntranceReveal::new(&TransitionsConfig::default());
        let frame = reveal.frame(0);
        assert!(frame.opacity.abs() < f32::EPSILON);
        assert!((frame.translate_y - 40.0).abs() < f32::EPSILON);
    }
}
