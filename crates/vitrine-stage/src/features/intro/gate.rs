use serde::Serialize;
use vitrine_types::{ElementBounds, ElementId};

use crate::common::TimerId;
use crate::features::pinning::RegionSpec;
use crate::features::transition::{Easing, Property, PropertyValue, Timeline, TweenDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroPhase {
    #[default]
    Pending,
    Playing,
    Done,
}

#[derive(Debug, Clone)]
pub struct QueuedMount {
    pub spec: RegionSpec,
    pub bounds: ElementBounds,
}

/// Anchor requested by the initial load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub anchor: ElementId,
    /// Settle timer; cleared once the scroll is issued.
    pub timer: Option<TimerId>,
    pub resolved: bool,
}

/// Default intro choreography: the title fades up, then the overlay wipes away.
pub fn intro_timeline(duration_ms: u64) -> Timeline {
    let title = ElementId::new("intro-title");
    let overlay = ElementId::new("intro-overlay");
    let lead = duration_ms * 35 / 100;
    let exit_at = duration_ms * 70 / 100;
    let exit = duration_ms - exit_at;

    let track = |target: &ElementId, property, from, to, offset_ms, duration_ms, easing| {
        TweenDescriptor {
            target: target.clone(),
            property,
            from,
            to,
            offset_ms,
            duration_ms,
            easing,
        }
    };

    Timeline::new()
        .with(track(&title, Property::Opacity, 0.0, 1.0, 0, lead, Easing::EaseOutCubic))
        .with(track(&title, Property::TranslateY, 24.0, 0.0, 0, lead, Easing::EaseOutCubic))
        .with(track(&overlay, Property::Opacity, 1.0, 0.0, exit_at, exit, Easing::EaseInOutCubic))
        .with(track(
            &overlay,
            Property::ClipInset,
            0.0,
            100.0,
            exit_at,
            exit,
            Easing::EaseInOutCubic,
        ))
}

#[derive(Debug, Clone)]
pub struct IntroGate {
    phase: IntroPhase,
    timeline: Timeline,
    started_at_ms: Option<u64>,
    skipped: bool,
    played: bool,
    queued: Vec<QueuedMount>,
}

impl IntroGate {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            phase: IntroPhase::Pending,
            timeline,
            started_at_ms: None,
            skipped: false,
            played: false,
            queued: Vec::new(),
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Mounts are held back until the gate opens.
    pub fn is_gating(&self) -> bool {
        self.phase != IntroPhase::Done
    }

    pub fn is_playing(&self) -> bool {
        self.phase == IntroPhase::Playing
    }

    /// Whether the intro ever reached `Playing`.
    pub fn has_played(&self) -> bool {
        self.played
    }

    pub fn was_skipped(&self) -> bool {
        self.skipped
    }

    pub fn play(&mut self) -> bool {
        if self.phase != IntroPhase::Pending {
            return false;
        }
        self.phase = IntroPhase::Playing;
        self.played = true;
        true
    }

    /// Goes straight to `Done` without ever playing.
    pub fn skip(&mut self) -> bool {
        if self.phase != IntroPhase::Pending {
            return false;
        }
        self.phase = IntroPhase::Done;
        self.skipped = true;
        true
    }

    /// Host-signalled early finish.
    pub fn finish(&mut self) -> bool {
        if self.phase != IntroPhase::Playing {
            return false;
        }
        self.phase = IntroPhase::Done;
        true
    }

    /// Advances the timeline; the first frame anchors its start. Returns true
    /// on the frame it completes.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.phase != IntroPhase::Playing {
            return false;
        }
        let start = *self.started_at_ms.get_or_insert(now_ms);
        if self.timeline.is_complete(now_ms.saturating_sub(start)) {
            self.phase = IntroPhase::Done;
            return true;
        }
        false
    }

    pub fn sample(&self, now_ms: u64) -> Vec<PropertyValue> {
        match (self.phase, self.started_at_ms) {
            (IntroPhase::Playing, Some(start)) => {
                self.timeline.sample(now_ms.saturating_sub(start))
            }
            (IntroPhase::Playing, None) | (IntroPhase::Pending, _) => self.timeline.sample(0),
            (IntroPhase::Done, _) => Vec::new(),
        }
    }

    pub fn queue(&mut self, mount: QueuedMount) {
        self.queued.retain(|m| m.spec.id != mount.spec.id);
        self.queued.push(mount);
    }

    /// Forgets a queued mount. Returns true if one was removed.
    pub fn dequeue(&mut self, id: &ElementId) -> bool {
        let before = self.queued.len();
        self.queued.retain(|m| &m.spec.id != id);
        before != self.queued.len()
    }

    pub fn take_queued(&mut self) -> Vec<QueuedMount> {
        std::mem::take(&mut self.queued)
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_is_one_way() {
        let mut gate = IntroGate::new(intro_timeline(1000));
        assert!(gate.play());
        assert!(!gate.skip());
        assert!(!gate.tick(0));
        assert!(!gate.tick(999));
        assert!(gate.tick(1000));
        assert_eq!(gate.phase(), IntroPhase::Done);
        assert!(!gate.play());
        assert!(!gate.finish());
    }

    #[test]
    fn test_skip_never_plays() {
        let mut gate = IntroGate::new(intro_timeline(1000));
        assert!(gate.skip());
        assert!(!gate.has_played());
        assert!(gate.was_skipped());
        assert!(!gate.is_gating());
    }

    #[test]
    fn test_timeline_anchors_on_first_frame() {
        let mut gate = IntroGate::new(intro_timeline(1000));
        gate.play();
        assert!(!gate.tick(5000));
        assert!(gate.tick(6000));
    }

    #[test]
    fn test_queue_replaces_same_id() {
        let mut gate = IntroGate::new(Timeline::new());
        let bounds = ElementBounds::default();
        gate.queue(QueuedMount {
            spec: RegionSpec::new("gallery"),
            bounds,
        });
        gate.queue(QueuedMount {
            spec: RegionSpec::new("gallery"),
            bounds,
        });
        assert_eq!(gate.queued_len(), 1);
        assert!(gate.dequeue(&ElementId::new("gallery")));
        assert!(gate.take_queued().is_empty());
    }

    #[test]
    fn test_default_timeline_spans_duration() {
        assert_eq!(intro_timeline(2400).duration_ms(), 2400);
    }
}
