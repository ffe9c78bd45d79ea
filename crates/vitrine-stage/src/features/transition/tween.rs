use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vitrine_types::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseInOutQuad,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
    SmoothStep,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// A single eased interpolation anchored at an absolute start time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    /// Linear time fraction in `[0, 1]`.
    pub fn fraction(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let eased = self.easing.apply(self.fraction(now_ms));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    TranslateY,
    Scale,
    /// Crossfade mix between current and next media.
    Blend,
    /// Percentage of an overlay clipped away.
    ClipInset,
}

/// One track of a timeline, relative to the timeline's start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TweenDescriptor {
    pub target: ElementId,
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub offset_ms: u64,
    pub duration_ms: u64,
    #[serde(default)]
    pub easing: Easing,
}

impl TweenDescriptor {
    fn tween(&self) -> Tween {
        Tween::new(self.from, self.to, self.offset_ms, self.duration_ms, self.easing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyValue {
    pub target: ElementId,
    pub property: Property,
    pub value: f32,
}

/// Ordered tween tracks sampled by elapsed time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tracks: Vec<TweenDescriptor>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, track: TweenDescriptor) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn tracks(&self) -> &[TweenDescriptor] {
        &self.tracks
    }

    pub fn duration_ms(&self) -> u64 {
        self.tracks
            .iter()
            .map(|t| t.offset_ms + t.duration_ms.max(1))
            .max()
            .unwrap_or(0)
    }

    pub fn is_complete(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms()
    }

    /// Current value of every addressed property.
    ///
    /// Tracks that have not started hold their `from` value only when no
    /// earlier track drives the same property; later tracks override earlier
    /// ones once they begin.
    pub fn sample(&self, elapsed_ms: u64) -> Vec<PropertyValue> {
        let mut values: BTreeMap<(ElementId, Property), f32> = BTreeMap::new();
        for track in &self.tracks {
            let key = (track.target.clone(), track.property);
            if elapsed_ms >= track.offset_ms {
                values.insert(key, track.tween().sample(elapsed_ms));
            } else {
                values.entry(key).or_insert(track.from);
            }
        }
        values
            .into_iter()
            .map(|((target, property), value)| PropertyValue {
                target,
                property,
                value,
            })
            .collect()
    }
}
