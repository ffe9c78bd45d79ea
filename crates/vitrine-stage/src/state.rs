//! Stage state composition.
//!
//! ```text
//! StageState
//! ├── intro: IntroGate             (load gate, queued mounts)
//! ├── deep_link: Option<DeepLink>  (initial anchor)
//! ├── regions: Vec<RegionState>    (mount order = document order)
//! ├── listeners: ListenerRegistry  (input subscriptions per owner)
//! ├── timers: ActiveTimers         (live timers per owner)
//! ├── reveals / crossfades / texts (per-element transitions)
//! ├── media: MediaCache            (load status per source)
//! ├── navigation: NavigationState  (active section)
//! └── contact: ContactForm         (submission lifecycle)
//! ```

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use vitrine_core::config::Config;
use vitrine_types::{ElementId, MediaRef, Viewport};

use crate::common::{ActiveTimers, TaskSeq, TimerSeq};
use crate::features::contact::{ContactForm, FormPhase};
use crate::features::index::{Neighbors, Slot};
use crate::features::intro::{DeepLink, IntroGate, IntroPhase, intro_timeline};
use crate::features::navigation::NavigationState;
use crate::features::pinning::{PinPhase, RegionState};
use crate::features::progress::ListenerRegistry;
use crate::features::transition::{
    Crossfade, EntranceReveal, MediaCache, PropertyValue, RevealFrame, TextReveal, TransitionPhase,
};

pub struct StageState {
    pub config: Config,
    pub now_ms: u64,
    pub viewport: Viewport,
    pub scroll_offset: f64,
    /// Last lock state announced to the host.
    pub scroll_locked: bool,
    pub intro: IntroGate,
    pub deep_link: Option<DeepLink>,
    pub regions: Vec<RegionState>,
    pub listeners: ListenerRegistry,
    pub timers: ActiveTimers,
    pub timer_seq: TimerSeq,
    pub task_seq: TaskSeq,
    pub reveals: BTreeMap<ElementId, EntranceReveal>,
    pub crossfades: BTreeMap<ElementId, Crossfade>,
    pub texts: BTreeMap<ElementId, TextReveal>,
    pub media: MediaCache,
    pub navigation: NavigationState,
    pub contact: ContactForm,
    pub rng: StdRng,
    pub alphabet: Vec<char>,
}

impl StageState {
    pub fn new(config: Config, viewport: Viewport) -> Self {
        let rng = match config.transitions.scramble_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let alphabet = config.transitions.cipher_alphabet.chars().collect();
        let intro = IntroGate::new(intro_timeline(config.intro.duration_ms));
        Self {
            config,
            now_ms: 0,
            viewport,
            scroll_offset: 0.0,
            scroll_locked: false,
            intro,
            deep_link: None,
            regions: Vec::new(),
            listeners: ListenerRegistry::default(),
            timers: ActiveTimers::default(),
            timer_seq: TimerSeq::default(),
            task_seq: TaskSeq::default(),
            reveals: BTreeMap::new(),
            crossfades: BTreeMap::new(),
            texts: BTreeMap::new(),
            media: MediaCache::default(),
            navigation: NavigationState::default(),
            contact: ContactForm::default(),
            rng,
            alphabet,
        }
    }

    pub fn region(&self, id: &ElementId) -> Option<&RegionState> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub fn region_index(&self, id: &ElementId) -> Option<usize> {
        self.regions.iter().position(|r| r.id() == id)
    }

    /// The intercept region currently owning wheel/touch input: the first
    /// unreleased one (document order) whose top is at or above the page
    /// offset.
    pub fn capturing_region(&self) -> Option<usize> {
        let tolerance = self.config.input.top_tolerance_px;
        self.regions.iter().position(|r| {
            r.is_capturing() && r.bounds.top <= self.scroll_offset + tolerance
        })
    }

    /// Released intercept region eligible to take input back with a reverse
    /// gesture at the page top.
    pub fn recapture_candidate(&self) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.intercept.as_ref().is_some_and(|i| i.released))
    }

    pub fn wants_scroll_lock(&self) -> bool {
        self.intro.is_playing() || self.capturing_region().is_some()
    }

    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            now_ms: self.now_ms,
            scroll_offset: self.scroll_offset,
            scroll_locked: self.scroll_locked,
            intro: self.intro.phase(),
            intro_values: self.intro.sample(self.now_ms),
            active_section: self.navigation.active().cloned(),
            capturing: self
                .capturing_region()
                .map(|i| self.regions[i].id().clone()),
            regions: self
                .regions
                .iter()
                .map(|r| RegionSnapshot::of(r, self.viewport.width))
                .collect(),
            reveals: self
                .reveals
                .iter()
                .map(|(element, reveal)| RevealSnapshot {
                    element: element.clone(),
                    phase: reveal.transition.phase,
                    frame: reveal.frame(self.now_ms),
                })
                .collect(),
            crossfades: self
                .crossfades
                .iter()
                .map(|(element, fade)| CrossfadeSnapshot {
                    element: element.clone(),
                    current: fade.current().cloned(),
                    next: fade.next().cloned(),
                    pending: fade.pending().cloned(),
                    blend: fade.blend(),
                })
                .collect(),
            texts: self
                .texts
                .iter()
                .map(|(element, text)| TextSnapshot {
                    element: element.clone(),
                    display: text.display().to_string(),
                    phase: text.transition.phase,
                })
                .collect(),
            form: self.contact.phase().clone(),
            listeners: self.listeners.count(),
            timers: self.timers.len(),
        }
    }
}

/// Serializable view of everything presentation needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSnapshot {
    pub now_ms: u64,
    pub scroll_offset: f64,
    pub scroll_locked: bool,
    pub intro: IntroPhase,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intro_values: Vec<PropertyValue>,
    pub active_section: Option<ElementId>,
    pub capturing: Option<ElementId>,
    pub regions: Vec<RegionSnapshot>,
    pub reveals: Vec<RevealSnapshot>,
    pub crossfades: Vec<CrossfadeSnapshot>,
    pub texts: Vec<TextSnapshot>,
    pub form: FormPhase,
    pub listeners: usize,
    pub timers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSnapshot {
    pub id: ElementId,
    pub phase: PinPhase,
    pub progress: f32,
    pub active_index: Option<usize>,
    pub neighbors: Neighbors,
    pub slots: Vec<Slot>,
    pub step_fills: Vec<f32>,
    pub gap_px: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_offset_px: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_content: Option<bool>,
}

impl RegionSnapshot {
    fn of(region: &RegionState, viewport_width: f64) -> Self {
        Self {
            id: region.id().clone(),
            phase: region.phase,
            progress: region.progress,
            active_index: region.items.active_index(),
            neighbors: region.items.neighbors(),
            slots: (0..region.items.len()).map(|i| region.items.slot(i)).collect(),
            step_fills: region.items.step_fills(),
            gap_px: region.gap_px,
            rotation_deg: region.rotation_deg(),
            track_offset_px: region.track_offset_px(viewport_width),
            show_content: region.intercept.as_ref().map(|i| i.show_content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealSnapshot {
    pub element: ElementId,
    pub phase: TransitionPhase,
    pub frame: RevealFrame,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossfadeSnapshot {
    pub element: ElementId,
    pub current: Option<MediaRef>,
    pub next: Option<MediaRef>,
    pub pending: Option<MediaRef>,
    pub blend: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextSnapshot {
    pub element: ElementId,
    pub display: String,
    pub phase: TransitionPhase,
}
