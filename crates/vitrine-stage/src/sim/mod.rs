//! Deterministic driver: a virtual clock and an in-memory page.
//!
//! Frames tick every `FRAME_MS`; timers, media loads and form submissions
//! complete on the same virtual clock, so a run is reproducible from its
//! inputs (and the scramble seed).

mod page;
mod script;

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;
use vitrine_core::config::Config;
use vitrine_core::media::StaticLoader;
use vitrine_types::{ElementId, MediaRef, RawInput};

pub use page::PageModel;
pub use script::{Script, ScriptElement, Step};

use crate::common::TimerId;
use crate::effects::{Notice, StageEffect};
use crate::events::{StageCommand, StageEvent};
use crate::features::navigation::Section;
use crate::features::pinning::RegionSpec;
use crate::host::{self, InputDisposition, Measure};
use crate::state::{StageSnapshot, StageState};
use crate::update::update;

pub const FRAME_MS: u64 = 16;

/// Follow-up scrolls allowed per dispatch before giving up on settling.
const MAX_SCROLL_FEEDBACK: usize = 8;

#[derive(Debug, Clone, Copy)]
struct VirtualTimer {
    due_ms: u64,
    every_ms: Option<u64>,
}

#[derive(Debug)]
struct Deferred {
    due_ms: u64,
    event: StageEvent,
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

pub struct Simulation {
    state: StageState,
    page: PageModel,
    now_ms: u64,
    next_frame_ms: u64,
    timers: BTreeMap<TimerId, VirtualTimer>,
    inflight: Vec<Deferred>,
    media: StaticLoader,
    form_delay_ms: u64,
    form_outcome: Result<(), String>,
    touch_y: Option<f64>,
}

impl Simulation {
    pub fn new(config: Config, page: PageModel) -> Self {
        let form_delay_ms = config.form.simulated_delay_ms;
        Self {
            state: StageState::new(config, page.viewport()),
            page,
            now_ms: 0,
            next_frame_ms: FRAME_MS,
            timers: BTreeMap::new(),
            inflight: Vec::new(),
            media: StaticLoader::default(),
            form_delay_ms,
            form_outcome: Ok(()),
            touch_y: None,
        }
    }

    #[must_use]
    pub fn with_media(mut self, media: StaticLoader) -> Self {
        self.media = media;
        self
    }

    #[must_use]
    pub fn with_form_outcome(mut self, outcome: Result<(), String>) -> Self {
        self.form_outcome = outcome;
        self
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    pub fn page(&self) -> &PageModel {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut PageModel {
        &mut self.page
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.state.snapshot()
    }

    /// Timers the driver is still scheduling.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.page.take_notices()
    }

    pub fn boot(&mut self, hash: Option<&str>) {
        let anchor = hash.and_then(ElementId::from_hash);
        self.dispatch(StageEvent::Boot { anchor });
    }

    pub fn mount(&mut self, spec: RegionSpec) {
        let event = host::measure_mount(&self.page, spec);
        self.dispatch(event);
    }

    pub fn unmount(&mut self, id: &str) {
        self.dispatch(StageEvent::Unmount {
            id: ElementId::new(id),
        });
    }

    /// Registers navigation sections from the page's measured elements.
    pub fn sections(&mut self, ids: &[ElementId]) {
        let sections = ids
            .iter()
            .filter_map(|id| {
                self.page.element_bounds(id).map(|bounds| Section {
                    id: id.clone(),
                    bounds,
                })
            })
            .collect();
        self.dispatch(StageEvent::Sections(sections));
    }

    pub fn command(&mut self, command: StageCommand) {
        self.dispatch(command.into());
    }

    /// Feeds one raw input the way a browser would: a locked page never
    /// scrolls, and wheel/touch input nobody consumed scrolls the page.
    pub fn input(&mut self, input: RawInput) -> InputDisposition {
        match input {
            RawInput::Scroll { offset } => {
                if self.page.is_locked() {
                    return InputDisposition::Consumed;
                }
                self.page.set_offset(offset);
                let offset = self.page.scroll_offset();
                self.dispatch(StageEvent::Input(RawInput::Scroll { offset }))
            }
            RawInput::Wheel { delta_y } => {
                let disposition = self.dispatch(StageEvent::Input(input));
                if disposition == InputDisposition::PassThrough {
                    self.native_scroll(delta_y);
                }
                disposition
            }
            RawInput::TouchStart { y } => {
                self.touch_y = Some(y);
                self.dispatch(StageEvent::Input(input))
            }
            RawInput::TouchMove { y } => {
                let previous = self.touch_y.replace(y);
                let disposition = self.dispatch(StageEvent::Input(input));
                if disposition == InputDisposition::PassThrough
                    && let Some(previous) = previous
                {
                    self.native_scroll(previous - y);
                }
                disposition
            }
            RawInput::TouchEnd => {
                self.touch_y = None;
                self.dispatch(StageEvent::Input(input))
            }
            RawInput::Resize { viewport } => {
                self.page.set_viewport(viewport);
                let event = host::measure_relayout(&self.page, &self.state);
                self.dispatch(event)
            }
        }
    }

    fn native_scroll(&mut self, delta: f64) {
        if self.page.is_locked() || delta == 0.0 {
            return;
        }
        let target = self.page.scroll_offset() + delta;
        self.input(RawInput::Scroll { offset: target });
    }

    /// Runs the reducer on `event` and executes its effects, feeding any
    /// resulting page scroll back in.
    pub fn dispatch(&mut self, event: StageEvent) -> InputDisposition {
        let effects = update(&mut self.state, event);
        let disposition = InputDisposition::of(&effects);
        self.execute(effects);

        let mut rounds = 0;
        while self.page.take_scrolled() && rounds < MAX_SCROLL_FEEDBACK {
            rounds += 1;
            let offset = self.page.scroll_offset();
            let effects = update(
                &mut self.state,
                StageEvent::Input(RawInput::Scroll { offset }),
            );
            self.execute(effects);
        }
        disposition
    }

    fn execute(&mut self, effects: Vec<StageEffect>) {
        for effect in effects {
            if let Some(effect) = host::apply_effect(&mut self.page, effect) {
                self.drive(effect);
            }
        }
    }

    fn drive(&mut self, effect: StageEffect) {
        match effect {
            StageEffect::StartTimer { id, delay, every } => {
                self.timers.insert(
                    id,
                    VirtualTimer {
                        due_ms: self.now_ms + millis(delay),
                        every_ms: every.map(millis),
                    },
                );
            }
            StageEffect::CancelTimer { id } => {
                self.timers.remove(&id);
            }
            StageEffect::LoadMedia { task, source, kind } => {
                let event = match self.media.resolve(&source, kind) {
                    Ok(_) => StageEvent::MediaLoaded { task, source },
                    Err(e) => StageEvent::MediaFailed {
                        task,
                        source,
                        error: e.to_string(),
                    },
                };
                self.inflight.push(Deferred {
                    due_ms: self.now_ms + millis(self.media.latency()),
                    event,
                });
            }
            StageEffect::SubmitForm { task, .. } => {
                self.inflight.push(Deferred {
                    due_ms: self.now_ms + self.form_delay_ms,
                    event: StageEvent::FormResult {
                        task,
                        result: self.form_outcome.clone(),
                    },
                });
            }
            other => trace!(?other, "page effect reached driver"),
        }
    }

    /// Advances the virtual clock by `ms`, firing timers, async completions
    /// and frames in time order. Ties go timers, then completions, then
    /// frames.
    pub fn advance(&mut self, ms: u64) {
        let end = self.now_ms + ms;
        loop {
            let timer = self
                .timers
                .iter()
                .map(|(id, t)| (t.due_ms, *id))
                .min();
            let deferred = self
                .inflight
                .iter()
                .enumerate()
                .map(|(i, d)| (d.due_ms, i))
                .min();
            let due = [timer.map(|t| t.0), deferred.map(|d| d.0)]
                .into_iter()
                .flatten()
                .fold(self.next_frame_ms, u64::min);
            if due > end {
                break;
            }
            self.now_ms = due;

            if let Some((at, id)) = timer
                && at == due
            {
                self.fire_timer(id);
                continue;
            }
            if let Some((at, index)) = deferred
                && at == due
            {
                let deferred = self.inflight.remove(index);
                self.dispatch(deferred.event);
                continue;
            }
            self.next_frame_ms += FRAME_MS;
            self.dispatch(StageEvent::Frame { now_ms: due });
        }
        self.now_ms = end;
    }

    fn fire_timer(&mut self, id: TimerId) {
        let Some(timer) = self.timers.get(&id).copied() else {
            return;
        };
        match timer.every_ms {
            Some(every) => {
                let next = VirtualTimer {
                    due_ms: timer.due_ms + every.max(1),
                    ..timer
                };
                self.timers.insert(id, next);
            }
            None => {
                self.timers.remove(&id);
            }
        }
        self.dispatch(StageEvent::TimerFired { id });
    }

    /// Builds a simulation from a script: page, media, boot, sections and
    /// region mounts, then `RegionsReady`.
    pub fn from_script(config: Config, script: &Script) -> Self {
        let mut media = StaticLoader::new(Duration::from_millis(script.media_latency_ms));
        for source in &script.failing_media {
            media = media.failing(source.clone());
        }
        let mut sim = Self::new(config, script.page()).with_media(media);
        sim.boot(script.hash.as_deref());
        sim.sections(&script.sections);
        for region in &script.regions {
            sim.mount(region.clone());
        }
        sim.dispatch(StageEvent::RegionsReady);
        sim
    }

    pub fn run_step(&mut self, step: &Step) {
        match step {
            Step::Advance { advance_ms } => self.advance(*advance_ms),
            Step::Input { input } => {
                self.input(*input);
            }
            Step::Mount { mount } => self.mount(mount.clone()),
            Step::Command(command) => self.command(command.clone()),
        }
    }

    pub fn media_is_ready(&self, source: &MediaRef) -> bool {
        self.state.media.is_ready(source)
    }
}
