//! Stage runtime - owns the host, runs timers and async tasks, executes effects.
//!
//! This is the boundary where side effects happen. The reducer stays pure and
//! produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Spawned work reports back through an "inbox":
//! - timer, media and form tasks send `StageEvent`s to `inbox_tx`
//! - the runtime receives from `inbox_rx` and feeds the reducer
//!
//! Timers are mirrored by cancellation tokens keyed by `TimerId`. After every
//! dispatch the runtime drops tokens for timers the reducer no longer tracks,
//! so unmounting an owner always stops its timers.

mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use vitrine_core::config::Config;
use vitrine_core::form::FormSubmitter;
use vitrine_core::media::MediaLoader;
use vitrine_types::{ElementId, RawInput};

use crate::common::TimerId;
use crate::effects::StageEffect;
use crate::events::StageEvent;
use crate::features::pinning::RegionSpec;
use crate::host::{self, Host, InputDisposition};
use crate::state::{StageSnapshot, StageState};
use crate::update::update;

/// Frame clock (60fps = ~16ms per frame).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Stage-requested scrolls fed back as scroll input per dispatch.
const MAX_SCROLL_FEEDBACK: usize = 8;

pub type StageEventSender = mpsc::UnboundedSender<StageEvent>;
pub type StageEventReceiver = mpsc::UnboundedReceiver<StageEvent>;

pub struct StageRuntime<H> {
    /// Reducer state.
    pub state: StageState,
    host: H,
    media: Arc<dyn MediaLoader>,
    forms: Arc<dyn FormSubmitter>,
    /// Inbox sender - spawned tasks send events here.
    inbox_tx: StageEventSender,
    /// Inbox receiver - drained by `step`/`run`.
    inbox_rx: StageEventReceiver,
    timers: HashMap<TimerId, CancellationToken>,
    started: Instant,
}

impl<H: Host> StageRuntime<H> {
    pub fn new(
        config: Config,
        host: H,
        media: Arc<dyn MediaLoader>,
        forms: Arc<dyn FormSubmitter>,
    ) -> Self {
        let state = StageState::new(config, host.viewport());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state,
            host,
            media,
            forms,
            inbox_tx,
            inbox_rx,
            timers: HashMap::new(),
            started: Instant::now(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn snapshot(&self) -> StageSnapshot {
        self.state.snapshot()
    }

    /// Milliseconds since the runtime was created.
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Timers with a live task.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn boot(&mut self, hash: Option<&str>) {
        let anchor = hash.and_then(ElementId::from_hash);
        self.dispatch(StageEvent::Boot { anchor });
    }

    pub fn mount(&mut self, spec: RegionSpec) {
        let event = host::measure_mount(&self.host, spec);
        self.dispatch(event);
    }

    pub fn unmount(&mut self, id: &ElementId) {
        self.dispatch(StageEvent::Unmount { id: id.clone() });
    }

    /// Entry point for page input. Resizes are re-measured before dispatch.
    pub fn handle_input(&mut self, input: RawInput) -> InputDisposition {
        match input {
            RawInput::Resize { .. } => {
                let event = host::measure_relayout(&self.host, &self.state);
                self.dispatch(event)
            }
            input => self.dispatch(StageEvent::Input(input)),
        }
    }

    pub fn frame(&mut self) {
        let now_ms = self.now_ms();
        self.dispatch(StageEvent::Frame { now_ms });
    }

    pub fn dispatch(&mut self, event: StageEvent) -> InputDisposition {
        let effects = update(&mut self.state, event);
        let disposition = InputDisposition::of(&effects);
        self.execute(effects);

        let mut rounds = 0;
        while rounds < MAX_SCROLL_FEEDBACK {
            let offset = self.host.scroll_offset();
            if (offset - self.state.scroll_offset).abs() <= f64::EPSILON {
                break;
            }
            rounds += 1;
            let effects = update(
                &mut self.state,
                StageEvent::Input(RawInput::Scroll { offset }),
            );
            self.execute(effects);
        }

        self.reap_timers();
        disposition
    }

    /// Waits for the next inbox event and dispatches it.
    pub async fn step(&mut self) -> bool {
        match self.inbox_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Dispatches everything already in the inbox without waiting.
    pub fn drain_inbox(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.inbox_rx.try_recv() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    /// Runs frames and inbox events until `cancel` fires.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<()> {
        enum Wake {
            Frame,
            Event(StageEvent),
            Stop,
        }

        let mut frames = tokio::time::interval(FRAME_DURATION);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!("stage runtime started");

        loop {
            let wake = tokio::select! {
                () = cancel.cancelled() => Wake::Stop,
                _ = frames.tick() => Wake::Frame,
                event = self.inbox_rx.recv() => event.map_or(Wake::Stop, Wake::Event),
            };
            match wake {
                Wake::Frame => self.frame(),
                Wake::Event(event) => {
                    self.dispatch(event);
                }
                Wake::Stop => break,
            }
        }

        info!("stage runtime stopped");
        Ok(())
    }

    fn execute(&mut self, effects: Vec<StageEffect>) {
        for effect in effects {
            let Some(effect) = host::apply_effect(&mut self.host, effect) else {
                continue;
            };
            match effect {
                StageEffect::StartTimer { id, delay, every } => {
                    let token = handlers::spawn_timer(self.inbox_tx.clone(), id, delay, every);
                    if let Some(previous) = self.timers.insert(id, token) {
                        previous.cancel();
                    }
                }
                StageEffect::CancelTimer { id } => {
                    if let Some(token) = self.timers.remove(&id) {
                        token.cancel();
                    }
                }
                StageEffect::LoadMedia { task, source, kind } => {
                    handlers::spawn_media_load(
                        self.inbox_tx.clone(),
                        Arc::clone(&self.media),
                        task,
                        source,
                        kind,
                    );
                }
                StageEffect::SubmitForm { task, fields } => {
                    handlers::spawn_form_submit(
                        self.inbox_tx.clone(),
                        Arc::clone(&self.forms),
                        task,
                        fields,
                    );
                }
                other => debug!(?other, "unhandled effect"),
            }
        }
    }

    /// Cancels tasks for timers the reducer has already forgotten.
    fn reap_timers(&mut self) {
        self.timers.retain(|id, token| {
            let live = self.state.timers.contains(*id);
            if !live {
                token.cancel();
            }
            live
        });
    }
}

impl<H> Drop for StageRuntime<H> {
    fn drop(&mut self) {
        for token in self.timers.values() {
            token.cancel();
        }
    }
}
