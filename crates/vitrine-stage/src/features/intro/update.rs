//! Boot, intro playback and deep-link settling.

use tracing::{debug, info, warn};
use vitrine_types::ElementId;

use super::{DeepLink, IntroPhase};
use crate::common::{TimerId, TimerPurpose, TimerScope};
use crate::effects::{Notice, StageEffect};
use crate::features::pinning;
use crate::state::StageState;

pub fn boot(state: &mut StageState, anchor: Option<ElementId>, effects: &mut Vec<StageEffect>) {
    if state.intro.phase() != IntroPhase::Pending {
        warn!("boot received twice, ignoring");
        return;
    }

    match anchor {
        Some(anchor) => {
            state.intro.skip();
            let timer = state.timers.start(
                &mut state.timer_seq,
                TimerScope::Stage,
                TimerPurpose::DeepLinkSettle,
            );
            effects.push(StageEffect::StartTimer {
                id: timer,
                delay: state.config.navigation.settle_delay(),
                every: None,
            });
            info!(%anchor, "deep link, skipping intro");
            state.deep_link = Some(DeepLink {
                anchor,
                timer: Some(timer),
                resolved: false,
            });
            open_gate(state, true, effects);
        }
        None if state.config.intro.enabled => {
            state.intro.play();
            info!("intro playing");
        }
        None => {
            state.intro.skip();
            open_gate(state, true, effects);
        }
    }
}

pub fn frame(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    if state.intro.tick(state.now_ms) {
        info!("intro finished");
        open_gate(state, false, effects);
    }
}

/// Host-signalled end of the intro animation.
pub fn finish(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    if state.intro.finish() {
        open_gate(state, false, effects);
    }
}

fn open_gate(state: &mut StageState, skipped: bool, effects: &mut Vec<StageEffect>) {
    effects.push(StageEffect::notify(Notice::IntroFinished { skipped }));
    let queued = state.intro.take_queued();
    if !queued.is_empty() {
        debug!(count = queued.len(), "mounting queued regions");
    }
    for mount in queued {
        pinning::update::mount_now(state, mount.spec, mount.bounds, effects);
    }
}

pub fn regions_ready(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    resolve_deep_link(state, effects);
}

/// The settle timer fired before regions reported ready.
pub fn settle_elapsed(state: &mut StageState, timer: TimerId, effects: &mut Vec<StageEffect>) {
    state.timers.finish(timer);
    let Some(link) = state.deep_link.as_mut() else {
        return;
    };
    if link.timer != Some(timer) {
        return;
    }
    link.timer = None;
    debug!(anchor = %link.anchor, "settle delay elapsed");
    resolve_deep_link(state, effects);
}

fn resolve_deep_link(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    let Some(link) = state.deep_link.as_mut() else {
        return;
    };
    if link.resolved {
        return;
    }
    link.resolved = true;
    if let Some(timer) = link.timer.take() {
        state.timers.finish(timer);
        effects.push(StageEffect::CancelTimer { id: timer });
    }
    effects.push(StageEffect::ScrollToAnchor {
        anchor: link.anchor.clone(),
        offset_px: state.config.navigation.anchor_offset_px,
        smooth: false,
    });
}
