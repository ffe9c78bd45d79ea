//! Region mount/unmount, page-scroll evaluation and relayout.

use tracing::debug;
use vitrine_types::{ElementBounds, ElementId, ListenerKind, Viewport};

use super::{PinPhase, RegionSpec, RegionState, ScrollOutcome};
use crate::effects::{Notice, StageEffect};
use crate::features::intro::QueuedMount;
use crate::features::progress::{self, InterceptState, listeners_for};
use crate::features::transition::{self, Crossfade};
use crate::state::StageState;

/// Mounts a region, or queues it while the intro gate is closed.
pub fn mount(
    state: &mut StageState,
    spec: RegionSpec,
    bounds: ElementBounds,
    effects: &mut Vec<StageEffect>,
) {
    if state.intro.is_gating() {
        debug!(region = %spec.id, "intro running, queueing mount");
        state.intro.queue(QueuedMount { spec, bounds });
        return;
    }
    mount_now(state, spec, bounds, effects);
}

pub fn mount_now(
    state: &mut StageState,
    spec: RegionSpec,
    bounds: ElementBounds,
    effects: &mut Vec<StageEffect>,
) {
    if state.region_index(&spec.id).is_some() {
        let id = spec.id.clone();
        unmount(state, &id, effects);
    }

    let id = spec.id.clone();
    let mut region = RegionState::new(spec, bounds, state.viewport, &state.config);

    for kind in listeners_for(region.spec.capture) {
        if state.listeners.subscribe(&id, *kind) {
            effects.push(StageEffect::Listen {
                owner: id.clone(),
                kind: *kind,
            });
        }
    }

    if let Some(target) = region.spec.crossfade_target.clone() {
        let initial = region.items.active_item().map(|item| item.media.clone());
        let duration = state.config.transitions.crossfade_ms;
        state
            .crossfades
            .entry(target)
            .or_insert_with(|| Crossfade::new(initial, duration));
    }

    // A deep-linked load lands past any intercept region.
    if region.is_intercept() && state.deep_link.is_some() {
        region.intercept = Some(InterceptState::completed());
        region.phase = PinPhase::After;
        region.sync_intercept_progress();
    }

    let is_intercept = region.is_intercept();
    let offset = state.scroll_offset;
    state.regions.push(region);
    let index = state.regions.len() - 1;
    debug!(region = %id, index, "mounted region");

    if is_intercept {
        progress::update::sync_capture(state, effects);
    } else {
        scroll_region(state, index, offset, effects);
    }
}

/// Releases everything `id` owns. Unknown ids are a no-op.
pub fn unmount(state: &mut StageState, id: &ElementId, effects: &mut Vec<StageEffect>) {
    if state.intro.dequeue(id) {
        debug!(region = %id, "dropped queued mount");
    }

    if let Some(index) = state.region_index(id) {
        let region = state.regions.remove(index);
        if let Some(target) = region.spec.crossfade_target {
            state.crossfades.remove(&target);
        }
        debug!(region = %id, "unmounted region");
    }

    for kind in state.listeners.release_owner(id) {
        effects.push(match kind {
            ListenerKind::Visibility => StageEffect::Unobserve { element: id.clone() },
            kind => StageEffect::Unlisten {
                owner: id.clone(),
                kind,
            },
        });
    }
    for timer in state.timers.release_element(id) {
        effects.push(StageEffect::CancelTimer { id: timer });
    }
    state.reveals.remove(id);
    state.crossfades.remove(id);
    state.texts.remove(id);
}

/// Evaluates every page-scroll region at `offset`.
pub fn scroll(state: &mut StageState, offset: f64, effects: &mut Vec<StageEffect>) {
    state.scroll_offset = offset;
    for index in 0..state.regions.len() {
        scroll_region(state, index, offset, effects);
    }
}

fn scroll_region(
    state: &mut StageState,
    index: usize,
    offset: f64,
    effects: &mut Vec<StageEffect>,
) {
    let outcome = state.regions[index].scroll_to(offset);
    announce(state, index, outcome, effects);
}

fn announce(
    state: &mut StageState,
    index: usize,
    outcome: ScrollOutcome,
    effects: &mut Vec<StageEffect>,
) {
    let id = state.regions[index].id().clone();
    for crossing in outcome.crossings {
        debug!(region = %id, ?crossing, "boundary crossed");
        effects.push(StageEffect::notify(Notice::PinCrossed {
            region: id.clone(),
            crossing,
        }));
    }
    if outcome.index_changed {
        index_changed(state, index, effects);
    }
}

/// Announces a new active index and crossfades the bound element.
pub fn index_changed(state: &mut StageState, index: usize, effects: &mut Vec<StageEffect>) {
    let region = &state.regions[index];
    let id = region.id().clone();
    let active = region.items.active_index();
    let crossfade = region
        .spec
        .crossfade_target
        .clone()
        .zip(region.items.active_item().map(|item| item.media.clone()));

    effects.push(StageEffect::notify(Notice::ActiveIndexChanged {
        region: id,
        index: active,
    }));
    if let Some((target, media)) = crossfade {
        transition::update::trigger_crossfade(state, target, media, effects);
    }
}

/// Re-measures all regions for a new viewport.
///
/// The region pinned at the time keeps its progress and stays silent; the
/// page offset is corrected to match. Every other region is evaluated at
/// that offset and reports whatever crossings and index changes it implies.
pub fn relayout(
    state: &mut StageState,
    viewport: Viewport,
    bounds: &[(ElementId, ElementBounds)],
    effects: &mut Vec<StageEffect>,
) {
    state.viewport = viewport;
    let measured = |region: &RegionState| {
        bounds
            .iter()
            .find(|(id, _)| id == region.id())
            .map_or(region.bounds, |(_, b)| *b)
    };

    let mut offset = state.scroll_offset;
    let pinned = state
        .regions
        .iter()
        .position(|r| r.is_pinned() && !r.is_intercept());

    if let Some(index) = pinned {
        let new_bounds = measured(&state.regions[index]);
        let outcome = state.regions[index].relayout(new_bounds, viewport, offset, &state.config);
        if let Some(corrected) = outcome.correction {
            debug!(region = %state.regions[index].id(), corrected, "resize while pinned");
            offset = corrected;
            effects.push(StageEffect::ScrollTo {
                offset,
                smooth: false,
            });
        }
        announce(state, index, outcome.scrolled, effects);
    }

    state.scroll_offset = offset;
    for index in 0..state.regions.len() {
        if Some(index) == pinned {
            continue;
        }
        let new_bounds = measured(&state.regions[index]);
        let outcome = state.regions[index].relayout(new_bounds, viewport, offset, &state.config);
        announce(state, index, outcome.scrolled, effects);
    }
}
