//! Routing of raw scroll/wheel/touch input through intercept regions.

use tracing::debug;
use vitrine_types::ElementId;

use super::{InterceptOutcome, InterceptState};
use crate::effects::{Notice, StageEffect};
use crate::features::pinning::{self, PinPhase};
use crate::features::navigation;
use crate::state::StageState;

/// Page scroll. While an intercept region holds input the page is kept at
/// that region's top.
pub fn handle_scroll(state: &mut StageState, offset: f64, effects: &mut Vec<StageEffect>) {
    let mut offset = offset;
    if let Some(index) = state.capturing_region() {
        let top = state.regions[index].bounds.top;
        if (offset - top).abs() > state.config.input.top_tolerance_px {
            effects.push(StageEffect::ScrollTo {
                offset: top,
                smooth: false,
            });
            offset = top;
        }
    }
    pinning::update::scroll(state, offset, effects);
    sync_capture(state, effects);
    navigation::update::refresh(state, effects);
}

pub fn handle_wheel(state: &mut StageState, delta_y: f64, effects: &mut Vec<StageEffect>) {
    let Some(index) = input_target(state) else {
        return;
    };
    let page_offset = state.scroll_offset;
    let cfg = state.config.input.clone();
    let Some(intercept) = state.regions[index].intercept.as_mut() else {
        return;
    };
    let shown_before = intercept.show_content;
    let outcome = intercept.on_wheel(delta_y, page_offset, &cfg);
    apply_outcome(state, index, outcome, shown_before, effects);
}

pub fn handle_touch_start(state: &mut StageState, y: f64) {
    for intercept in state.regions.iter_mut().filter_map(|r| r.intercept.as_mut()) {
        intercept.on_touch_start(y);
    }
}

pub fn handle_touch_move(state: &mut StageState, y: f64, effects: &mut Vec<StageEffect>) {
    let Some(index) = input_target(state) else {
        return;
    };
    let page_offset = state.scroll_offset;
    let cfg = state.config.input.clone();
    let Some(intercept) = state.regions[index].intercept.as_mut() else {
        return;
    };
    let shown_before = intercept.show_content;
    let outcome = intercept.on_touch_move(y, page_offset, &cfg);
    apply_outcome(state, index, outcome, shown_before, effects);
}

pub fn handle_touch_end(state: &mut StageState) {
    for intercept in state.regions.iter_mut().filter_map(|r| r.intercept.as_mut()) {
        intercept.on_touch_end();
    }
}

fn input_target(state: &StageState) -> Option<usize> {
    state
        .capturing_region()
        .or_else(|| state.recapture_candidate())
}

fn apply_outcome(
    state: &mut StageState,
    index: usize,
    outcome: InterceptOutcome,
    shown_before: bool,
    effects: &mut Vec<StageEffect>,
) {
    if !outcome.consumes() {
        return;
    }
    effects.push(StageEffect::ConsumeInput);

    let region = &mut state.regions[index];
    let id = region.id().clone();
    let crossed = match outcome {
        InterceptOutcome::Released => {
            debug!(region = %id, "intercept released");
            effects.push(StageEffect::notify(Notice::InterceptReleased { region: id.clone() }));
            region.move_to_phase(PinPhase::After)
        }
        InterceptOutcome::Recaptured => {
            debug!(region = %id, "intercept recaptured");
            effects.push(StageEffect::notify(Notice::InterceptCaptured { region: id.clone() }));
            region.move_to_phase(PinPhase::Pinned)
        }
        InterceptOutcome::Consumed | InterceptOutcome::PassThrough => Vec::new(),
    };
    push_crossings(&id, crossed, effects);

    let index_changed = region.sync_intercept_progress();
    let shown = region.intercept.as_ref().is_some_and(|i| i.show_content);
    push_visibility(&id, shown, shown_before, effects);
    if index_changed {
        pinning::update::index_changed(state, index, effects);
    }
}

fn push_visibility(id: &ElementId, shown: bool, before: bool, effects: &mut Vec<StageEffect>) {
    if shown == before {
        return;
    }
    effects.push(StageEffect::notify(Notice::ContentVisibility {
        region: id.clone(),
        visible: shown,
    }));
}

fn push_crossings(
    id: &ElementId,
    crossed: Vec<pinning::PinCrossing>,
    effects: &mut Vec<StageEffect>,
) {
    for crossing in crossed {
        effects.push(StageEffect::notify(Notice::PinCrossed {
            region: id.clone(),
            crossing,
        }));
    }
}

/// Enters the capturing region's pin the first time it takes input.
pub fn sync_capture(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    let Some(index) = state.capturing_region() else {
        return;
    };
    let region = &mut state.regions[index];
    if region.phase != PinPhase::Before {
        return;
    }
    let id = region.id().clone();
    let crossed = region.move_to_phase(PinPhase::Pinned);
    debug!(region = %id, "intercept captured");
    effects.push(StageEffect::notify(Notice::InterceptCaptured { region: id.clone() }));
    push_crossings(&id, crossed, effects);
}

/// Completes every capturing intercept region so programmatic navigation
/// can move the page.
pub fn release_all(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    for index in 0..state.regions.len() {
        if !state.regions[index].is_capturing() {
            continue;
        }
        let region = &mut state.regions[index];
        let id = region.id().clone();
        let shown_before = region.intercept.as_ref().is_some_and(|i| i.show_content);
        region.intercept = Some(InterceptState::completed());
        let crossed = region.move_to_phase(PinPhase::After);
        let index_changed = region.sync_intercept_progress();
        effects.push(StageEffect::notify(Notice::InterceptReleased { region: id.clone() }));
        push_crossings(&id, crossed, effects);
        push_visibility(&id, true, shown_before, effects);
        if index_changed {
            pinning::update::index_changed(state, index, effects);
        }
    }
}
