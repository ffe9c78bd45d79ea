//! Stage reducer (update function).
//!
//! All state mutations happen here. Drivers call `update(state, event)` and
//! execute the returned effects; nothing in this module touches a clock, a
//! page or a network.

use tracing::{debug, info};
use vitrine_types::RawInput;

use crate::common::{TimerId, TimerPurpose};
use crate::effects::StageEffect;
use crate::events::StageEvent;
use crate::features::{contact, intro, navigation, pinning, progress, transition};
use crate::state::StageState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the driver to execute.
pub fn update(state: &mut StageState, event: StageEvent) -> Vec<StageEffect> {
    let mut effects = Vec::new();
    match event {
        StageEvent::Boot { anchor } => intro::update::boot(state, anchor, &mut effects),
        StageEvent::Frame { now_ms } => handle_frame(state, now_ms, &mut effects),
        StageEvent::Input(input) => handle_input(state, input, &mut effects),
        StageEvent::Mount { spec, bounds } => {
            pinning::update::mount(state, spec, bounds, &mut effects);
        }
        StageEvent::Unmount { id } => pinning::update::unmount(state, &id, &mut effects),
        StageEvent::Relayout {
            viewport,
            bounds,
            sections,
        } => {
            pinning::update::relayout(state, viewport, &bounds, &mut effects);
            match sections {
                Some(sections) => navigation::update::set_sections(state, sections, &mut effects),
                None => navigation::update::refresh(state, &mut effects),
            }
        }
        StageEvent::Sections(sections) => {
            navigation::update::set_sections(state, sections, &mut effects);
        }
        StageEvent::RegionsReady => intro::update::regions_ready(state, &mut effects),
        StageEvent::IntroFinished => intro::update::finish(state, &mut effects),
        StageEvent::NavigateTo { anchor } => {
            navigation::update::navigate_to(state, anchor, &mut effects);
        }
        StageEvent::ObserveReveal { element } => {
            transition::update::observe_reveal(state, element, &mut effects);
        }
        StageEvent::Visibility { element, ratio } => {
            transition::update::visibility(state, &element, ratio, &mut effects);
        }
        StageEvent::SetMedia { element, initial } => {
            transition::update::set_media(state, element, initial);
        }
        StageEvent::Crossfade { element, target } => {
            transition::update::trigger_crossfade(state, element, target, &mut effects);
        }
        StageEvent::RevealText {
            element,
            text,
            mode,
        } => transition::update::reveal_text(state, element, &text, mode, &mut effects),
        StageEvent::TimerFired { id } => handle_timer(state, id, &mut effects),
        StageEvent::MediaLoaded { task, source } => {
            transition::update::media_loaded(state, task, source, &mut effects);
        }
        StageEvent::MediaFailed {
            task,
            source,
            error,
        } => transition::update::media_failed(state, task, source, &error, &mut effects),
        StageEvent::SubmitForm { fields } => contact::update::submit(state, fields, &mut effects),
        StageEvent::FormResult { task, result } => {
            contact::update::settle(state, task, result, &mut effects);
        }
    }
    reconcile_scroll_lock(state, &mut effects);
    effects
}

// ============================================================================
// Frame Handler
// ============================================================================

fn handle_frame(state: &mut StageState, now_ms: u64, effects: &mut Vec<StageEffect>) {
    state.now_ms = state.now_ms.max(now_ms);
    intro::update::frame(state, effects);
    transition::update::tick(state, effects);
}

// ============================================================================
// Input Handlers
// ============================================================================

fn handle_input(state: &mut StageState, input: RawInput, effects: &mut Vec<StageEffect>) {
    match input {
        RawInput::Resize { viewport } => {
            pinning::update::relayout(state, viewport, &[], effects);
            navigation::update::refresh(state, effects);
        }
        RawInput::Scroll { offset } => progress::update::handle_scroll(state, offset, effects),
        // The page is locked while the intro plays.
        _ if state.intro.is_gating() => effects.push(StageEffect::ConsumeInput),
        RawInput::Wheel { delta_y } => progress::update::handle_wheel(state, delta_y, effects),
        RawInput::TouchStart { y } => progress::update::handle_touch_start(state, y),
        RawInput::TouchMove { y } => progress::update::handle_touch_move(state, y, effects),
        RawInput::TouchEnd => progress::update::handle_touch_end(state),
    }
}

fn handle_timer(state: &mut StageState, id: TimerId, effects: &mut Vec<StageEffect>) {
    let Some(owner) = state.timers.owner(id).cloned() else {
        debug!(?id, "stale timer");
        return;
    };
    match owner.purpose {
        TimerPurpose::TextReveal => match owner.element() {
            Some(element) => transition::update::text_tick(state, element, id, effects),
            None => {
                state.timers.finish(id);
                effects.push(StageEffect::CancelTimer { id });
            }
        },
        TimerPurpose::DeepLinkSettle => intro::update::settle_elapsed(state, id, effects),
    }
}

/// Announces lock changes once per event, whatever caused them.
fn reconcile_scroll_lock(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    let wanted = state.wants_scroll_lock();
    if wanted == state.scroll_locked {
        return;
    }
    state.scroll_locked = wanted;
    info!(locked = wanted, "scroll lock changed");
    effects.push(if wanted {
        StageEffect::LockScroll
    } else {
        StageEffect::UnlockScroll
    });
}
