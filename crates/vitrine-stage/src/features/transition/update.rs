//! Reveal, crossfade and text-reveal event handling.

use tracing::{debug, warn};
use vitrine_core::media::MediaKind;
use vitrine_types::{ElementId, ListenerKind, MediaRef};

use super::{Crossfade, CrossfadeTrigger, EntranceReveal, TextReveal, TextRevealMode};
use crate::common::{TaskId, TimerId, TimerPurpose, TimerScope};
use crate::effects::{Notice, StageEffect};
use crate::state::StageState;

/// Starts watching `element` for its entrance. Repeated requests are no-ops.
pub fn observe_reveal(state: &mut StageState, element: ElementId, effects: &mut Vec<StageEffect>) {
    if state.reveals.contains_key(&element) {
        return;
    }
    let cfg = &state.config.transitions;
    state
        .reveals
        .insert(element.clone(), EntranceReveal::new(cfg));
    if state.listeners.subscribe(&element, ListenerKind::Visibility) {
        effects.push(StageEffect::Observe {
            element,
            threshold: cfg.reveal_threshold,
            root_margin_px: cfg.reveal_root_margin_px,
        });
    }
}

pub fn visibility(
    state: &mut StageState,
    element: &ElementId,
    ratio: f32,
    effects: &mut Vec<StageEffect>,
) {
    let now = state.now_ms;
    let Some(reveal) = state.reveals.get_mut(element) else {
        return;
    };
    if !reveal.observe(ratio, now) {
        return;
    }
    debug!(%element, ratio, "reveal started");
    effects.push(StageEffect::notify(Notice::RevealStarted {
        element: element.clone(),
    }));
    // Fire-once: nothing left to watch.
    if state.listeners.unsubscribe(element, ListenerKind::Visibility) {
        effects.push(StageEffect::Unobserve {
            element: element.clone(),
        });
    }
}

pub fn set_media(state: &mut StageState, element: ElementId, initial: Option<MediaRef>) {
    let duration = state.config.transitions.crossfade_ms;
    if let Some(source) = &initial {
        state.media.mark_ready(source.clone());
    }
    state
        .crossfades
        .entry(element)
        .or_insert_with(|| Crossfade::new(initial, duration));
}

pub fn trigger_crossfade(
    state: &mut StageState,
    element: ElementId,
    target: MediaRef,
    effects: &mut Vec<StageEffect>,
) {
    let duration = state.config.transitions.crossfade_ms;
    let now = state.now_ms;
    let ready = state.media.is_ready(&target);
    let outcome = state
        .crossfades
        .entry(element.clone())
        .or_insert_with(|| Crossfade::new(None, duration))
        .trigger(target.clone(), ready, now);

    match outcome {
        CrossfadeTrigger::Started => {
            effects.push(StageEffect::notify(Notice::CrossfadeStarted { element, target }));
        }
        CrossfadeTrigger::Deferred => {
            if state.media.needs_load(&target) {
                let task = state.task_seq.next_id();
                state.media.mark_loading(target.clone(), task);
                debug!(%element, source = target.as_str(), "crossfade waiting on media");
                effects.push(StageEffect::LoadMedia {
                    task,
                    source: target,
                    kind: MediaKind::Texture,
                });
            }
        }
        CrossfadeTrigger::Busy | CrossfadeTrigger::AlreadyShowing => {
            debug!(%element, ?outcome, "crossfade trigger ignored");
        }
    }
}

pub fn media_loaded(
    state: &mut StageState,
    task: TaskId,
    source: MediaRef,
    effects: &mut Vec<StageEffect>,
) {
    debug!(?task, source = source.as_str(), "media ready");
    state.media.mark_ready(source.clone());
    let now = state.now_ms;
    for (element, fade) in &mut state.crossfades {
        if fade.on_media_ready(&source, now) {
            effects.push(StageEffect::notify(Notice::CrossfadeStarted {
                element: element.clone(),
                target: source.clone(),
            }));
        }
    }
}

pub fn media_failed(
    state: &mut StageState,
    task: TaskId,
    source: MediaRef,
    error: &str,
    effects: &mut Vec<StageEffect>,
) {
    warn!(?task, source = source.as_str(), error, "media failed to load, skipping crossfade");
    state.media.mark_failed(source.clone());
    for (element, fade) in &mut state.crossfades {
        if fade.on_media_failed(&source) {
            effects.push(StageEffect::notify(Notice::CrossfadeSkipped {
                element: element.clone(),
                source: source.clone(),
            }));
        }
    }
}

/// Starts (or restarts) a text reveal. Re-requesting the text already shown
/// or in progress is a no-op.
pub fn reveal_text(
    state: &mut StageState,
    element: ElementId,
    text: &str,
    mode: TextRevealMode,
    effects: &mut Vec<StageEffect>,
) {
    if let Some(existing) = state.texts.get(&element)
        && existing.text() == text
        && existing.mode() == mode
    {
        return;
    }
    if let Some(mut previous) = state.texts.remove(&element)
        && let Some(timer) = previous.take_timer()
    {
        state.timers.finish(timer);
        effects.push(StageEffect::CancelTimer { id: timer });
    }

    let timer = if text.is_empty() {
        None
    } else {
        Some(state.timers.start(
            &mut state.timer_seq,
            TimerScope::Element(element.clone()),
            TimerPurpose::TextReveal,
        ))
    };

    let mut reveal = TextReveal::new(text, mode);
    reveal.start(timer, state.now_ms, &mut state.rng, &state.alphabet);

    if let Some(id) = timer {
        let cfg = &state.config.transitions;
        effects.push(StageEffect::StartTimer {
            id,
            delay: cfg.text_start_delay() + cfg.text_interval(),
            every: Some(cfg.text_interval()),
        });
    }
    if reveal.take_completion() {
        effects.push(StageEffect::notify(Notice::TextRevealCompleted {
            element: element.clone(),
        }));
    }
    state.texts.insert(element, reveal);
}

/// One interval tick for the reveal on `element`.
pub fn text_tick(
    state: &mut StageState,
    element: &ElementId,
    timer: TimerId,
    effects: &mut Vec<StageEffect>,
) {
    let Some(reveal) = state
        .texts
        .get_mut(element)
        .filter(|r| r.timer() == Some(timer))
    else {
        state.timers.finish(timer);
        effects.push(StageEffect::CancelTimer { id: timer });
        return;
    };

    if reveal.tick(&mut state.rng, &state.alphabet) {
        reveal.take_timer();
        state.timers.finish(timer);
        debug!(%element, "text reveal complete");
        effects.push(StageEffect::CancelTimer { id: timer });
        effects.push(StageEffect::notify(Notice::TextRevealCompleted {
            element: element.clone(),
        }));
    }
}

/// Frame-driven progress for reveals and crossfades.
pub fn tick(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    let now = state.now_ms;
    for (element, reveal) in &mut state.reveals {
        if reveal.tick(now) {
            effects.push(StageEffect::notify(Notice::RevealCompleted {
                element: element.clone(),
            }));
        }
    }
    let mut settled = Vec::new();
    for (element, fade) in &mut state.crossfades {
        if let Some(current) = fade.tick(now) {
            debug!(%element, current = current.as_str(), "crossfade complete");
            effects.push(StageEffect::notify(Notice::CrossfadeCompleted {
                element: element.clone(),
                current: current.clone(),
            }));
            settled.push((element.clone(), current));
        }
    }
    for (element, current) in settled {
        follow_active_item(state, element, &current, effects);
    }
}

/// A region that moved on while its bound blend was running gets one
/// follow-up blend to the item it now shows.
fn follow_active_item(
    state: &mut StageState,
    element: ElementId,
    current: &MediaRef,
    effects: &mut Vec<StageEffect>,
) {
    let target = state
        .regions
        .iter()
        .find(|r| r.spec.crossfade_target.as_ref() == Some(&element))
        .and_then(|r| r.items.active_item())
        .map(|item| item.media.clone());
    if let Some(target) = target
        && &target != current
    {
        debug!(%element, target = target.as_str(), "active item moved during crossfade");
        trigger_crossfade(state, element, target, effects);
    }
}
