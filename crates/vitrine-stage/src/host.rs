//! The seam between the stage and a page.
//!
//! `Measure` answers layout questions; `Host` applies the effects that touch
//! the page. Timers, media loads and form submissions are left to the driver
//! (the tokio runtime or the deterministic simulation).

use tracing::warn;
use vitrine_types::{ElementBounds, ElementId, ListenerKind, Viewport};

use crate::effects::{Notice, StageEffect};
use crate::events::StageEvent;
use crate::features::navigation::Section;
use crate::features::pinning::RegionSpec;
use crate::state::StageState;

pub trait Measure {
    fn viewport(&self) -> Viewport;
    fn scroll_offset(&self) -> f64;
    fn element_bounds(&self, id: &ElementId) -> Option<ElementBounds>;
}

pub trait Host: Measure {
    fn set_scroll_locked(&mut self, locked: bool);
    fn scroll_to(&mut self, offset: f64, smooth: bool);
    fn listen(&mut self, owner: &ElementId, kind: ListenerKind);
    fn unlisten(&mut self, owner: &ElementId, kind: ListenerKind);
    fn observe(&mut self, element: &ElementId, threshold: f32, root_margin_px: f64);
    fn unobserve(&mut self, element: &ElementId);
    fn notify(&mut self, notice: &Notice);
}

/// Whether the page should act on the input that produced a batch of effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDisposition {
    Consumed,
    PassThrough,
}

impl InputDisposition {
    pub fn of(effects: &[StageEffect]) -> Self {
        if effects.iter().any(|e| matches!(e, StageEffect::ConsumeInput)) {
            InputDisposition::Consumed
        } else {
            InputDisposition::PassThrough
        }
    }
}

/// Applies a page-facing effect. Returns the effect when it belongs to the
/// driver instead.
pub fn apply_effect<H: Host + ?Sized>(host: &mut H, effect: StageEffect) -> Option<StageEffect> {
    match effect {
        StageEffect::ConsumeInput => {}
        StageEffect::LockScroll => host.set_scroll_locked(true),
        StageEffect::UnlockScroll => host.set_scroll_locked(false),
        StageEffect::ScrollTo { offset, smooth } => host.scroll_to(offset, smooth),
        StageEffect::ScrollToAnchor {
            anchor,
            offset_px,
            smooth,
        } => match host.element_bounds(&anchor) {
            Some(bounds) => host.scroll_to((bounds.top - offset_px).max(0.0), smooth),
            None => warn!(%anchor, "anchor not found, staying put"),
        },
        StageEffect::Listen { owner, kind } => host.listen(&owner, kind),
        StageEffect::Unlisten { owner, kind } => host.unlisten(&owner, kind),
        StageEffect::Observe {
            element,
            threshold,
            root_margin_px,
        } => host.observe(&element, threshold, root_margin_px),
        StageEffect::Unobserve { element } => host.unobserve(&element),
        StageEffect::Notify(notice) => host.notify(&notice),
        other @ (StageEffect::StartTimer { .. }
        | StageEffect::CancelTimer { .. }
        | StageEffect::LoadMedia { .. }
        | StageEffect::SubmitForm { .. }) => return Some(other),
    }
    None
}

/// Mount event with the spec's element measured.
pub fn measure_mount<M: Measure + ?Sized>(page: &M, spec: RegionSpec) -> StageEvent {
    let bounds = page.element_bounds(&spec.id).unwrap_or_else(|| {
        warn!(region = %spec.id, "mounting unmeasured element");
        ElementBounds::default()
    });
    StageEvent::Mount { spec, bounds }
}

/// Relayout event with every region and section re-measured.
pub fn measure_relayout<M: Measure + ?Sized>(page: &M, state: &StageState) -> StageEvent {
    let bounds = state
        .regions
        .iter()
        .filter_map(|r| page.element_bounds(r.id()).map(|b| (r.id().clone(), b)))
        .collect();
    let sections = state
        .navigation
        .sections()
        .iter()
        .map(|s| Section {
            id: s.id.clone(),
            bounds: page.element_bounds(&s.id).unwrap_or(s.bounds),
        })
        .collect();
    StageEvent::Relayout {
        viewport: page.viewport(),
        bounds,
        sections: Some(sections),
    }
}
