//! Effects returned by the reducer for the runtime (or a driver) to execute.

use std::time::Duration;

use serde::Serialize;
use vitrine_core::form::FormFields;
use vitrine_core::media::MediaKind;
use vitrine_types::{ElementId, ListenerKind, MediaRef};

use crate::common::{TaskId, TimerId};
use crate::features::pinning::PinCrossing;

#[derive(Debug, Clone, PartialEq)]
pub enum StageEffect {
    /// The triggering input must not reach the page.
    ConsumeInput,
    LockScroll,
    UnlockScroll,
    ScrollTo {
        offset: f64,
        smooth: bool,
    },
    /// Scroll so the anchor's top sits `offset_px` below the viewport top.
    ScrollToAnchor {
        anchor: ElementId,
        offset_px: f64,
        smooth: bool,
    },
    Listen {
        owner: ElementId,
        kind: ListenerKind,
    },
    Unlisten {
        owner: ElementId,
        kind: ListenerKind,
    },
    Observe {
        element: ElementId,
        threshold: f32,
        root_margin_px: f64,
    },
    Unobserve {
        element: ElementId,
    },
    /// Fires `TimerFired { id }` after `delay`, then every `every` until
    /// cancelled.
    StartTimer {
        id: TimerId,
        delay: Duration,
        every: Option<Duration>,
    },
    CancelTimer {
        id: TimerId,
    },
    LoadMedia {
        task: TaskId,
        source: MediaRef,
        kind: MediaKind,
    },
    SubmitForm {
        task: TaskId,
        fields: FormFields,
    },
    Notify(Notice),
}

/// Observable stage callbacks delivered to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    PinCrossed {
        region: ElementId,
        crossing: PinCrossing,
    },
    ActiveIndexChanged {
        region: ElementId,
        index: Option<usize>,
    },
    InterceptCaptured {
        region: ElementId,
    },
    InterceptReleased {
        region: ElementId,
    },
    ContentVisibility {
        region: ElementId,
        visible: bool,
    },
    IntroFinished {
        skipped: bool,
    },
    RevealStarted {
        element: ElementId,
    },
    RevealCompleted {
        element: ElementId,
    },
    CrossfadeStarted {
        element: ElementId,
        target: MediaRef,
    },
    CrossfadeCompleted {
        element: ElementId,
        current: MediaRef,
    },
    CrossfadeSkipped {
        element: ElementId,
        source: MediaRef,
    },
    TextRevealCompleted {
        element: ElementId,
    },
    ActiveSectionChanged {
        section: Option<ElementId>,
    },
    FormSettled {
        ok: bool,
    },
}

impl StageEffect {
    pub fn notify(notice: Notice) -> Self {
        StageEffect::Notify(notice)
    }
}
