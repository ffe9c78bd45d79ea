//! Events consumed by the stage reducer.

use serde::Deserialize;
use vitrine_core::form::FormFields;
use vitrine_types::{ElementBounds, ElementId, MediaRef, RawInput, Viewport};

use crate::common::{TaskId, TimerId};
use crate::features::navigation::Section;
use crate::features::pinning::RegionSpec;
use crate::features::transition::TextRevealMode;

#[derive(Debug, Clone)]
pub enum StageEvent {
    /// Initial load; `anchor` is the URL fragment, if any.
    Boot { anchor: Option<ElementId> },
    /// Per-frame clock.
    Frame { now_ms: u64 },
    Input(RawInput),
    Mount {
        spec: RegionSpec,
        bounds: ElementBounds,
    },
    /// Tears down everything `id` owns: region, listeners, timers, transitions.
    Unmount { id: ElementId },
    /// Fresh measurements after a resize.
    Relayout {
        viewport: Viewport,
        bounds: Vec<(ElementId, ElementBounds)>,
        sections: Option<Vec<Section>>,
    },
    Sections(Vec<Section>),
    /// All regions are mounted and measured.
    RegionsReady,
    IntroFinished,
    NavigateTo { anchor: ElementId },
    ObserveReveal { element: ElementId },
    Visibility { element: ElementId, ratio: f32 },
    /// Registers a crossfade slot showing `initial`.
    SetMedia {
        element: ElementId,
        initial: Option<MediaRef>,
    },
    Crossfade {
        element: ElementId,
        target: MediaRef,
    },
    RevealText {
        element: ElementId,
        text: String,
        mode: TextRevealMode,
    },
    TimerFired { id: TimerId },
    MediaLoaded { task: TaskId, source: MediaRef },
    MediaFailed {
        task: TaskId,
        source: MediaRef,
        error: String,
    },
    SubmitForm { fields: FormFields },
    FormResult {
        task: TaskId,
        result: Result<(), String>,
    },
}

/// Host-originated commands a script or page can issue directly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum StageCommand {
    Unmount {
        id: ElementId,
    },
    RegionsReady,
    IntroFinished,
    NavigateTo {
        anchor: ElementId,
    },
    ObserveReveal {
        element: ElementId,
    },
    Visibility {
        element: ElementId,
        ratio: f32,
    },
    SetMedia {
        element: ElementId,
        #[serde(default)]
        initial: Option<MediaRef>,
    },
    Crossfade {
        element: ElementId,
        target: MediaRef,
    },
    RevealText {
        element: ElementId,
        text: String,
        #[serde(default)]
        mode: TextRevealMode,
    },
    SubmitForm {
        fields: FormFields,
    },
}

impl From<StageCommand> for StageEvent {
    fn from(command: StageCommand) -> Self {
        match command {
            StageCommand::Unmount { id } => StageEvent::Unmount { id },
            StageCommand::RegionsReady => StageEvent::RegionsReady,
            StageCommand::IntroFinished => StageEvent::IntroFinished,
            StageCommand::NavigateTo { anchor } => StageEvent::NavigateTo { anchor },
            StageCommand::ObserveReveal { element } => StageEvent::ObserveReveal { element },
            StageCommand::Visibility { element, ratio } => {
                StageEvent::Visibility { element, ratio }
            }
            StageCommand::SetMedia { element, initial } => {
                StageEvent::SetMedia { element, initial }
            }
            StageCommand::Crossfade { element, target } => {
                StageEvent::Crossfade { element, target }
            }
            StageCommand::RevealText {
                element,
                text,
                mode,
            } => StageEvent::RevealText {
                element,
                text,
                mode,
            },
            StageCommand::SubmitForm { fields } => StageEvent::SubmitForm { fields },
        }
    }
}
