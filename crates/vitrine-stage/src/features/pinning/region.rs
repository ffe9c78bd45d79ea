use serde::{Deserialize, Serialize};
use vitrine_core::config::Config;
use vitrine_types::{ContentItem, ElementBounds, ElementId, Viewport};

use super::{
    Boundary, BoundarySizing, PinCrossing, PinPhase, compute_boundary, crossings, phase_at,
};
use crate::features::index::{self, IndexLayout, ItemSet, RotationMode};
use crate::features::progress::{CaptureMode, InterceptState, page_progress};

/// Declarative description of a pinned region, supplied at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    pub id: ElementId,
    #[serde(default)]
    pub capture: CaptureMode,
    #[serde(default)]
    pub sizing: BoundarySizing,
    /// Viewport position (0 = top) where pinning starts.
    #[serde(default)]
    pub trigger: f64,
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(default)]
    pub layout: IndexLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationMode>,
    /// Width of a horizontal strip translated by progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_width: Option<f64>,
    /// Element whose media crossfades to the active item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crossfade_target: Option<ElementId>,
}

impl RegionSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ElementId::new(id),
            capture: CaptureMode::PageScroll,
            sizing: BoundarySizing::default(),
            trigger: 0.0,
            items: Vec::new(),
            layout: IndexLayout::Linear,
            rotation: None,
            track_width: None,
            crossfade_target: None,
        }
    }

    #[must_use]
    pub fn intercept(mut self) -> Self {
        self.capture = CaptureMode::InputIntercept;
        self
    }

    #[must_use]
    pub fn with_sizing(mut self, sizing: BoundarySizing) -> Self {
        self.sizing = sizing;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<ContentItem>, layout: IndexLayout) -> Self {
        self.items = items;
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationMode) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_track_width(mut self, width: f64) -> Self {
        self.track_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_crossfade_target(mut self, target: impl Into<String>) -> Self {
        self.crossfade_target = Some(ElementId::new(target));
        self
    }
}

#[derive(Debug, Default)]
pub struct ScrollOutcome {
    pub crossings: Vec<PinCrossing>,
    pub index_changed: bool,
}

#[derive(Debug, Default)]
pub struct RelayoutOutcome {
    /// Page offset that keeps a pinned region's progress.
    pub correction: Option<f64>,
    /// What re-evaluating an unpinned region at the offset changed.
    pub scrolled: ScrollOutcome,
}

/// Live state of one mounted region.
#[derive(Debug, Clone)]
pub struct RegionState {
    pub spec: RegionSpec,
    pub bounds: ElementBounds,
    pub boundary: Option<Boundary>,
    pub phase: PinPhase,
    pub progress: f32,
    pub gap_px: f64,
    pub intercept: Option<InterceptState>,
    pub items: ItemSet,
}

impl RegionState {
    /// Computes layout but leaves the region in `Before`; the caller evaluates
    /// the current offset so mount-time crossings fire normally.
    pub fn new(
        mut spec: RegionSpec,
        bounds: ElementBounds,
        viewport: Viewport,
        config: &Config,
    ) -> Self {
        let items = ItemSet::new(std::mem::take(&mut spec.items), spec.layout);
        let intercept =
            (spec.capture == CaptureMode::InputIntercept).then(InterceptState::default);
        let mut region = Self {
            spec,
            bounds,
            boundary: None,
            phase: PinPhase::Before,
            progress: 0.0,
            gap_px: 0.0,
            intercept,
            items,
        };
        region.measure(bounds, viewport, config);
        region
    }

    pub fn id(&self) -> &ElementId {
        &self.spec.id
    }

    pub fn is_intercept(&self) -> bool {
        self.intercept.is_some()
    }

    /// Intercept region still holding native scrolling.
    pub fn is_capturing(&self) -> bool {
        self.intercept.as_ref().is_some_and(|i| !i.released)
    }

    pub fn is_pinned(&self) -> bool {
        self.phase == PinPhase::Pinned
    }

    fn measure(&mut self, bounds: ElementBounds, viewport: Viewport, config: &Config) {
        self.bounds = bounds;
        self.gap_px = index::gap(viewport.width, &config.layout.gap);
        self.boundary = compute_boundary(
            self.spec.sizing,
            bounds,
            viewport,
            self.items.len(),
            self.spec.trigger,
            config.pinning.per_item_viewport_fraction,
        );
    }

    /// Page-scroll update. Intercept regions ignore the page offset here.
    pub fn scroll_to(&mut self, offset: f64) -> ScrollOutcome {
        if self.is_intercept() {
            return ScrollOutcome::default();
        }
        let to = phase_at(self.boundary.as_ref(), offset);
        let crossed = self.move_to_phase(to);
        self.progress = page_progress(offset, self.boundary.as_ref());
        ScrollOutcome {
            crossings: crossed,
            index_changed: self.items.set_progress(self.progress),
        }
    }

    /// Moves to `to`, returning the crossings that transition implies.
    pub fn move_to_phase(&mut self, to: PinPhase) -> Vec<PinCrossing> {
        let crossed = crossings(self.phase, to).to_vec();
        self.phase = to;
        crossed
    }

    /// Copies the accumulator into the region's progress. Returns whether the
    /// active index changed.
    pub fn sync_intercept_progress(&mut self) -> bool {
        let Some(progress) = self.intercept.as_ref().map(|i| i.progress) else {
            return false;
        };
        self.progress = progress;
        self.items.set_progress(progress)
    }

    /// Re-measures after a resize.
    ///
    /// A region pinned at the time of the resize keeps its progress and
    /// phase and returns the page offset that preserves it. Any other region
    /// is evaluated at `offset` like a scroll, so a boundary that moved
    /// under the page still reports its crossings and index change.
    pub fn relayout(
        &mut self,
        bounds: ElementBounds,
        viewport: Viewport,
        offset: f64,
        config: &Config,
    ) -> RelayoutOutcome {
        let was_pinned = self.is_pinned();
        self.measure(bounds, viewport, config);
        if was_pinned
            && !self.is_intercept()
            && let Some(boundary) = self.boundary
        {
            return RelayoutOutcome {
                correction: Some(boundary.offset_for(self.progress)),
                scrolled: ScrollOutcome::default(),
            };
        }
        RelayoutOutcome {
            correction: None,
            scrolled: self.scroll_to(offset),
        }
    }

    pub fn rotation_deg(&self) -> Option<f32> {
        self.spec
            .rotation
            .map(|mode| index::rotation_deg(self.progress, self.items.len(), mode))
    }

    pub fn track_offset_px(&self, viewport_width: f64) -> Option<f64> {
        self.spec
            .track_width
            .map(|width| index::track_offset(self.progress, width, viewport_width))
    }
}
