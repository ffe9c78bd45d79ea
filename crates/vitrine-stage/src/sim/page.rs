use std::collections::{BTreeMap, BTreeSet};

use vitrine_types::{ElementBounds, ElementId, ListenerKind, Viewport};

use crate::effects::Notice;
use crate::host::{Host, Measure};

/// In-memory page: element layout, scroll position and lock, and a record of
/// every subscription and notice the stage produced.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    viewport: Viewport,
    offset: f64,
    locked: bool,
    scrolled: bool,
    elements: BTreeMap<ElementId, ElementBounds>,
    listeners: BTreeSet<(ElementId, ListenerKind)>,
    observers: BTreeMap<ElementId, f32>,
    notices: Vec<Notice>,
}

impl PageModel {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_element(mut self, id: impl Into<String>, bounds: ElementBounds) -> Self {
        self.elements.insert(ElementId::new(id), bounds);
        self
    }

    pub fn set_element(&mut self, id: &ElementId, bounds: ElementBounds) {
        self.elements.insert(id.clone(), bounds);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.offset = self.clamp(self.offset);
    }

    /// User-driven scroll; does not count as a stage-requested scroll.
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = self.clamp(offset);
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// True once after a stage-requested scroll moved the page.
    pub fn take_scrolled(&mut self) -> bool {
        std::mem::take(&mut self.scrolled)
    }

    fn max_offset(&self) -> Option<f64> {
        self.elements
            .values()
            .map(ElementBounds::bottom)
            .reduce(f64::max)
            .map(|bottom| (bottom - self.viewport.height).max(0.0))
    }

    fn clamp(&self, offset: f64) -> f64 {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.max_offset().map_or(offset, |max| offset.min(max))
    }
}

impl Measure for PageModel {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn element_bounds(&self, id: &ElementId) -> Option<ElementBounds> {
        self.elements.get(id).copied()
    }
}

impl Host for PageModel {
    fn set_scroll_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    fn scroll_to(&mut self, offset: f64, _smooth: bool) {
        let offset = self.clamp(offset);
        if (offset - self.offset).abs() > f64::EPSILON {
            self.offset = offset;
            self.scrolled = true;
        }
    }

    fn listen(&mut self, owner: &ElementId, kind: ListenerKind) {
        self.listeners.insert((owner.clone(), kind));
    }

    fn unlisten(&mut self, owner: &ElementId, kind: ListenerKind) {
        self.listeners.remove(&(owner.clone(), kind));
    }

    fn observe(&mut self, element: &ElementId, threshold: f32, _root_margin_px: f64) {
        self.observers.insert(element.clone(), threshold);
    }

    fn unobserve(&mut self, element: &ElementId) {
        self.observers.remove(element);
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}
