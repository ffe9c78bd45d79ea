//! Active-section tracking for the navigation bar.

pub mod update;

use serde::{Deserialize, Serialize};
use vitrine_types::{ElementBounds, ElementId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: ElementId,
    pub bounds: ElementBounds,
}

impl Section {
    pub fn new(id: impl Into<String>, bounds: ElementBounds) -> Self {
        Self {
            id: ElementId::new(id),
            bounds,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    sections: Vec<Section>,
    active: Option<ElementId>,
}

impl NavigationState {
    /// Replaces the section list, kept in document order by top edge.
    pub fn set_sections(&mut self, mut sections: Vec<Section>) {
        sections.sort_by(|a, b| a.bounds.top.total_cmp(&b.bounds.top));
        self.sections = sections;
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> Option<&ElementId> {
        self.active.as_ref()
    }

    pub fn bounds_of(&self, id: &ElementId) -> Option<ElementBounds> {
        self.sections.iter().find(|s| &s.id == id).map(|s| s.bounds)
    }

    /// Section under the probe line `offset + probe_px`: the one containing
    /// it, else the last one starting above it.
    pub fn section_at(&self, offset: f64, probe_px: f64) -> Option<&ElementId> {
        let line = offset + probe_px;
        self.sections
            .iter()
            .find(|s| s.bounds.top <= line && line < s.bounds.bottom())
            .or_else(|| self.sections.iter().rev().find(|s| s.bounds.top <= line))
            .map(|s| &s.id)
    }

    /// Recomputes the active section. Returns the new value when it changed.
    pub fn on_scroll(&mut self, offset: f64, probe_px: f64) -> Option<Option<ElementId>> {
        let next = self.section_at(offset, probe_px).cloned();
        if next == self.active {
            return None;
        }
        self.active.clone_from(&next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> NavigationState {
        let mut nav = NavigationState::default();
        nav.set_sections(vec![
            Section::new("contact", ElementBounds::new(3000.0, 900.0, 1280.0)),
            Section::new("hero", ElementBounds::new(0.0, 800.0, 1280.0)),
            Section::new("gallery", ElementBounds::new(800.0, 2200.0, 1280.0)),
        ]);
        nav
    }

    #[test]
    fn test_sections_sorted_by_top() {
        let nav = page();
        let ids: Vec<&str> = nav.sections().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["hero", "gallery", "contact"]);
    }

    #[test]
    fn test_active_section_follows_probe_line() {
        let mut nav = page();
        assert_eq!(nav.on_scroll(0.0, 80.0), Some(Some(ElementId::new("hero"))));
        assert_eq!(nav.on_scroll(100.0, 80.0), None);
        assert_eq!(nav.on_scroll(720.0, 80.0), Some(Some(ElementId::new("gallery"))));
        assert_eq!(nav.on_scroll(2920.0, 80.0), Some(Some(ElementId::new("contact"))));
        // Past the last section the last one stays active.
        assert_eq!(nav.on_scroll(9000.0, 80.0), None);
    }
}
