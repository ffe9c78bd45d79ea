use vitrine_types::ContentItem;

use super::{IndexLayout, Neighbors, Slot, active_index, neighbors, slot, step_fill};

/// Ordered items of a region and the index derived from its progress.
///
/// The active index is only ever recomputed from progress, never stepped.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: Vec<ContentItem>,
    layout: IndexLayout,
    progress: f32,
    active: Option<usize>,
}

impl ItemSet {
    pub fn new(items: Vec<ContentItem>, layout: IndexLayout) -> Self {
        let active = active_index(0.0, items.len());
        Self {
            items,
            layout,
            progress: 0.0,
            active,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&ContentItem> {
        self.active.and_then(|i| self.items.get(i))
    }

    pub fn neighbors(&self) -> Neighbors {
        self.active
            .map(|i| neighbors(i, self.items.len(), self.layout))
            .unwrap_or_default()
    }

    pub fn slot(&self, index: usize) -> Slot {
        match self.active {
            Some(active) if index < self.items.len() => {
                slot(index, active, self.items.len(), self.layout)
            }
            _ => Slot::Hidden,
        }
    }

    /// Returns true when the active index changed.
    pub fn set_progress(&mut self, progress: f32) -> bool {
        self.progress = progress;
        let next = active_index(progress, self.items.len());
        let changed = next != self.active;
        self.active = next;
        changed
    }

    pub fn step_fills(&self) -> Vec<f32> {
        (0..self.items.len())
            .map(|i| step_fill(self.progress, i, self.items.len()))
            .collect()
    }
}
