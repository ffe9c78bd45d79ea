use std::collections::BTreeSet;

use vitrine_types::{ElementId, ListenerKind};

use super::CaptureMode;

/// Input subscriptions a region needs for its capture mode.
pub fn listeners_for(mode: CaptureMode) -> &'static [ListenerKind] {
    match mode {
        CaptureMode::PageScroll => &[ListenerKind::Scroll, ListenerKind::Resize],
        CaptureMode::InputIntercept => &[
            ListenerKind::Wheel,
            ListenerKind::Touch,
            ListenerKind::Scroll,
            ListenerKind::Resize,
        ],
    }
}

/// Every live subscription, keyed by owner.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    subscriptions: BTreeSet<(ElementId, ListenerKind)>,
}

impl ListenerRegistry {
    /// Returns false when `owner` already holds `kind`.
    pub fn subscribe(&mut self, owner: &ElementId, kind: ListenerKind) -> bool {
        self.subscriptions.insert((owner.clone(), kind))
    }

    pub fn unsubscribe(&mut self, owner: &ElementId, kind: ListenerKind) -> bool {
        self.subscriptions.remove(&(owner.clone(), kind))
    }

    /// Drops everything `owner` holds and returns the released kinds.
    pub fn release_owner(&mut self, owner: &ElementId) -> Vec<ListenerKind> {
        let kinds: Vec<ListenerKind> = self
            .subscriptions
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, kind)| *kind)
            .collect();
        for kind in &kinds {
            self.subscriptions.remove(&(owner.clone(), *kind));
        }
        kinds
    }

    pub fn is_subscribed(&self, owner: &ElementId, kind: ListenerKind) -> bool {
        self.subscriptions.contains(&(owner.clone(), kind))
    }

    pub fn count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn count_kind(&self, kind: ListenerKind) -> usize {
        self.subscriptions.iter().filter(|(_, k)| *k == kind).count()
    }
}
