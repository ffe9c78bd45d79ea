use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use vitrine_types::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

#[derive(Debug, Default)]
pub struct TimerSeq {
    next: u64,
}

impl TimerSeq {
    pub fn next_id(&mut self) -> TimerId {
        let id = TimerId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerPurpose {
    /// Interval driving a typewriter or scramble reveal.
    TextReveal,
    /// Fallback wait before scrolling to a deep-link anchor.
    DeepLinkSettle,
}

/// Who a timer belongs to. Element timers die with their element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerScope {
    Element(ElementId),
    /// Page-level work no unmount can release.
    Stage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerOwner {
    pub scope: TimerScope,
    pub purpose: TimerPurpose,
}

impl TimerOwner {
    pub fn element(&self) -> Option<&ElementId> {
        match &self.scope {
            TimerScope::Element(element) => Some(element),
            TimerScope::Stage => None,
        }
    }
}

/// Timers the reducer considers live (stored in `StageState`, mutated only by
/// the reducer). The runtime mirrors this set with cancellation tokens.
#[derive(Debug, Default)]
pub struct ActiveTimers {
    timers: BTreeMap<TimerId, TimerOwner>,
}

impl ActiveTimers {
    pub fn start(
        &mut self,
        seq: &mut TimerSeq,
        scope: TimerScope,
        purpose: TimerPurpose,
    ) -> TimerId {
        let id = seq.next_id();
        self.timers.insert(id, TimerOwner { scope, purpose });
        id
    }

    pub fn owner(&self, id: TimerId) -> Option<&TimerOwner> {
        self.timers.get(&id)
    }

    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Forgets a timer. Returns its owner if it was still live.
    pub fn finish(&mut self, id: TimerId) -> Option<TimerOwner> {
        self.timers.remove(&id)
    }

    /// Drops every timer owned by `element`, returning their ids so the caller
    /// can emit cancellations.
    pub fn release_element(&mut self, element: &ElementId) -> Vec<TimerId> {
        let ids: Vec<TimerId> = self
            .timers
            .iter()
            .filter(|(_, owner)| owner.element() == Some(element))
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.timers.remove(id);
        }
        ids
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
