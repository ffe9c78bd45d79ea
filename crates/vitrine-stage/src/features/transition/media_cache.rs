use std::collections::HashMap;

use vitrine_types::MediaRef;

use crate::common::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Loading(TaskId),
    Ready,
    Failed,
}

/// Load status per media source, so each source is requested at most once.
#[derive(Debug, Default)]
pub struct MediaCache {
    entries: HashMap<MediaRef, MediaStatus>,
}

impl MediaCache {
    pub fn status(&self, source: &MediaRef) -> Option<MediaStatus> {
        self.entries.get(source).copied()
    }

    pub fn is_ready(&self, source: &MediaRef) -> bool {
        self.status(source) == Some(MediaStatus::Ready)
    }

    /// True when nothing is known or a previous load failed.
    pub fn needs_load(&self, source: &MediaRef) -> bool {
        matches!(self.status(source), None | Some(MediaStatus::Failed))
    }

    pub fn mark_loading(&mut self, source: MediaRef, task: TaskId) {
        self.entries.insert(source, MediaStatus::Loading(task));
    }

    pub fn mark_ready(&mut self, source: MediaRef) {
        self.entries.insert(source, MediaStatus::Ready);
    }

    pub fn mark_failed(&mut self, source: MediaRef) {
        self.entries.insert(source, MediaStatus::Failed);
    }
}
