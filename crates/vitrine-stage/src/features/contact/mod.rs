//! Contact form submission lifecycle.

pub mod update;

use serde::Serialize;

use crate::common::{TaskId, TaskSeq};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed {
        message: String,
    },
}

/// At most one submission in flight; the submit control is disabled while
/// pending.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    phase: FormPhase,
    task: Option<TaskId>,
}

impl ContactForm {
    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Pending
    }

    pub fn submit(&mut self, seq: &mut TaskSeq) -> Option<TaskId> {
        if !self.can_submit() {
            return None;
        }
        let id = seq.next_id();
        self.phase = FormPhase::Pending;
        self.task = Some(id);
        Some(id)
    }

    /// Applies a result for `task`; stale results are ignored.
    pub fn complete(&mut self, task: TaskId, result: Result<(), String>) -> bool {
        if self.task != Some(task) {
            return false;
        }
        self.task = None;
        self.phase = match result {
            Ok(()) => FormPhase::Succeeded,
            Err(message) => FormPhase::Failed { message },
        };
        true
    }
}
