use tracing::{debug, info};
use vitrine_core::form::FormFields;

use crate::common::TaskId;
use crate::effects::{Notice, StageEffect};
use crate::state::StageState;

pub fn submit(state: &mut StageState, fields: FormFields, effects: &mut Vec<StageEffect>) {
    match state.contact.submit(&mut state.task_seq) {
        Some(task) => effects.push(StageEffect::SubmitForm { task, fields }),
        None => debug!("submission already pending"),
    }
}

pub fn settle(
    state: &mut StageState,
    task: TaskId,
    result: Result<(), String>,
    effects: &mut Vec<StageEffect>,
) {
    let ok = result.is_ok();
    if state.contact.complete(task, result) {
        info!(ok, "contact form settled");
        effects.push(StageEffect::notify(Notice::FormSettled { ok }));
    }
}
