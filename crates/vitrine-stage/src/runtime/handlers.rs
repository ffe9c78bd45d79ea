//! Effect handlers that spawn work off the reducer.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vitrine_core::form::{FormFields, FormSubmitter};
use vitrine_core::media::{MediaKind, MediaLoader};
use vitrine_types::MediaRef;

use super::StageEventSender;
use crate::common::{TaskId, TimerId};
use crate::events::StageEvent;

/// Spawns a timer task that sends `TimerFired` after `delay`, then every
/// `every`, until the returned token is cancelled or the inbox closes.
pub fn spawn_timer(
    inbox: StageEventSender,
    id: TimerId,
    delay: Duration,
    every: Option<Duration>,
) -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        let mut wait = delay;
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(wait) => {}
            }
            if inbox.send(StageEvent::TimerFired { id }).is_err() {
                break;
            }
            match every {
                Some(every) => wait = every,
                None => break,
            }
        }
        debug!(?id, "timer task finished");
    });
    token
}

pub fn spawn_media_load(
    inbox: StageEventSender,
    loader: Arc<dyn MediaLoader>,
    task: TaskId,
    source: MediaRef,
    kind: MediaKind,
) {
    let load = loader.load(&source, kind);
    tokio::spawn(async move {
        let event = match load.await {
            Ok(_) => StageEvent::MediaLoaded { task, source },
            Err(e) => {
                warn!(source = source.as_str(), error = %e, "media load failed");
                StageEvent::MediaFailed {
                    task,
                    source,
                    error: e.to_string(),
                }
            }
        };
        let _ = inbox.send(event);
    });
}

pub fn spawn_form_submit(
    inbox: StageEventSender,
    submitter: Arc<dyn FormSubmitter>,
    task: TaskId,
    fields: FormFields,
) {
    let submit = submitter.submit(fields);
    tokio::spawn(async move {
        let result = submit.await.map_err(|e| e.to_string());
        let _ = inbox.send(StageEvent::FormResult { task, result });
    });
}
