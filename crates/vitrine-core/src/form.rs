//! Contact form submission collaborator.

use std::fmt;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// Form submission errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The receiving side refused the submission.
    Rejected(String),
    /// The submission never reached the receiving side.
    Transport(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::Rejected(msg) => write!(f, "submission rejected: {msg}"),
            FormError::Transport(msg) => write!(f, "submission failed: {msg}"),
        }
    }
}

impl std::error::Error for FormError {}

pub trait FormSubmitter: Send + Sync {
    fn submit(&self, fields: FormFields) -> BoxFuture<'static, Result<(), FormError>>;
}

/// Stand-in submitter that always succeeds after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl FormSubmitter for SimulatedSubmitter {
    fn submit(&self, fields: FormFields) -> BoxFuture<'static, Result<(), FormError>> {
        let delay = self.delay;
        async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(email = %fields.email, "simulated form submission accepted");
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_simulated_submitter_succeeds_after_delay() {
        let submitter = SimulatedSubmitter::new(Duration::from_millis(1500));
        let start = tokio::time::Instant::now();
        submitter.submit(FormFields::default()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }
}
