//! Remote validation
//!
//! The wizard re-validates accepted input against a backend before building
//! the destination. The backend is abstracted behind [`RemoteValidator`];
//! [`MockBackend`] simulates one with an artificial delay and two hardcoded
//! demo rejection rules.
//!
//! Checks run on a worker thread and report back over an mpsc channel so the
//! UI loop never blocks. A check that misses its deadline is abandoned: its
//! receiver is dropped and the late verdict is discarded by the worker.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::{Result, WizardError};
use crate::providers::{FieldErrors, ValidatedForm};
use crate::types::FieldName;

pub const MSG_BACKEND_ERROR_NAME: &str = "Backend: \"error\" is not allowed bucket name";
pub const MSG_BACKEND_LETTER_B: &str = "Backend: bucket cannot contain letter \"b\" (demo)";

/// Outcome of a remote check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteVerdict {
    Accepted,
    /// At most one message per field
    Rejected(FieldErrors),
}

/// Semantic validation performed by a backend.
///
/// Implementations may block; they are always invoked off the UI thread.
pub trait RemoteValidator: Send + Sync {
    fn check(&self, form: &ValidatedForm) -> RemoteVerdict;
}

/// Simulated backend with demo-only bucket rules
#[derive(Debug, Clone)]
pub struct MockBackend {
    delay: Duration,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Duration::from_millis(450))
    }
}

impl MockBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Backend without artificial latency, for tests and headless runs
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl RemoteValidator for MockBackend {
    fn check(&self, form: &ValidatedForm) -> RemoteVerdict {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let bucket = form.bucket();
        let message = if bucket.trim().eq_ignore_ascii_case("error") {
            Some(MSG_BACKEND_ERROR_NAME)
        } else if bucket.chars().any(|c| c == 'b' || c == 'B') {
            Some(MSG_BACKEND_LETTER_B)
        } else {
            None
        };

        match message {
            Some(msg) => {
                let mut errors = FieldErrors::new();
                errors.insert(FieldName::Bucket, msg.to_string());
                RemoteVerdict::Rejected(errors)
            }
            None => RemoteVerdict::Accepted,
        }
    }
}

/// State of an in-flight check as seen by a non-blocking poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pending,
    Done(RemoteVerdict),
    TimedOut,
    /// Worker exited without a verdict (panicked validator)
    Failed,
}

/// Handle to a check running on a worker thread
#[derive(Debug)]
pub struct PendingCheck {
    rx: Receiver<RemoteVerdict>,
    timeout: Duration,
    deadline: Instant,
}

/// Run `validator` against `form` on a worker thread.
pub fn spawn_check(
    validator: Arc<dyn RemoteValidator>,
    form: ValidatedForm,
    timeout: Duration,
) -> PendingCheck {
    let (tx, rx) = mpsc::channel();
    debug!(provider = %form.provider(), "spawning remote check");

    thread::spawn(move || {
        let verdict = validator.check(&form);
        // Receiver is gone when the check was abandoned after its deadline
        if tx.send(verdict).is_err() {
            debug!("remote verdict arrived after the check was abandoned");
        }
    });

    PendingCheck {
        rx,
        timeout,
        deadline: Instant::now() + timeout,
    }
}

impl PendingCheck {
    /// Poll without blocking.
    pub fn try_poll(&self) -> CheckStatus {
        match self.rx.try_recv() {
            Ok(verdict) => CheckStatus::Done(verdict),
            Err(TryRecvError::Empty) if Instant::now() >= self.deadline => {
                warn!(timeout_ms = self.timeout_ms(), "remote check timed out");
                CheckStatus::TimedOut
            }
            Err(TryRecvError::Empty) => CheckStatus::Pending,
            Err(TryRecvError::Disconnected) => CheckStatus::Failed,
        }
    }

    /// Block until the verdict arrives or the deadline passes.
    pub fn wait(self) -> Result<RemoteVerdict> {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        match self.rx.recv_timeout(remaining) {
            Ok(verdict) => Ok(verdict),
            Err(RecvTimeoutError::Timeout) => Err(WizardError::RemoteTimeout(self.timeout_ms())),
            Err(RecvTimeoutError::Disconnected) => Err(WizardError::remote(
                "validation worker exited without a verdict",
            )),
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcp_form(bucket: &str) -> ValidatedForm {
        ValidatedForm::Gcp {
            bucket: bucket.to_string(),
            path: String::new(),
            region: None,
            key: "k".to_string(),
            secret: "s".to_string(),
        }
    }

    fn rejection(verdict: RemoteVerdict) -> String {
        match verdict {
            RemoteVerdict::Rejected(errors) => errors[&FieldName::Bucket].clone(),
            RemoteVerdict::Accepted => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_error_bucket_rejected_any_case() {
        let backend = MockBackend::instant();
        for bucket in ["error", "ERROR", " Error "] {
            assert_eq!(
                rejection(backend.check(&gcp_form(bucket))),
                MSG_BACKEND_ERROR_NAME
            );
        }
    }

    #[test]
    fn test_letter_b_rejected() {
        let backend = MockBackend::instant();
        assert_eq!(rejection(backend.check(&gcp_form("bob"))), MSG_BACKEND_LETTER_B);
        assert_eq!(rejection(backend.check(&gcp_form("XBX"))), MSG_BACKEND_LETTER_B);
    }

    #[test]
    fn test_plain_bucket_accepted() {
        let backend = MockBackend::instant();
        assert_eq!(backend.check(&gcp_form("mystore")), RemoteVerdict::Accepted);
    }

    #[test]
    fn test_spawned_check_delivers_verdict() {
        let pending = spawn_check(
            Arc::new(MockBackend::instant()),
            gcp_form("bob"),
            Duration::from_secs(5),
        );
        let verdict = pending.wait().unwrap();
        assert_eq!(rejection(verdict), MSG_BACKEND_LETTER_B);
    }

    #[test]
    fn test_slow_check_times_out() {
        let pending = spawn_check(
            Arc::new(MockBackend::new(Duration::from_millis(500))),
            gcp_form("mystore"),
            Duration::from_millis(20),
        );
        let err = pending.wait().unwrap_err();
        assert!(matches!(err, WizardError::RemoteTimeout(20)));
    }

    #[test]
    fn test_try_poll_reports_pending_then_done() {
        let pending = spawn_check(
            Arc::new(MockBackend::new(Duration::from_millis(100))),
            gcp_form("mystore"),
            Duration::from_secs(5),
        );
        assert_eq!(pending.try_poll(), CheckStatus::Pending);

        let started = Instant::now();
        loop {
            match pending.try_poll() {
                CheckStatus::Pending if started.elapsed() < Duration::from_secs(5) => {
                    thread::sleep(Duration::from_millis(10));
                }
                status => {
                    assert_eq!(status, CheckStatus::Done(RemoteVerdict::Accepted));
                    break;
                }
            }
        }
    }
}
