//! Notification transports for alerts and summaries.
//!
//! The [`Notifier`] contract is narrow: `send` is a total function
//! returning a bool. Every transport failure, whatever the cause,
//! collapses to `false`; callers never branch on a reason, they only log
//! the outcome. Delivery carries no retry or queueing semantics.

use thiserror::Error;

#[cfg(feature = "webhook")]
mod webhook;

#[cfg(feature = "webhook")]
pub use webhook::WebhookNotifier;

/// Errors constructing a notifier. Sending itself never errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("invalid webhook URL: {url:?}")]
    InvalidUrl { url: String },

    #[error("invalid timeout: {seconds}s")]
    InvalidTimeout { seconds: u64 },
}

/// A sink for opaque notification texts.
pub trait Notifier: Send + Sync {
    /// Deliver one message. Returns whether delivery succeeded; all
    /// failures collapse to `false`.
    fn send(&self, text: &str) -> bool;

    /// Short transport name for log lines.
    fn name(&self) -> &'static str;
}

/// Discards every message and reports success.
///
/// Used when dispatch is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn send(&self, _text: &str) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// Writes every message to the log at info level.
///
/// The fallback transport when no webhook is configured; the operator
/// still sees alerts on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, text: &str) -> bool {
        tracing::info!(message = text, "notification");
        true
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Records every message in memory. Test seam.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    sent: std::sync::Mutex<Vec<String>>,
    fail: std::sync::atomic::AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` report failure.
    pub fn set_failing(&self, failing: bool) {
        self.fail
            .store(failing, std::sync::atomic::Ordering::SeqCst);
    }

    /// Messages delivered so far, in order.
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().expect("notifier lock poisoned").len()
    }
}

impl Notifier for MemoryNotifier {
    fn send(&self, text: &str) -> bool {
        if self.fail.load(std::sync::atomic::Ordering::SeqCst) {
            return false;
        }
        self.sent
            .lock()
            .expect("notifier lock poisoned")
            .push(text.to_string());
        true
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
