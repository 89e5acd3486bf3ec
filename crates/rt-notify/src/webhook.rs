//! Webhook notification transport.
//!
//! POSTs each message as a small JSON document to a configured endpoint.
//! Compiled only with the `webhook` feature so the default build carries
//! no HTTP client.

use std::time::Duration;

use crate::{Notifier, NotifyError};

/// POSTs `{"text": ...}` to a fixed URL.
pub struct WebhookNotifier {
    url: String,
    agent: ureq::Agent,
}

impl WebhookNotifier {
    /// Build a notifier for the given endpoint.
    ///
    /// The URL must be http(s) and the timeout non-zero; both are
    /// validated here so `send` stays a total function.
    pub fn new(url: impl Into<String>, timeout_secs: u64) -> Result<Self, NotifyError> {
        let url = url.into();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NotifyError::InvalidUrl { url });
        }
        if timeout_secs == 0 {
            return Err(NotifyError::InvalidTimeout {
                seconds: timeout_secs,
            });
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(timeout_secs))
            .build();

        Ok(WebhookNotifier { url, agent })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, text: &str) -> bool {
        let payload = serde_json::json!({ "text": text });
        match self.agent.post(&self.url).send_json(payload) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(url = %self.url, error = %err, "webhook delivery failed");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
