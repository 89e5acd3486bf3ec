//! Engine event stream.
//!
//! The engine reports what happened (append committed, alert fired,
//! notification dispatched, sync applied) as serializable events through an
//! [`EventSink`]. Emission is fire-and-forget: a sink failure never fails
//! the operation that produced the event.

use chrono::{DateTime, Utc};
use rt_common::{Outcome, RoundSeq, SessionId};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::sync::Mutex;

/// Canonical event names.
pub mod event_names {
    /// A round was appended and the snapshot advanced.
    pub const APPEND_COMMITTED: &str = "append_committed";
    /// The tail run reached the alert threshold.
    pub const ALERT_FIRED: &str = "alert_fired";
    /// A notifier send completed, delivered or not.
    pub const NOTIFY_RESULT: &str = "notify_result";
    /// Rounds appended by another writer were folded in.
    pub const SYNC_APPLIED: &str = "sync_applied";
}

/// Pipeline stage an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Append,
    Alert,
    Notify,
    Sync,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Append => write!(f, "append"),
            Stage::Alert => write!(f, "alert"),
            Stage::Notify => write!(f, "notify"),
            Stage::Sync => write!(f, "sync"),
        }
    }
}

/// One serializable engine event.
///
/// Optional fields carry the payload relevant to the event name and are
/// omitted from the wire form when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineEvent {
    /// Event name from [`event_names`].
    pub event: String,
    /// Emission time.
    pub ts: DateTime<Utc>,
    /// Session the event belongs to.
    pub session_id: SessionId,
    pub stage: Stage,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<u64>,
}

impl EngineEvent {
    pub fn new(event: &str, stage: Stage, session_id: &SessionId) -> Self {
        EngineEvent {
            event: event.to_string(),
            ts: Utc::now(),
            session_id: session_id.clone(),
            stage,
            seq: None,
            outcome: None,
            run_length: None,
            total: None,
            channel: None,
            delivered: None,
            applied: None,
        }
    }

    pub fn with_seq(mut self, seq: RoundSeq) -> Self {
        self.seq = Some(seq.value());
        self
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = Some(outcome.code().to_string());
        self
    }

    pub fn with_run_length(mut self, length: u32) -> Self {
        self.run_length = Some(length);
        self
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_delivery(mut self, channel: &str, delivered: bool) -> Self {
        self.channel = Some(channel.to_string());
        self.delivered = Some(delivered);
        self
    }

    pub fn with_applied(mut self, applied: u64) -> Self {
        self.applied = Some(applied);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Receives engine events.
///
/// Implementations must not panic and should return quickly; the engine
/// emits on its own thread and on the notification thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &EngineEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &EngineEvent) {}
}

/// Writes one JSON line per event to the wrapped writer.
pub struct JsonlSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonlSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        JsonlSink {
            writer: Mutex::new(writer),
        }
    }

    pub fn stderr() -> Self {
        JsonlSink::new(Box::new(std::io::stderr()))
    }
}

impl EventSink for JsonlSink {
    fn emit(&self, event: &EngineEvent) {
        // Lock or write failure drops the event.
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event.to_jsonl());
            let _ = writer.flush();
        }
    }
}

/// Fans every event out to all wrapped sinks in order.
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        FanoutSink { sinks }
    }

    pub fn push(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: &EngineEvent) {
        for sink in &self.sinks {
            sink.emit(event);
        }
    }
}
