//! The streak engine: single mutation boundary over a ledger store.
//!
//! Writers serialize through one gate: append to the store, fold the round
//! into the snapshot, evaluate alerts, publish, release. The published
//! snapshot lives in its own read-write slot that writers touch only for
//! the swap, so readers clone the `Arc` without waiting on store I/O held
//! by a writer. Notification dispatch runs on a background thread after
//! the gate is released and can never fail the append.

use crate::aggregate::AggregateSnapshot;
use crate::alert::{AlertEvaluator, AlertState, StreakAlert, DEFAULT_THRESHOLD};
use crate::events::{event_names, EngineEvent, EventSink, Stage};
use crate::ledger::LedgerStore;
use crate::summary::summary_text;
use rt_common::{Error, Outcome, Result, Round, RoundSeq, SessionId};
use rt_notify::Notifier;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread::JoinHandle;

/// Construction options for [`StreakEngine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Tail length that raises an alert.
    pub threshold: u32,
    /// Whether a summary is dispatched after every append.
    pub notify_summary: bool,
    /// Pre-seeded arming state (e.g. reloaded by a one-shot CLI).
    pub alert_state: AlertState,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            threshold: DEFAULT_THRESHOLD,
            notify_summary: true,
            alert_state: AlertState::default(),
        }
    }
}

/// Result of a successful append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppendReceipt {
    /// Sequence id the store assigned.
    pub seq: RoundSeq,
    pub outcome: Outcome,
    /// Ledger size after the append.
    pub total: u64,
    /// The streak alert this append raised, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<StreakAlert>,
}

/// The reader-visible state: swapped atomically by writers, never held
/// across I/O.
struct Published {
    snapshot: Arc<AggregateSnapshot>,
    alert_state: AlertState,
}

/// Streak engine over a ledger store, a notifier, and an event sink.
pub struct StreakEngine {
    store: Arc<dyn LedgerStore>,
    notifier: Arc<dyn Notifier>,
    events: Arc<dyn EventSink>,
    evaluator: AlertEvaluator,
    notify_summary: bool,
    session_id: SessionId,
    /// Serializes mutation; readers never take it.
    writer: Mutex<()>,
    published: RwLock<Published>,
    dispatchers: Mutex<Vec<JoinHandle<()>>>,
}

impl StreakEngine {
    /// Hydrate an engine from the store.
    ///
    /// Reads the full history and computes the snapshot in one batch pass.
    /// A pre-existing over-threshold tail does not fire retroactively; the
    /// next extension of that run fires once.
    pub fn new(
        store: Arc<dyn LedgerStore>,
        notifier: Arc<dyn Notifier>,
        events: Arc<dyn EventSink>,
        options: EngineOptions,
    ) -> Result<Self> {
        let rounds = store.read_all()?;
        let snapshot = AggregateSnapshot::compute(&rounds);
        Ok(StreakEngine {
            store,
            notifier,
            events,
            evaluator: AlertEvaluator::new(options.threshold),
            notify_summary: options.notify_summary,
            session_id: SessionId::new(),
            writer: Mutex::new(()),
            published: RwLock::new(Published {
                snapshot: Arc::new(snapshot),
                alert_state: options.alert_state,
            }),
            dispatchers: Mutex::new(Vec::new()),
        })
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn threshold(&self) -> u32 {
        self.evaluator.threshold()
    }

    /// Record one outcome.
    ///
    /// Mutation is serialized through the writer gate in a fixed order:
    /// store append, incremental fold, alert evaluation, snapshot publish.
    /// Readers stay off the gate and see the previous snapshot until the
    /// new one is published. Events are emitted and notifications
    /// dispatched after the gate is released.
    pub fn record(&self, outcome: Outcome) -> Result<AppendReceipt> {
        let (receipt, published) = {
            let _writer = self.lock_writer()?;
            let (snapshot, alert_state) = self.read_published();
            let seq = self.store.append(outcome)?;
            let next = snapshot.apply_append(seq, outcome);
            let eval = self.evaluator.evaluate(&alert_state, &next);

            let published = Arc::new(next);
            self.publish(Arc::clone(&published), eval.state);
            (
                AppendReceipt {
                    seq,
                    outcome,
                    total: published.total,
                    alert: eval.fired,
                },
                published,
            )
        };

        self.events.emit(
            &EngineEvent::new(
                event_names::APPEND_COMMITTED,
                Stage::Append,
                &self.session_id,
            )
            .with_seq(receipt.seq)
            .with_outcome(outcome)
            .with_total(receipt.total),
        );

        if let Some(alert) = receipt.alert {
            tracing::info!(
                outcome = alert.outcome.label(),
                length = alert.length,
                "streak alert"
            );
            self.events.emit(
                &EngineEvent::new(event_names::ALERT_FIRED, Stage::Alert, &self.session_id)
                    .with_seq(receipt.seq)
                    .with_outcome(alert.outcome)
                    .with_run_length(alert.length),
            );
        }

        self.dispatch(receipt.alert, published);
        Ok(receipt)
    }

    /// The currently published snapshot.
    ///
    /// The critical section is one `Arc` clone; readers keep working off
    /// the last published state even if a writer panicked.
    pub fn snapshot(&self) -> Arc<AggregateSnapshot> {
        self.published
            .read()
            .map(|published| Arc::clone(&published.snapshot))
            .unwrap_or_else(|poisoned| Arc::clone(&poisoned.into_inner().snapshot))
    }

    /// Current arming state, for persistence by short-lived callers.
    pub fn alert_state(&self) -> AlertState {
        self.published
            .read()
            .map(|published| published.alert_state.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().alert_state.clone())
    }

    /// Fold in rounds appended to the store by other writers.
    ///
    /// Reads strictly after the snapshot's cursor and applies each round
    /// through the incremental path. Foreign rounds update the view only;
    /// they never raise alerts here.
    pub fn sync(&self) -> Result<usize> {
        let applied = {
            let _writer = self.lock_writer()?;
            let (snapshot, alert_state) = self.read_published();
            let cursor = snapshot.last_seq().unwrap_or(RoundSeq(0));
            let missed = self.store.read_since(cursor)?;
            if missed.is_empty() {
                return Ok(0);
            }
            let mut next = (*snapshot).clone();
            for round in &missed {
                next = next.apply_append(round.seq, round.outcome);
            }
            self.publish(Arc::new(next), alert_state);
            missed.len()
        };

        self.events.emit(
            &EngineEvent::new(event_names::SYNC_APPLIED, Stage::Sync, &self.session_id)
                .with_applied(applied as u64),
        );
        Ok(applied)
    }

    /// The most recent `n` rounds, newest first.
    pub fn last_n(&self, n: usize) -> Result<Vec<Round>> {
        let mut rounds = self.store.read_all()?;
        let keep = rounds.len().saturating_sub(n);
        let mut recent = rounds.split_off(keep);
        recent.reverse();
        Ok(recent)
    }

    /// Wait for in-flight notification dispatch to finish.
    ///
    /// The append path never waits; a short-lived process calls this before
    /// exit so dispatched sends are not lost.
    pub fn drain_notifications(&self) {
        let handles: Vec<JoinHandle<()>> = match self.dispatchers.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(_) => return,
        };
        for handle in handles {
            let _ = handle.join();
        }
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, ()>> {
        self.writer
            .lock()
            .map_err(|_| Error::Internal("engine writer lock poisoned".to_string()))
    }

    /// The published snapshot and arming state, cloned out together.
    ///
    /// Callers that go on to publish must hold the writer gate across both
    /// calls; the read itself takes no lock a reader could contend on
    /// beyond the swap window.
    fn read_published(&self) -> (Arc<AggregateSnapshot>, AlertState) {
        let published = match self.published.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        (
            Arc::clone(&published.snapshot),
            published.alert_state.clone(),
        )
    }

    /// Swap in a new snapshot and arming state. The write lock covers the
    /// field swap only, never I/O.
    fn publish(&self, snapshot: Arc<AggregateSnapshot>, alert_state: AlertState) {
        let mut published = match self.published.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        published.snapshot = snapshot;
        published.alert_state = alert_state;
    }

    /// Send notifications on a background thread: the alert first, then the
    /// summary when enabled. Failures are logged and emitted, never raised.
    fn dispatch(&self, alert: Option<StreakAlert>, snapshot: Arc<AggregateSnapshot>) {
        if alert.is_none() && !self.notify_summary {
            return;
        }

        let notifier = Arc::clone(&self.notifier);
        let events = Arc::clone(&self.events);
        let session_id = self.session_id.clone();
        let send_summary = self.notify_summary;

        let handle = std::thread::spawn(move || {
            if let Some(alert) = alert {
                let delivered = notifier.send(&alert.message());
                if !delivered {
                    tracing::warn!(channel = notifier.name(), "alert notification failed");
                }
                events.emit(
                    &EngineEvent::new(event_names::NOTIFY_RESULT, Stage::Notify, &session_id)
                        .with_outcome(alert.outcome)
                        .with_run_length(alert.length)
                        .with_delivery(notifier.name(), delivered),
                );
            }
            if send_summary {
                let delivered = notifier.send(&summary_text(&snapshot));
                if !delivered {
                    tracing::warn!(channel = notifier.name(), "summary notification failed");
                }
                events.emit(
                    &EngineEvent::new(event_names::NOTIFY_RESULT, Stage::Notify, &session_id)
                        .with_delivery(notifier.name(), delivered),
                );
            }
        });

        if let Ok(mut pending) = self.dispatchers.lock() {
            pending.retain(|h| !h.is_finished());
            pending.push(handle);
        }
    }
}
