//! Threshold alerting over the provisional tail run.
//!
//! An alert is raised when the tail run reaches the configured length, and
//! exactly once per run: the evaluator records the run's `start_seq` per
//! symbol, so further extensions of the same run stay silent while a later
//! run of the same symbol (a different start) re-arms automatically.
//!
//! Evaluation is pure. The caller owns the arming state and threads the
//! returned successor state into the next call, which also lets a
//! short-lived process persist it between invocations.

use crate::aggregate::AggregateSnapshot;
use rt_common::{Outcome, RoundSeq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default streak length that raises an alert.
pub const DEFAULT_THRESHOLD: u32 = 4;

/// Per-symbol record of the run that last fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertState {
    /// `start_seq` of the last fired run, per symbol.
    pub fired: BTreeMap<Outcome, RoundSeq>,
}

impl AlertState {
    /// Whether the run starting at `start_seq` already fired for `outcome`.
    pub fn has_fired(&self, outcome: Outcome, start_seq: RoundSeq) -> bool {
        self.fired.get(&outcome) == Some(&start_seq)
    }
}

/// A raised streak alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakAlert {
    pub outcome: Outcome,
    /// Tail length at the moment of firing.
    pub length: u32,
    /// Identity of the run that fired.
    pub start_seq: RoundSeq,
}

impl StreakAlert {
    /// Notification text, e.g. `Streak alert: Banker x4`.
    pub fn message(&self) -> String {
        format!("Streak alert: {} x{}", self.outcome.label(), self.length)
    }
}

/// Result of one evaluation: the alert, if any, and the successor state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub fired: Option<StreakAlert>,
    pub state: AlertState,
}

/// Tail-run threshold evaluator.
///
/// Holds only the threshold; arming state travels with the caller. The
/// threshold minimum of 1 is enforced by settings validation upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertEvaluator {
    threshold: u32,
}

impl AlertEvaluator {
    pub fn new(threshold: u32) -> Self {
        AlertEvaluator { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Evaluate the snapshot against the arming state.
    ///
    /// Fires iff a tail run exists, its length has reached the threshold,
    /// and its start is not the recorded last-fired start for its symbol.
    /// The input state is never mutated; the successor state is returned
    /// whether or not an alert fired.
    pub fn evaluate(&self, state: &AlertState, snapshot: &AggregateSnapshot) -> Evaluation {
        let Some(tail) = snapshot.tail else {
            return Evaluation {
                fired: None,
                state: state.clone(),
            };
        };

        if tail.length < self.threshold || state.has_fired(tail.outcome, tail.start_seq) {
            return Evaluation {
                fired: None,
                state: state.clone(),
            };
        }

        let mut next = state.clone();
        next.fired.insert(tail.outcome, tail.start_seq);
        Evaluation {
            fired: Some(StreakAlert {
                outcome: tail.outcome,
                length: tail.length,
                start_seq: tail.start_seq,
            }),
            state: next,
        }
    }
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        AlertEvaluator::new(DEFAULT_THRESHOLD)
    }
}
