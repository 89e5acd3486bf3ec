//! Deterministic renderings of an aggregate snapshot.
//!
//! Two forms: the short dispatch text sent through notifiers and the full
//! [`StatsReport`] the CLI prints as text or JSON. Both are pure functions
//! of the snapshot: same input, byte-identical output. No timestamps, no
//! randomness, stable symbol order.

use crate::aggregate::AggregateSnapshot;
use crate::segment::Run;
use rt_common::Outcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Short dispatch form sent through notifiers.
///
/// ```text
/// Total rounds: 6
/// Counts: P:5, B:1
/// ```
///
/// Symbols appear in canonical order, present symbols only; an empty
/// snapshot renders `Counts: -`.
pub fn summary_text(snapshot: &AggregateSnapshot) -> String {
    let counts: Vec<String> = snapshot
        .per_outcome
        .iter()
        .map(|(outcome, stats)| format!("{}:{}", outcome.code(), stats.count))
        .collect();
    let counts_line = if counts.is_empty() {
        "-".to_string()
    } else {
        counts.join(", ")
    };
    format!("Total rounds: {}\nCounts: {}", snapshot.total, counts_line)
}

/// One per-symbol row of the full report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeReport {
    pub outcome: Outcome,
    pub count: u64,
    pub max_run: u32,
    /// Mean run length, provisional tail included, already rounded.
    pub avg_run: f64,
}

/// Full serializable view of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub total: u64,
    /// Rows in canonical outcome order, present symbols only.
    pub outcomes: Vec<OutcomeReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail: Option<Run>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub transitions: BTreeMap<Outcome, BTreeMap<Outcome, u64>>,
}

impl StatsReport {
    pub fn from_snapshot(snapshot: &AggregateSnapshot) -> Self {
        let outcomes = snapshot
            .per_outcome
            .iter()
            .map(|(&outcome, stats)| OutcomeReport {
                outcome,
                count: stats.count,
                max_run: stats.max_run,
                avg_run: snapshot.avg_run(outcome).unwrap_or(0.0),
            })
            .collect();
        StatsReport {
            total: snapshot.total,
            outcomes,
            tail: snapshot.tail,
            transitions: snapshot.transitions.clone(),
        }
    }

    /// Aligned text rendering for terminal output.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total rounds: {}", self.total);
        if self.total == 0 {
            let _ = writeln!(out, "Ledger is empty.");
            return out;
        }
        if let Some(tail) = &self.tail {
            let _ = writeln!(out, "Tail run: {} x{}", tail.outcome.label(), tail.length);
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<8} {:>6} {:>8} {:>8}",
            "Outcome", "Count", "Max run", "Avg run"
        );
        for row in &self.outcomes {
            let _ = writeln!(
                out,
                "{:<8} {:>6} {:>8} {:>8.2}",
                row.outcome.label(),
                row.count,
                row.max_run,
                row.avg_run
            );
        }
        if !self.transitions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Transitions:");
            for (from, row) in &self.transitions {
                for (to, n) in row {
                    let _ = writeln!(out, "  {} -> {}: {}", from.code(), to.code(), n);
                }
            }
        }
        out
    }
}
