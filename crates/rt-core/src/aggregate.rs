//! Per-symbol aggregates over the outcome history.
//!
//! The snapshot is an immutable value with two construction paths:
//!
//! - `compute` segments the full history and folds the runs (batch path,
//!   used for hydration and as the equivalence oracle in tests);
//! - `apply_append` folds one new round into an existing snapshot
//!   (incremental path, the hot path inside the engine).
//!
//! For any history the two paths must produce structurally equal snapshots.
//! Averages are derived from integer accumulators rather than stored, so
//! equality of the accumulators implies bit-identical derived values.

use crate::segment::{segment_runs, Run};
use rt_common::{Outcome, Round, RoundSeq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated statistics for one outcome symbol.
///
/// The tail run counts toward `count` and `max_run` as it grows; the closed
/// accumulators pick it up only once a differing outcome closes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeStats {
    /// Occurrences of the symbol across all rounds.
    pub count: u64,
    /// Longest run of the symbol, tail run included.
    pub max_run: u32,
    /// Sum of lengths of closed runs.
    pub closed_run_sum: u64,
    /// Number of closed runs.
    pub closed_run_count: u32,
}

/// Immutable aggregate view of the full ledger.
///
/// An empty ledger is a well-defined empty snapshot: zero total, no
/// per-symbol entries, no tail. Symbols that never occurred have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    /// Number of rounds folded in.
    pub total: u64,
    /// Per-symbol statistics, keyed in canonical outcome order.
    pub per_outcome: BTreeMap<Outcome, OutcomeStats>,
    /// The provisional tail run; `None` iff the ledger is empty.
    pub tail: Option<Run>,
    /// Observed symbol-to-symbol adjacency counts (previous -> next).
    pub transitions: BTreeMap<Outcome, BTreeMap<Outcome, u64>>,
}

impl AggregateSnapshot {
    /// Batch path: segment and fold the full history in one pass.
    pub fn compute(rounds: &[Round]) -> Self {
        let runs = segment_runs(rounds);
        let mut per_outcome: BTreeMap<Outcome, OutcomeStats> = BTreeMap::new();
        for (idx, run) in runs.iter().enumerate() {
            let is_tail = idx + 1 == runs.len();
            let stats = per_outcome.entry(run.outcome).or_default();
            stats.count += run.length as u64;
            stats.max_run = stats.max_run.max(run.length);
            if !is_tail {
                stats.closed_run_sum += run.length as u64;
                stats.closed_run_count += 1;
            }
        }

        let mut transitions: BTreeMap<Outcome, BTreeMap<Outcome, u64>> = BTreeMap::new();
        for pair in rounds.windows(2) {
            *transitions
                .entry(pair[0].outcome)
                .or_default()
                .entry(pair[1].outcome)
                .or_insert(0) += 1;
        }

        AggregateSnapshot {
            total: rounds.len() as u64,
            per_outcome,
            tail: runs.last().copied(),
            transitions,
        }
    }

    /// Incremental path: fold one appended round into a new snapshot.
    ///
    /// Pure; the receiver is unchanged. Folding every round of a history
    /// through this from the empty snapshot equals [`compute`] over the
    /// same history, field for field.
    ///
    /// [`compute`]: AggregateSnapshot::compute
    pub fn apply_append(&self, seq: RoundSeq, outcome: Outcome) -> Self {
        let mut next = self.clone();
        next.total += 1;

        if let Some(prev) = self.tail {
            *next
                .transitions
                .entry(prev.outcome)
                .or_default()
                .entry(outcome)
                .or_insert(0) += 1;
        }

        match self.tail {
            Some(tail) if tail.outcome == outcome => {
                let mut extended = tail;
                extended.extend(seq);
                let stats = next.per_outcome.entry(outcome).or_default();
                stats.count += 1;
                stats.max_run = stats.max_run.max(extended.length);
                next.tail = Some(extended);
            }
            Some(tail) => {
                // The old tail closes; its length moves into the closed
                // accumulators of its own symbol.
                let closed = next.per_outcome.entry(tail.outcome).or_default();
                closed.closed_run_sum += tail.length as u64;
                closed.closed_run_count += 1;

                let stats = next.per_outcome.entry(outcome).or_default();
                stats.count += 1;
                stats.max_run = stats.max_run.max(1);
                next.tail = Some(Run::open(seq, outcome));
            }
            None => {
                let stats = next.per_outcome.entry(outcome).or_default();
                stats.count += 1;
                stats.max_run = stats.max_run.max(1);
                next.tail = Some(Run::open(seq, outcome));
            }
        }

        next
    }

    /// Mean run length for the symbol, rounded half-up to two decimals.
    ///
    /// The provisional tail run counts as if it were already closed, so a
    /// growing streak is visible in the average immediately. `None` when
    /// the symbol never occurred.
    pub fn avg_run(&self, outcome: Outcome) -> Option<f64> {
        let stats = self.per_outcome.get(&outcome)?;
        let mut sum = stats.closed_run_sum;
        let mut count = stats.closed_run_count as u64;
        if let Some(tail) = self.tail {
            if tail.outcome == outcome {
                sum += tail.length as u64;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }
        Some(round2(sum as f64 / count as f64))
    }

    /// Sequence id of the most recent round; the cursor for incremental
    /// reads. `None` iff the ledger is empty.
    pub fn last_seq(&self) -> Option<RoundSeq> {
        self.tail.map(|t| t.end_seq)
    }

    /// Occurrences of the symbol, zero when it never occurred.
    pub fn count(&self, outcome: Outcome) -> u64 {
        self.per_outcome.get(&outcome).map_or(0, |s| s.count)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Round half away from zero to two decimal places.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(codes: &str) -> Vec<Round> {
        codes
            .chars()
            .enumerate()
            .map(|(i, c)| {
                let outcome = Outcome::parse(&c.to_string()).unwrap();
                Round::new(RoundSeq::new(i as u64 + 1), outcome)
            })
            .collect()
    }

    fn incremental(codes: &str) -> AggregateSnapshot {
        history(codes)
            .iter()
            .fold(AggregateSnapshot::default(), |snap, round| {
                snap.apply_append(round.seq, round.outcome)
            })
    }

    // =======================================================================
    // Empty and single-round snapshots
    // =======================================================================

    #[test]
    fn test_empty_snapshot_is_well_defined() {
        let snap = AggregateSnapshot::compute(&[]);
        assert_eq!(snap.total, 0);
        assert!(snap.per_outcome.is_empty());
        assert!(snap.tail.is_none());
        assert!(snap.last_seq().is_none());
        assert!(snap.is_empty());
        for &outcome in Outcome::all() {
            assert_eq!(snap.avg_run(outcome), None);
            assert_eq!(snap.count(outcome), 0);
        }
    }

    #[test]
    fn test_single_round_snapshot() {
        let snap = AggregateSnapshot::compute(&history("P"));
        assert_eq!(snap.total, 1);
        assert_eq!(snap.count(Outcome::Player), 1);
        let stats = snap.per_outcome[&Outcome::Player];
        assert_eq!(stats.max_run, 1);
        assert_eq!(stats.closed_run_count, 0);
        assert_eq!(snap.avg_run(Outcome::Player), Some(1.0));
        assert_eq!(snap.tail.unwrap().length, 1);
        assert_eq!(snap.last_seq(), Some(RoundSeq::new(1)));
    }

    // =======================================================================
    // Batch statistics
    // =======================================================================

    #[test]
    fn test_mixed_history_statistics() {
        // P P B P P P -> runs (P,2) (B,1) (P,3 tail)
        let snap = AggregateSnapshot::compute(&history("PPBPPP"));
        assert_eq!(snap.total, 6);

        let player = snap.per_outcome[&Outcome::Player];
        assert_eq!(player.count, 5);
        assert_eq!(player.max_run, 3);
        assert_eq!(player.closed_run_sum, 2);
        assert_eq!(player.closed_run_count, 1);
        // (2 closed + 3 provisional) / 2 runs
        assert_eq!(snap.avg_run(Outcome::Player), Some(2.5));

        let banker = snap.per_outcome[&Outcome::Banker];
        assert_eq!(banker.count, 1);
        assert_eq!(banker.max_run, 1);
        assert_eq!(snap.avg_run(Outcome::Banker), Some(1.0));

        assert!(!snap.per_outcome.contains_key(&Outcome::Tie));
        assert_eq!(snap.avg_run(Outcome::Tie), None);

        let tail = snap.tail.unwrap();
        assert_eq!(tail.outcome, Outcome::Player);
        assert_eq!(tail.length, 3);
        assert_eq!(tail.start_seq, RoundSeq::new(4));
        assert_eq!(snap.last_seq(), Some(RoundSeq::new(6)));
    }

    #[test]
    fn test_tail_counts_toward_max_run() {
        // The longest Player run is the still-open tail.
        let snap = AggregateSnapshot::compute(&history("PBPPP"));
        assert_eq!(snap.per_outcome[&Outcome::Player].max_run, 3);
        assert_eq!(snap.per_outcome[&Outcome::Player].closed_run_sum, 1);
    }

    #[test]
    fn test_avg_rounding_to_two_decimals() {
        // Player runs: 1, 2 closed and 2 provisional -> (1+2+2)/3 = 1.67
        let snap = AggregateSnapshot::compute(&history("PBPPBPP"));
        assert_eq!(snap.avg_run(Outcome::Player), Some(1.67));
        assert_eq!(snap.avg_run(Outcome::Banker), Some(1.0));
    }

    #[test]
    fn test_avg_half_tie_rounds_away_from_zero() {
        // Player runs: 3 then six of 2 closed, 2 provisional -> 17/8 = 2.125,
        // reported as 2.13, never 2.12.
        let snap = AggregateSnapshot::compute(&history("PPPBPPBPPBPPBPPBPPBPPBPP"));
        assert_eq!(snap.avg_run(Outcome::Player), Some(2.13));
        assert_eq!(round2(2.125), 2.13);
    }

    #[test]
    fn test_transition_counts() {
        let snap = AggregateSnapshot::compute(&history("PPBPPP"));
        assert_eq!(snap.transitions[&Outcome::Player][&Outcome::Player], 3);
        assert_eq!(snap.transitions[&Outcome::Player][&Outcome::Banker], 1);
        assert_eq!(snap.transitions[&Outcome::Banker][&Outcome::Player], 1);
        assert!(!snap.transitions.contains_key(&Outcome::Tie));

        let total_adjacencies: u64 = snap
            .transitions
            .values()
            .flat_map(|row| row.values())
            .sum();
        assert_eq!(total_adjacencies, snap.total - 1);
    }

    // =======================================================================
    // Incremental path
    // =======================================================================

    #[test]
    fn test_incremental_matches_batch() {
        for codes in ["", "P", "PP", "PB", "PPBPPP", "PBPBPB", "TTTBBPPTP", "PBPPBPP"] {
            let batch = AggregateSnapshot::compute(&history(codes));
            assert_eq!(incremental(codes), batch, "history {codes:?}");
        }
    }

    #[test]
    fn test_apply_append_is_pure() {
        let before = AggregateSnapshot::compute(&history("PPB"));
        let saved = before.clone();
        let after = before.apply_append(RoundSeq::new(4), Outcome::Tie);
        assert_eq!(before, saved);
        assert_eq!(after.total, 4);
        assert_eq!(after.tail.unwrap().outcome, Outcome::Tie);
    }

    #[test]
    fn test_append_closes_previous_tail() {
        let snap = incremental("PPP");
        assert_eq!(snap.per_outcome[&Outcome::Player].closed_run_count, 0);

        let next = snap.apply_append(RoundSeq::new(4), Outcome::Banker);
        let player = next.per_outcome[&Outcome::Player];
        assert_eq!(player.closed_run_sum, 3);
        assert_eq!(player.closed_run_count, 1);
        assert_eq!(next.tail.unwrap().outcome, Outcome::Banker);
    }

    #[test]
    fn test_serde_roundtrip() {
        let snap = AggregateSnapshot::compute(&history("PPBPPP"));
        let json = serde_json::to_string(&snap).unwrap();
        let back: AggregateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }
}
