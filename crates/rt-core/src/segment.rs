//! Run segmentation over an ordered outcome history.
//!
//! A run is a maximal block of consecutive rounds that share one outcome.
//! Segmentation is a single left-to-right fold with no lookahead: each round
//! either extends the current run or opens a new one. The result is a
//! partition of the input in input order.
//!
//! Ordering is positional. Sequence ids carry identity (a run is keyed by
//! its `start_seq` downstream), but the fold never compares or sorts by
//! them, and timestamps are ignored entirely.

use rt_common::{Outcome, Round, RoundSeq};
use serde::{Deserialize, Serialize};

/// A maximal block of consecutive rounds with the same outcome.
///
/// The final run of a non-empty history is the tail run: still open,
/// extended or closed by the next append.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The repeated outcome.
    pub outcome: Outcome,
    /// Number of rounds in the block, always >= 1.
    pub length: u32,
    /// Sequence id of the first round in the block.
    pub start_seq: RoundSeq,
    /// Sequence id of the last round in the block.
    pub end_seq: RoundSeq,
}

impl Run {
    /// Open a fresh length-1 run at the given round.
    pub fn open(seq: RoundSeq, outcome: Outcome) -> Self {
        Run {
            outcome,
            length: 1,
            start_seq: seq,
            end_seq: seq,
        }
    }

    /// Extend this run by one round.
    pub fn extend(&mut self, seq: RoundSeq) {
        self.length += 1;
        self.end_seq = seq;
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.outcome.label(), self.length)
    }
}

/// Split an ordered history into its maximal same-outcome runs.
///
/// Empty input yields an empty vec. The output partitions the input: run
/// lengths sum to the input length, adjacent runs differ in outcome, and
/// concatenating the runs reproduces the input order.
pub fn segment_runs(rounds: &[Round]) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for round in rounds {
        match runs.last_mut() {
            Some(current) if current.outcome == round.outcome => current.extend(round.seq),
            _ => runs.push(Run::open(round.seq, round.outcome)),
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a history from a compact code string, seq ids 1..=n.
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

    fn shape(runs: &[Run]) -> Vec<(Outcome, u32)> {
        runs.iter().map(|r| (r.outcome, r.length)).collect()
    }

    #[test]
    fn test_empty_history_yields_no_runs() {
        assert!(segment_runs(&[]).is_empty());
    }

    #[test]
    fn test_single_round_is_one_run() {
        let runs = segment_runs(&history("B"));
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].outcome, Outcome::Banker);
        assert_eq!(runs[0].length, 1);
        assert_eq!(runs[0].start_seq, runs[0].end_seq);
    }

    #[test]
    fn test_uniform_history_is_one_run() {
        let runs = segment_runs(&history("TTTTT"));
        assert_eq!(shape(&runs), vec![(Outcome::Tie, 5)]);
        assert_eq!(runs[0].start_seq, RoundSeq::new(1));
        assert_eq!(runs[0].end_seq, RoundSeq::new(5));
    }

    #[test]
    fn test_alternating_history_is_all_singletons() {
        let runs = segment_runs(&history("PBPBPB"));
        assert_eq!(runs.len(), 6);
        assert!(runs.iter().all(|r| r.length == 1));
    }

    #[test]
    fn test_mixed_history_segments() {
        // P P B P P P -> (P,2) (B,1) (P,3)
        let runs = segment_runs(&history("PPBPPP"));
        assert_eq!(
            shape(&runs),
            vec![
                (Outcome::Player, 2),
                (Outcome::Banker, 1),
                (Outcome::Player, 3),
            ]
        );
        assert_eq!(runs[0].start_seq, RoundSeq::new(1));
        assert_eq!(runs[0].end_seq, RoundSeq::new(2));
        assert_eq!(runs[1].start_seq, RoundSeq::new(3));
        assert_eq!(runs[2].start_seq, RoundSeq::new(4));
        assert_eq!(runs[2].end_seq, RoundSeq::new(6));
    }

    #[test]
    fn test_partition_invariants() {
        let rounds = history("PPBTTTPBBPPPT");
        let runs = segment_runs(&rounds);

        let total: u32 = runs.iter().map(|r| r.length).sum();
        assert_eq!(total as usize, rounds.len());

        for pair in runs.windows(2) {
            assert_ne!(pair[0].outcome, pair[1].outcome);
            assert_eq!(pair[0].end_seq.next(), pair[1].start_seq);
        }

        // Re-expanding the runs reproduces the input outcome order.
        let expanded: Vec<Outcome> = runs
            .iter()
            .flat_map(|r| std::iter::repeat(r.outcome).take(r.length as usize))
            .collect();
        let original: Vec<Outcome> = rounds.iter().map(|r| r.outcome).collect();
        assert_eq!(expanded, original);
    }

    #[test]
    fn test_span_matches_length() {
        for runs in [
            segment_runs(&history("P")),
            segment_runs(&history("PPBPPP")),
            segment_runs(&history("BBTTPPP")),
        ] {
            for run in runs {
                assert_eq!(
                    run.end_seq.value() - run.start_seq.value() + 1,
                    run.length as u64
                );
            }
        }
    }

    #[test]
    fn test_display_names_outcome_and_length() {
        let run = Run::open(RoundSeq::new(4), Outcome::Banker);
        assert_eq!(run.to_string(), "Banker x1");
    }
}
