//! Fuzz target replaying arbitrary outcome sequences through the
//! incremental aggregate fold and the alert evaluator.
//!
//! Checks the structural invariants that must hold for every history:
//! the incremental path equals the batch path, and evaluation never
//! panics or double-fires.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rt_common::{Outcome, Round, RoundSeq};
use rt_core::aggregate::AggregateSnapshot;
use rt_core::alert::{AlertEvaluator, AlertState};

#[derive(Debug, Arbitrary)]
struct Replay {
    threshold: u8,
    codes: Vec<u8>,
}

fuzz_target!(|replay: Replay| {
    let threshold = u32::from(replay.threshold % 8) + 1;
    let rounds: Vec<Round> = replay
        .codes
        .iter()
        .take(256)
        .enumerate()
        .map(|(i, code)| {
            let outcome = match code % 3 {
                0 => Outcome::Player,
                1 => Outcome::Banker,
                _ => Outcome::Tie,
            };
            Round::new(RoundSeq::new(i as u64 + 1), outcome)
        })
        .collect();

    let evaluator = AlertEvaluator::new(threshold);
    let mut state = AlertState::default();
    let mut snap = AggregateSnapshot::default();
    for round in &rounds {
        snap = snap.apply_append(round.seq, round.outcome);
        let eval = evaluator.evaluate(&state, &snap);
        if let Some(alert) = eval.fired {
            assert!(
                !state.has_fired(alert.outcome, alert.start_seq),
                "run fired twice"
            );
        }
        state = eval.state;
    }

    assert_eq!(snap, AggregateSnapshot::compute(&rounds));
});
