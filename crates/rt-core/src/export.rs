//! Ledger and snapshot export.
//!
//! CSV for the round history and flat key/value rows for the snapshot.
//! Fields are sequence numbers, RFC 3339 timestamps, and one-letter outcome
//! codes; none can contain a comma or quote, so no quoting is needed.

use crate::aggregate::AggregateSnapshot;
use chrono::SecondsFormat;
use rt_common::Round;
use std::fmt::Write as _;

/// Render the full ledger as CSV, header row first.
pub fn ledger_csv(rounds: &[Round]) -> String {
    let mut out = String::from("seq,recorded_at,outcome\n");
    for round in rounds {
        let _ = writeln!(
            out,
            "{},{},{}",
            round.seq,
            round.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            round.outcome.code()
        );
    }
    out
}

/// Flat key/value rows of a snapshot in stable order.
///
/// Row order: `total`, then per-symbol `count` / `max_run` / `avg_run` in
/// canonical symbol order, then the tail, if any.
pub fn snapshot_rows(snapshot: &AggregateSnapshot) -> Vec<(String, String)> {
    let mut rows = vec![("total".to_string(), snapshot.total.to_string())];
    for (&outcome, stats) in &snapshot.per_outcome {
        let code = outcome.code().to_ascii_lowercase();
        rows.push((format!("{code}_count"), stats.count.to_string()));
        rows.push((format!("{code}_max_run"), stats.max_run.to_string()));
        if let Some(avg) = snapshot.avg_run(outcome) {
            rows.push((format!("{code}_avg_run"), format!("{avg:.2}")));
        }
    }
    if let Some(tail) = snapshot.tail {
        rows.push(("tail_outcome".to_string(), tail.outcome.code().to_string()));
        rows.push(("tail_length".to_string(), tail.length.to_string()));
    }
    rows
}
