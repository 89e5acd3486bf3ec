//! No-mock tests for the JSON-lines ledger store on real temp files.
//!
//! Covers:
//! - Append/read round-trips and the on-disk line format
//! - Sequence continuation across close and reopen
//! - Open-time validation: corrupt lines, blank lines, sequence regressions
//! - Strictly-after semantics of incremental reads
//! - Parent directory creation
//! - Id continuation and damage detection with two live handles on one file

use rt_common::{Error, Outcome, RoundSeq};
use rt_core::ledger::{JsonlLedger, LedgerStore};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

// ============================================================================
// Helpers
// ============================================================================

/// A handwritten valid ledger line with a fixed timestamp.
fn line(seq: u64, code: &str) -> String {
    format!(
        "{{\"seq\":{},\"recorded_at\":\"2026-01-01T00:00:00Z\",\"outcome\":\"{}\"}}",
        seq, code
    )
}

fn write_ledger(dir: &tempfile::TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("rounds.jsonl");
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// Round-trips
// ============================================================================

mod roundtrip {
    use super::*;

    #[test]
    fn append_then_read_all() {
        let dir = tempdir().unwrap();
        let store = JsonlLedger::open(dir.path().join("rounds.jsonl")).unwrap();

        assert_eq!(store.append(Outcome::Player).unwrap(), RoundSeq::new(1));
        assert_eq!(store.append(Outcome::Banker).unwrap(), RoundSeq::new(2));
        assert_eq!(store.append(Outcome::Tie).unwrap(), RoundSeq::new(3));

        let rounds = store.read_all().unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[0].outcome, Outcome::Player);
        assert_eq!(rounds[2].seq, RoundSeq::new(3));
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn lines_are_one_json_object_each() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Banker).unwrap();
        store.append(Outcome::Tie).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["seq"], 1);
        assert_eq!(first["outcome"], "B");
        assert!(first["recorded_at"].is_string());
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonlLedger::open(dir.path().join("rounds.jsonl")).unwrap();
        assert!(store.read_all().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn parent_directories_are_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Player).unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }
}

// ============================================================================
// Reopen
// ============================================================================

mod reopen {
    use super::*;

    #[test]
    fn sequence_continues_after_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");

        {
            let store = JsonlLedger::open(&path).unwrap();
            store.append(Outcome::Player).unwrap();
            store.append(Outcome::Player).unwrap();
        }

        let store = JsonlLedger::open(&path).unwrap();
        assert_eq!(store.append(Outcome::Banker).unwrap(), RoundSeq::new(3));

        let rounds = store.read_all().unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[2].outcome, Outcome::Banker);
    }

    #[test]
    fn reopen_preserves_existing_content() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(1, "P"), &line(2, "T")]);

        let store = JsonlLedger::open(&path).unwrap();
        let rounds = store.read_all().unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[1].outcome, Outcome::Tie);
        assert_eq!(store.append(Outcome::Banker).unwrap(), RoundSeq::new(3));
    }
}

// ============================================================================
// Validation on open
// ============================================================================

mod validation {
    use super::*;

    #[test]
    fn corrupt_line_is_rejected_with_its_line_number() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(1, "P"), "{not json"]);

        let err = JsonlLedger::open(&path).unwrap_err();
        match err {
            Error::LedgerCorrupted { line, .. } => assert_eq!(line, 2),
            other => panic!("expected corruption error, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_first_line_reports_line_one() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &["garbage"]);

        let err = JsonlLedger::open(&path).unwrap_err();
        assert!(matches!(err, Error::LedgerCorrupted { line: 1, .. }));
    }

    #[test]
    fn unknown_outcome_code_is_corruption() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(1, "X")]);

        let err = JsonlLedger::open(&path).unwrap_err();
        assert!(matches!(err, Error::LedgerCorrupted { line: 1, .. }));
    }

    #[test]
    fn blank_lines_are_tolerated_but_counted() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(1, "P"), "", &line(2, "B"), "   "]);

        let store = JsonlLedger::open(&path).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 2);

        // A later corruption still reports its physical line number.
        let path = write_ledger(&dir, &[&line(1, "P"), "", "oops"]);
        let err = JsonlLedger::open(&path).unwrap_err();
        assert!(matches!(err, Error::LedgerCorrupted { line: 3, .. }));
    }

    #[test]
    fn sequence_regression_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(5, "P"), &line(3, "B")]);

        let err = JsonlLedger::open(&path).unwrap_err();
        match err {
            Error::SequenceRegression { last, found } => {
                assert_eq!(last, 5);
                assert_eq!(found, 3);
            }
            other => panic!("expected sequence regression, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_sequence_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(2, "P"), &line(2, "B")]);

        let err = JsonlLedger::open(&path).unwrap_err();
        assert!(matches!(err, Error::SequenceRegression { last: 2, found: 2 }));
    }

    #[test]
    fn gaps_in_sequence_are_allowed() {
        // Strictly increasing is the contract; contiguity is not.
        let dir = tempdir().unwrap();
        let path = write_ledger(&dir, &[&line(1, "P"), &line(7, "B")]);

        let store = JsonlLedger::open(&path).unwrap();
        let rounds = store.read_all().unwrap();
        assert_eq!(rounds.len(), 2);
        assert_eq!(store.append(Outcome::Tie).unwrap(), RoundSeq::new(8));
    }
}

// ============================================================================
// Incremental reads
// ============================================================================

mod read_since {
    use super::*;

    #[test]
    fn returns_rounds_strictly_after_cursor() {
        let dir = tempdir().unwrap();
        let store = JsonlLedger::open(dir.path().join("rounds.jsonl")).unwrap();
        for outcome in [Outcome::Player, Outcome::Banker, Outcome::Tie] {
            store.append(outcome).unwrap();
        }

        let since = store.read_since(RoundSeq::new(1)).unwrap();
        assert_eq!(since.len(), 2);
        assert_eq!(since[0].seq, RoundSeq::new(2));

        assert!(store.read_since(RoundSeq::new(3)).unwrap().is_empty());
        assert_eq!(store.read_since(RoundSeq::new(0)).unwrap().len(), 3);
    }

    #[test]
    fn sees_rounds_written_before_this_handle_opened() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        {
            let store = JsonlLedger::open(&path).unwrap();
            store.append(Outcome::Player).unwrap();
        }

        let reader = JsonlLedger::open(&path).unwrap();
        assert_eq!(reader.read_since(RoundSeq::new(0)).unwrap().len(), 1);
    }
}

// ============================================================================
// Two live handles on one file
// ============================================================================

mod two_writers {
    use super::*;

    #[test]
    fn second_live_handle_extends_the_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");

        let a = JsonlLedger::open(&path).unwrap();
        assert_eq!(a.append(Outcome::Player).unwrap(), RoundSeq::new(1));

        let b = JsonlLedger::open(&path).unwrap();
        assert_eq!(b.append(Outcome::Banker).unwrap(), RoundSeq::new(2));

        // The first handle adopts the other writer's round instead of
        // reissuing id 2.
        assert_eq!(a.append(Outcome::Tie).unwrap(), RoundSeq::new(3));

        let rounds = a.read_all().unwrap();
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[2].outcome, Outcome::Tie);

        let reopened = JsonlLedger::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 3);
    }

    #[test]
    fn interleaved_handles_keep_ids_strictly_increasing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let a = JsonlLedger::open(&path).unwrap();
        let b = JsonlLedger::open(&path).unwrap();

        assert_eq!(a.append(Outcome::Player).unwrap(), RoundSeq::new(1));
        assert_eq!(b.append(Outcome::Banker).unwrap(), RoundSeq::new(2));
        assert_eq!(a.append(Outcome::Player).unwrap(), RoundSeq::new(3));
        assert_eq!(b.append(Outcome::Tie).unwrap(), RoundSeq::new(4));

        let seqs: Vec<u64> = b
            .read_all()
            .unwrap()
            .iter()
            .map(|r| r.seq.value())
            .collect();
        assert_eq!(seqs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn blank_line_growth_is_tolerated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Player).unwrap();

        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("\n\n");
        fs::write(&path, content).unwrap();

        assert_eq!(store.append(Outcome::Banker).unwrap(), RoundSeq::new(2));
        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_foreign_line_fails_the_next_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Player).unwrap();

        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("{not json\n");
        fs::write(&path, content).unwrap();

        let err = store.append(Outcome::Banker).unwrap_err();
        assert!(matches!(err, Error::LedgerCorrupted { line: 2, .. }));
    }

    #[test]
    fn truncated_file_fails_the_next_append() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Player).unwrap();
        store.append(Outcome::Banker).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let first = content.lines().next().unwrap();
        fs::write(&path, format!("{first}\n")).unwrap();

        let err = store.append(Outcome::Tie).unwrap_err();
        match err {
            Error::LedgerCorrupted { reason, .. } => assert!(reason.contains("shrank")),
            other => panic!("expected corruption error, got {other:?}"),
        }
    }

    #[test]
    fn receded_tail_after_external_rewrite_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rounds.jsonl");
        let store = JsonlLedger::open(&path).unwrap();
        store.append(Outcome::Player).unwrap();
        store.append(Outcome::Banker).unwrap();

        // Longer file whose tail id sits below what this handle assigned.
        let mut content = line(1, "P");
        content.push('\n');
        content.push_str(&"\n".repeat(200));
        fs::write(&path, content).unwrap();

        let err = store.append(Outcome::Tie).unwrap_err();
        match err {
            Error::LedgerCorrupted { reason, .. } => assert!(reason.contains("receded")),
            other => panic!("expected corruption error, got {other:?}"),
        }
    }
}
