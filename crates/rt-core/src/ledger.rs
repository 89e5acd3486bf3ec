//! Ledger stores: the append-only source of truth.
//!
//! A store assigns strictly increasing sequence ids starting at 1 and
//! returns history in append order. Inputs are typed outcomes; text
//! validation happens at the parse boundary, so a store never sees an
//! invalid symbol and never rejects one.
//!
//! Two implementations: an in-memory store for tests and embedded use, and
//! an append-only JSON-lines file, one serialized round per line.

use rt_common::{Error, Outcome, Result, Round, RoundSeq};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only store of validated rounds.
pub trait LedgerStore: Send + Sync {
    /// Append one outcome; returns the assigned sequence id.
    fn append(&self, outcome: Outcome) -> Result<RoundSeq>;

    /// Full history in append order. An empty ledger is an empty vec.
    fn read_all(&self) -> Result<Vec<Round>>;

    /// Rounds with sequence ids strictly after `seq`, in append order.
    fn read_since(&self, seq: RoundSeq) -> Result<Vec<Round>>;

    /// Number of rounds in the ledger.
    fn len(&self) -> Result<u64>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// In-memory store behind a mutex; the test seam and embedded default.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    rounds: Mutex<Vec<Round>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        MemoryLedger::default()
    }

    /// Pre-seeded store; sequence ids are assigned 1..=n in input order.
    pub fn with_history(outcomes: &[Outcome]) -> Self {
        let rounds = outcomes
            .iter()
            .enumerate()
            .map(|(i, &outcome)| Round::new(RoundSeq::new(i as u64 + 1), outcome))
            .collect();
        MemoryLedger {
            rounds: Mutex::new(rounds),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Round>>> {
        self.rounds
            .lock()
            .map_err(|_| Error::Internal("ledger lock poisoned".to_string()))
    }
}

impl LedgerStore for MemoryLedger {
    fn append(&self, outcome: Outcome) -> Result<RoundSeq> {
        let mut rounds = self.lock()?;
        let seq = rounds.last().map_or(RoundSeq::FIRST, |r| r.seq.next());
        rounds.push(Round::new(seq, outcome));
        Ok(seq)
    }

    fn read_all(&self) -> Result<Vec<Round>> {
        Ok(self.lock()?.clone())
    }

    fn read_since(&self, seq: RoundSeq) -> Result<Vec<Round>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|r| r.seq > seq)
            .copied()
            .collect())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.lock()?.len() as u64)
    }
}

// ============================================================================
// JSON-lines store
// ============================================================================

/// Append-only JSON-lines file store.
///
/// Open validates the whole file: every non-blank line must parse as a
/// round and sequence ids must strictly increase. Appends serialize one
/// line, flush it, and return the assigned id. Reads go back to the file,
/// so rounds appended by another process are visible.
///
/// Before assigning an id, an append compares the file length against the
/// bytes this handle has accounted for. Growth is re-validated and the
/// numbering continues after the new tail, so a second live handle extends
/// the sequence instead of reissuing ids. A file that shrank, or whose tail
/// receded below an id this handle already assigned, fails the append with
/// a corruption error. Appends landing at the same instant from two handles
/// are not arbitrated.
#[derive(Debug)]
pub struct JsonlLedger {
    path: PathBuf,
    inner: Mutex<WriterState>,
}

#[derive(Debug)]
struct WriterState {
    writer: BufWriter<File>,
    last_seq: Option<RoundSeq>,
    /// File length in bytes as of the last scan or append by this handle.
    end_offset: u64,
    /// Physical line count matching `end_offset`, blanks included.
    lines: usize,
}

impl JsonlLedger {
    /// Open or create the ledger file, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Length is taken before the scan so a foreign append racing the
        // open can only leave the cached offset short, which the next
        // append reconciles with a re-scan.
        let (last_seq, end_offset, lines) = if path.exists() {
            let file_len = std::fs::metadata(&path)?.len();
            let scan = scan_rounds(&path)?;
            (scan.rounds.last().map(|r| r.seq), file_len, scan.lines)
        } else {
            (None, 0, 0)
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(JsonlLedger {
            path,
            inner: Mutex::new(WriterState {
                writer: BufWriter::new(file),
                last_seq,
                end_offset,
                lines,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, WriterState>> {
        self.inner
            .lock()
            .map_err(|_| Error::Internal("ledger lock poisoned".to_string()))
    }

    /// Bring the cached writer state up to date with the file on disk.
    ///
    /// A grown file is re-validated in full and its tail adopted as the
    /// numbering base. A shrunken file, or a tail below an id this handle
    /// already assigned, is corruption.
    fn reconcile(&self, inner: &mut WriterState) -> Result<()> {
        let file_len = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if file_len == inner.end_offset {
            return Ok(());
        }
        if file_len < inner.end_offset {
            return Err(Error::LedgerCorrupted {
                path: self.path.display().to_string(),
                line: inner.lines,
                reason: format!(
                    "file shrank from {} to {} bytes behind a live writer",
                    inner.end_offset, file_len
                ),
            });
        }

        let scan = scan_rounds(&self.path)?;
        let tail = scan.rounds.last().map(|r| r.seq);
        if let Some(assigned) = inner.last_seq {
            if tail.map_or(true, |t| t < assigned) {
                return Err(Error::LedgerCorrupted {
                    path: self.path.display().to_string(),
                    line: scan.lines,
                    reason: format!(
                        "tail sequence {} receded below {} assigned by this handle",
                        tail.map_or(0, |t| t.value()),
                        assigned.value()
                    ),
                });
            }
        }
        if let Some(t) = tail {
            inner.last_seq = Some(t);
        }
        inner.end_offset = file_len;
        inner.lines = scan.lines;
        Ok(())
    }
}

impl LedgerStore for JsonlLedger {
    fn append(&self, outcome: Outcome) -> Result<RoundSeq> {
        let mut inner = self.lock()?;
        self.reconcile(&mut inner)?;
        let seq = inner.last_seq.map_or(RoundSeq::FIRST, |s| s.next());
        let round = Round::new(seq, outcome);
        let line = serde_json::to_string(&round)?;
        writeln!(inner.writer, "{}", line)?;
        inner.writer.flush()?;
        inner.last_seq = Some(seq);
        inner.end_offset += line.len() as u64 + 1;
        inner.lines += 1;
        Ok(seq)
    }

    fn read_all(&self) -> Result<Vec<Round>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Ok(scan_rounds(&self.path)?.rounds)
    }

    fn read_since(&self, seq: RoundSeq) -> Result<Vec<Round>> {
        Ok(self
            .read_all()?
            .into_iter()
            .filter(|r| r.seq > seq)
            .collect())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.read_all()?.len() as u64)
    }
}

/// Full validation pass over a ledger file.
struct FileScan {
    rounds: Vec<Round>,
    /// Physical lines read, blanks included.
    lines: usize,
}

/// Parse every line of a ledger file, enforcing sequence monotonicity.
///
/// Blank lines are tolerated; a malformed line is a corruption error naming
/// the 1-based line number.
fn scan_rounds(path: &Path) -> Result<FileScan> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rounds: Vec<Round> = Vec::new();
    let mut lines = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        lines = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let round: Round = serde_json::from_str(&line).map_err(|e| Error::LedgerCorrupted {
            path: path.display().to_string(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        if let Some(prev) = rounds.last() {
            if round.seq <= prev.seq {
                return Err(Error::SequenceRegression {
                    last: prev.seq.value(),
                    found: round.seq.value(),
                });
            }
        }
        rounds.push(round);
    }

    Ok(FileScan { rounds, lines })
}
