//! Round outcome vocabulary.
//!
//! The game produces exactly three outcomes per round: Player, Banker, or
//! Tie. Everything downstream (segmentation, aggregates, alerting) is keyed
//! by this closed alphabet, so construction from untrusted text is validated
//! here and nowhere else. Unknown codes are rejected, never coerced.

use crate::error::{Error, Result};
use crate::id::RoundSeq;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single round outcome.
///
/// Declaration order is the canonical display order; every keyed aggregate
/// iterates in this order so rendered output is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Player win, wire code `P`.
    #[serde(rename = "P")]
    Player,
    /// Banker win, wire code `B`.
    #[serde(rename = "B")]
    Banker,
    /// Tie, wire code `T`.
    #[serde(rename = "T")]
    Tie,
}

impl Outcome {
    /// All outcomes in canonical order.
    pub fn all() -> &'static [Outcome] {
        &[Outcome::Player, Outcome::Banker, Outcome::Tie]
    }

    /// One-letter wire code used in the ledger and in compact summaries.
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::Player => "P",
            Outcome::Banker => "B",
            Outcome::Tie => "T",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Player => "Player",
            Outcome::Banker => "Banker",
            Outcome::Tie => "Tie",
        }
    }

    /// Parse a wire code or full name, case-insensitively.
    ///
    /// This is the validation boundary: any text that is not one of the
    /// three known outcomes is an [`Error::InvalidOutcome`].
    pub fn parse(text: &str) -> Result<Outcome> {
        match text.trim().to_ascii_lowercase().as_str() {
            "p" | "player" => Ok(Outcome::Player),
            "b" | "banker" => Ok(Outcome::Banker),
            "t" | "tie" => Ok(Outcome::Tie),
            _ => Err(Error::InvalidOutcome {
                code: text.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Outcome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Outcome::parse(s)
    }
}

/// One entry of the append-only ledger.
///
/// The sequence id is assigned by the store at append time and is strictly
/// increasing; the timestamp is informational and carries no ordering
/// guarantees of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// Store-assigned sequence id, starting at 1.
    pub seq: RoundSeq,
    /// Wall-clock time the append was accepted.
    pub recorded_at: DateTime<Utc>,
    /// The validated outcome.
    pub outcome: Outcome,
}

impl Round {
    /// Build a round with the current wall-clock time.
    pub fn new(seq: RoundSeq, outcome: Outcome) -> Self {
        Round {
            seq,
            recorded_at: Utc::now(),
            outcome,
        }
    }
}
