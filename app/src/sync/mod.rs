//! Incremental synchronisation of broadcast tournaments, rounds and games.

mod detect;
mod pipeline;
mod source;

use std::{fmt, str::FromStr};

pub use detect::ChangeDetector;
pub use pipeline::{PassOutcome, SyncReport, Synchronizer};
pub use source::{BroadcastSource, LichessClient};

/// When a finished round's games get (re)imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPolicy {
    /// Import when the round is new or has no stored games. A round whose
    /// import died halfway keeps its partial game set forever.
    #[default]
    AtMostOnce,
    /// Track import progress on the round and retry until an import has run
    /// to the end. Already stored games are deduplicated on retry.
    UntilComplete,
}

impl FromStr for ImportPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "at-most-once" | "at_most_once" => Ok(Self::AtMostOnce),
            "until-complete" | "until_complete" => Ok(Self::UntilComplete),
            other => Err(format!("unknown game import policy `{other}`")),
        }
    }
}

impl fmt::Display for ImportPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtMostOnce => f.write_str("at-most-once"),
            Self::UntilComplete => f.write_str("until-complete"),
        }
    }
}
