//! Payloads returned by the upstream broadcast API.
//!
//! Timestamps arrive as milliseconds since the epoch and field names are
//! camelCase. Anything not listed here is ignored on decode.

use chrono::{DateTime, Utc};
use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ActiveBroadcasts {
    #[serde(default)]
    pub active: Vec<BroadcastEntry>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct BroadcastEntry {
    pub tour: BroadcastTour,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastTour {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub info: Option<Value>,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub url: String,
    #[serde(default)]
    pub tier: Option<i32>,
    /// Free-form; usually a one or two element array of timestamps.
    #[serde(default)]
    pub dates: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct TournamentDetail {
    pub tour: BroadcastTour,
    #[serde(default)]
    pub rounds: Vec<BroadcastRound>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastRound {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(with = "ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "ts_milliseconds_option")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default, with = "ts_milliseconds_option")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Omitted by the upstream until the round is over.
    #[serde(default)]
    pub finished: bool,
    pub url: String,
}
