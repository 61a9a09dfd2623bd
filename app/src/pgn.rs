//! Tag-pair extraction for PGN game records.
//!
//! Only the bracketed header section matters here; movetext is carried along
//! verbatim and never interpreted, so malformed moves cannot fail a parse.

use std::collections::HashMap;

use regex::Regex;

/// Every record in a broadcast export opens with this tag.
const RECORD_START: &str = "[Event";
/// Records are separated by a blank line in front of the next `[Event` tag.
const RECORD_BOUNDARY: &str = "\n\n[Event";

lazy_static::lazy_static! {
    static ref TAG_PAIR: Regex =
        Regex::new(r#"\[(\w+)\s+"([^"]+)"\]"#).expect("tag pair pattern is valid");
}

pub type PgnHeaders = HashMap<String, String>;

/// A single game record: its tag pairs plus the full text it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct PgnRecord {
    pub headers: PgnHeaders,
    pub text: String,
}

impl PgnRecord {
    pub fn parse(text: String) -> Self {
        Self {
            headers: parse_headers(&text),
            text,
        }
    }

    pub fn tag(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Collects `[Key "Value"]` pairs from `record`. Tags with an empty value are
/// skipped, and a repeated tag keeps its last value.
pub fn parse_headers(record: &str) -> PgnHeaders {
    TAG_PAIR
        .captures_iter(record)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Splits a concatenated export into individual records.
///
/// Splitting on the boundary eats the leading `[Event` of every record but the
/// first, so it is put back on any chunk that no longer starts with it.
pub fn split_records(batch: &str) -> Vec<String> {
    let batch = batch.replace("\r\n", "\n");

    batch
        .split(RECORD_BOUNDARY)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            if chunk.starts_with(RECORD_START) {
                chunk.to_string()
            } else {
                format!("{RECORD_START}{chunk}")
            }
        })
        .collect()
}

/// `split_records` followed by header parsing of each record.
pub fn parse_batch(batch: &str) -> Vec<PgnRecord> {
    split_records(batch).into_iter().map(PgnRecord::parse).collect()
}
