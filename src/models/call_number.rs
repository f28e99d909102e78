//! AWM call-number terms and input normalization

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AppError, AppResult};

/// Shelf prefix shared by every call number of the collection
pub const CALL_NUMBER_PREFIX: &str = "AWM";

fn anchored(body: &str) -> Regex {
    Regex::new(&format!("^{} {}$", CALL_NUMBER_PREFIX, body)).unwrap()
}

// ASCII digits only: `\d` would admit other Unicode digits the bounds can't parse
static SINGLE: Lazy<Regex> = Lazy::new(|| anchored(r"[A-Z]+ [0-9]{1,5}"));
static RANGE: Lazy<Regex> = Lazy::new(|| anchored(r"[A-Z]+ [0-9]{1,5}-[0-9]{1,5}"));
static COLLECTION: Lazy<Regex> = Lazy::new(|| anchored(r"SPEC COLL [0-9]{1,5}"));
static COLLECTION_RANGE: Lazy<Regex> =
    Lazy::new(|| anchored(r"SPEC COLL [0-9]{1,5}-[0-9]{1,5}"));

/// Splits a range entry into its base and bounds: `AWM SPEC COLL 98-99`
static RANGE_PARTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        "^({}(?: [A-Z]+)*?) ([0-9]+)-([0-9]+)$",
        CALL_NUMBER_PREFIX
    ))
    .unwrap()
});

/// Syntactic shape of one comma-separated entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallNumberPattern {
    Single,
    Range,
    Collection,
    CollectionRange,
}

impl CallNumberPattern {
    /// Classify an already upper-cased, trimmed entry
    pub fn classify(entry: &str) -> Option<Self> {
        // Collection forms first: "AWM SPEC COLL 98" never fits the single form
        if COLLECTION.is_match(entry) {
            Some(Self::Collection)
        } else if COLLECTION_RANGE.is_match(entry) {
            Some(Self::CollectionRange)
        } else if SINGLE.is_match(entry) {
            Some(Self::Single)
        } else if RANGE.is_match(entry) {
            Some(Self::Range)
        } else {
            None
        }
    }
}

/// A single, validated call number such as `AWM LP 2078` or `AWM SPEC COLL 98`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallNumberTerm(String);

impl CallNumberTerm {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased whitespace tokens, as used by the record matcher
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }
}

impl fmt::Display for CallNumberTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CallNumberTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse free-text call-number input into expanded terms.
///
/// Accepts comma-separated entries, each a single call number, a numeric
/// range (`-` or `–`), or a `SPEC COLL` collection number or range. The batch
/// is rejected as a whole if any entry is malformed.
pub fn normalize(raw: &str) -> AppResult<Vec<CallNumberTerm>> {
    let cleaned = raw.trim().replace('–', "-").to_uppercase();
    let entries: Vec<&str> = cleaned.split(',').map(str::trim).collect();

    let invalid: Vec<&str> = entries
        .iter()
        .copied()
        .filter(|entry| CallNumberPattern::classify(entry).is_none())
        .collect();
    if !invalid.is_empty() {
        return Err(AppError::InvalidSyntax(format!(
            "unrecognized call number(s): {}",
            invalid
                .iter()
                .map(|e| format!("'{}'", e))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let mut terms = Vec::new();
    for entry in entries {
        let expanded = expand_call_range(entry)?;
        if expanded.is_empty() {
            tracing::debug!("Range '{}' is descending, no terms produced", entry);
        }
        terms.extend(expanded);
    }
    Ok(terms)
}

/// Expand `AWM LP 1900-1902` into `AWM LP 1900`, `AWM LP 1901`, `AWM LP 1902`.
///
/// Entries that are not ranges come back unchanged. A descending range yields
/// nothing; bounds that don't fit a `u32` are rejected.
pub fn expand_call_range(entry: &str) -> AppResult<Vec<CallNumberTerm>> {
    let Some(caps) = RANGE_PARTS.captures(entry) else {
        return Ok(vec![CallNumberTerm(entry.to_string())]);
    };

    let base = &caps[1];
    let (Ok(start), Ok(end)) = (caps[2].parse::<u32>(), caps[3].parse::<u32>()) else {
        return Err(AppError::InvalidSyntax(format!(
            "range bounds out of reach: '{}'",
            entry
        )));
    };

    Ok((start..=end)
        .map(|number| CallNumberTerm(format!("{} {}", base, number)))
        .collect())
}
