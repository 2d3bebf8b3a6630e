// src/data.rs
//
// Value types produced by one extraction call.
//
// - ProfileSummary: name + normalized key/value attributes from the profile table.
// - BoutRecord:     one row of fight history, already normalized.
// - Extraction:     both of the above plus what the locator could not find.
//
// All of them are plain values: built fresh per call, no shared state, compared
// structurally, safe to hand across threads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::consts::{MISSING_OPPONENT, UNKNOWN_NAME};
use crate::core::sanitize::{first_digits, normalize_key, normalize_ws};
use crate::error::TableKind;
use crate::normalize::{self, MethodKind};
use crate::specs::rows::LayoutGen;

static SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})\D+(\d{4})").expect("static career-span pattern"));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    #[default]
    Unknown,
}

impl Outcome {
    /// Total and case-insensitive: every input maps to exactly one variant.
    pub fn parse(text: &str) -> Outcome {
        normalize::outcome_of(text)
    }

    /// Single-letter code used in exports; `Unknown` exports blank.
    pub fn code(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Draw => "D",
            Outcome::Unknown => "",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Win => "Win",
            Outcome::Loss => "Loss",
            Outcome::Draw => "Draw",
            Outcome::Unknown => "Unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    name: String,
    attributes: BTreeMap<String, String>,
}

impl ProfileSummary {
    /// Keys are normalized on the way in; empty keys are dropped; later duplicates win.
    pub fn new<I, K, V>(name: Option<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let name = name
            .map(|n| normalize_ws(&n))
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| s!(UNKNOWN_NAME));

        let mut attributes = BTreeMap::new();
        for (k, v) in pairs {
            let key = normalize_key(k.as_ref());
            if key.is_empty() { continue; }
            attributes.insert(key, normalize_ws(v.as_ref()));
        }
        Self { name, attributes }
    }

    /// Profile with the sentinel name and no attributes.
    pub fn unknown() -> Self {
        Self::new(None, Vec::<(String, String)>::new())
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn attributes(&self) -> &BTreeMap<String, String> { &self.attributes }
    pub fn is_unknown(&self) -> bool { self.name == UNKNOWN_NAME }

    /// Lookup with the same key normalization as construction (`"Nationality:"` works).
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(&normalize_key(key)).map(String::as_str)
    }

    /// First digit run of an attribute (`"bouts"` → `Some(66)`).
    pub fn count(&self, key: &str) -> Option<u32> {
        self.attribute(key).and_then(first_digits)
    }

    /// `(first, last)` year of the `career` attribute, e.g. `"1945-1958"`.
    pub fn career_span(&self) -> Option<(i32, i32)> {
        let caps = SPAN_RE.captures(self.attribute("career")?)?;
        let a: i32 = caps[1].parse().ok()?;
        let b: i32 = caps[2].parse().ok()?;
        Some((a.min(b), a.max(b)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoutRecord {
    pub raw_date: String,
    pub parsed_date: Option<NaiveDate>,
    pub opponent: String,
    pub opponent_record: Option<String>,
    pub location: Option<String>,
    pub outcome: Outcome,
    pub method: Option<String>,
    pub rounds: Option<u32>,
}

impl BoutRecord {
    /// Row-retention check: something besides the date must carry information.
    /// The opponent sentinel and `Unknown` count as empty; `parsed_date` is derived, so it doesn't count.
    pub fn has_content(&self) -> bool {
        (!self.opponent.is_empty() && self.opponent != MISSING_OPPONENT)
            || self.opponent_record.is_some()
            || self.location.is_some()
            || self.outcome != Outcome::Unknown
            || self.method.is_some()
            || self.rounds.is_some()
    }

    pub fn method_kind(&self) -> MethodKind {
        self.method.as_deref().map(MethodKind::of).unwrap_or_default()
    }

    pub fn year(&self) -> Option<i32> {
        self.parsed_date.map(|d| d.year())
    }
}

/// Output of one extraction call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub profile: ProfileSummary,
    pub bouts: Vec<BoutRecord>,
    /// Layout generation the bout rows were read with (None when the bout table is missing).
    pub layout: Option<LayoutGen>,
    /// Tables no locator strategy could find. Soft; the other table is still returned.
    pub missing: Vec<TableKind>,
}
