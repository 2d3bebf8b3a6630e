// src/specs/profile.rs
//! Profile summary: the boxer's name and the label/value info table.
//!
//! - Name: first `h1` (whitespace-normalized). Missing → `"unknown"`.
//! - Attributes: every direct row of the profile table with exactly two cells.
//!   Label text becomes the key (normalized in `ProfileSummary::new`).
//! - Record: a text node that is nothing but `W-L-D` (`"52-9-5"`) fills the
//!   `record` attribute when the table didn't provide one. The profile table is
//!   searched first, then text outside any table.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::core::html::{first_in_doc, row_cells, table_rows, text_of};
use crate::data::ProfileSummary;

static RECORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-\d+-\d+$").expect("static record pattern"));

const RECORD_KEY: &str = "record";

pub fn extract(doc: &Html, table: Option<ElementRef<'_>>) -> ProfileSummary {
    let name = first_in_doc(doc, "h1").map(text_of);

    let mut pairs: Vec<(String, String)> = table
        .map(|t| {
            table_rows(t)
                .into_iter()
                .map(row_cells)
                .filter(|cells| cells.len() == 2)
                .map(|cells| (text_of(cells[0]), text_of(cells[1])))
                .collect()
        })
        .unwrap_or_default();

    let has_record = pairs.iter().any(|(k, _)| k.trim().eq_ignore_ascii_case(RECORD_KEY));
    if !has_record {
        if let Some(rec) = bare_record(doc, table) {
            pairs.push((s!(RECORD_KEY), rec));
        }
    }

    ProfileSummary::new(name, pairs)
}

fn bare_record(doc: &Html, table: Option<ElementRef<'_>>) -> Option<String> {
    if let Some(hit) = table.and_then(|t| t.text().map(str::trim).find(|t| RECORD_RE.is_match(t))) {
        return Some(s!(hit));
    }
    doc.root_element()
        .descendants()
        .filter(|n| {
            !n.ancestors().any(|a| {
                a.value().as_element().is_some_and(|e| e.name().eq_ignore_ascii_case("table"))
            })
        })
        .filter_map(|n| n.value().as_text())
        .map(|t| t.trim())
        .find(|t| RECORD_RE.is_match(t))
        .map(String::from)
}
