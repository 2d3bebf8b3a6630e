// src/specs/boxer.rs
//! Boxer profile page → [`Extraction`].
//!
//! Order matters: the profile table is located and read first. Its career span
//! feeds the century policy, and the table itself is excluded from the bout-table
//! search so the row-count heuristic never mistakes it for the fight list.
//!
//! The two tables are independent. One missing is recorded in
//! `Extraction::missing`; both missing is [`ExtractError::NoTables`].

use scraper::Html;
use tracing::debug;

use crate::config::options::ExtractOptions;
use crate::core::html::is_blank;
use crate::data::Extraction;
use crate::error::{ExtractError, TableKind, TableNotFound};
use crate::normalize::Normalizer;
use crate::specs::locate::{bout_chain, locate_first, profile_chain};
use crate::specs::{profile, rows};

/// Parse raw text, then extract. Whitespace-only input is `EmptyDocument`.
pub fn parse_str(html: &str, opts: &ExtractOptions) -> Result<Extraction, ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    parse_doc(&Html::parse_document(html), opts)
}

pub fn parse_doc(doc: &Html, opts: &ExtractOptions) -> Result<Extraction, ExtractError> {
    if is_blank(doc) {
        return Err(ExtractError::EmptyDocument);
    }

    let mut missing = Vec::new();

    let profile_table = locate_first(doc, &profile_chain(), None);
    if profile_table.is_none() {
        debug!("{}", TableNotFound(TableKind::Profile));
        missing.push(TableKind::Profile);
    }
    let profile = profile::extract(doc, profile_table);

    let normalizer = Normalizer::new(opts.century).with_career(profile.career_span());

    let bout_table = locate_first(doc, &bout_chain(opts.heuristic_min_rows), profile_table);
    let (layout, bouts) = match bout_table {
        Some(table) => {
            let read = rows::read_bouts(table, opts.layout, &normalizer);
            (Some(read.layout), read.bouts)
        }
        None => {
            debug!("{}", TableNotFound(TableKind::Bouts));
            missing.push(TableKind::Bouts);
            (None, Vec::new())
        }
    };

    if profile_table.is_none() && bout_table.is_none() {
        return Err(ExtractError::NoTables);
    }

    debug!(
        "extracted '{}': {} bouts, {} attributes",
        profile.name(),
        bouts.len(),
        profile.attributes().len()
    );
    Ok(Extraction { profile, bouts, layout, missing })
}
