// src/specs/locate.rs
//! Table location as an ordered list of strategies.
//!
//! Markup differs between page generations, so no single selector is enough.
//! Each [`Locator`] is one way of finding a table; a chain of them is tried in
//! priority order and the first hit wins. Within one strategy, the first match
//! in document order wins.

use std::fmt;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::core::html::{self, class_contains, row_cells, table_rows, text_of};
use crate::normalize::ColumnMap;
use crate::specs::rows::split_header;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Locator {
    /// CSS selector (id or class). Only `table` elements count.
    Css(&'static str),
    /// Any `table` whose class attribute contains the fragment, case-insensitive.
    ClassContains(&'static str),
    /// Any `table` with more than N direct rows.
    MinRows(usize),
    /// Any `table` whose direct rows are mostly two-cell label/value pairs.
    LabelValueRows,
    /// Any `table` whose header row names at least N known bout fields.
    KnownHeaders(usize),
    /// Any `table` with a two-cell row whose first cell ends in `:`.
    LabelRow,
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(css) => write!(f, "css `{css}`"),
            Locator::ClassContains(frag) => write!(f, "class contains `{frag}`"),
            Locator::MinRows(n) => write!(f, "table with more than {n} rows"),
            Locator::LabelValueRows => f.write_str("label/value table"),
            Locator::KnownHeaders(n) => write!(f, "table naming {n}+ bout columns"),
            Locator::LabelRow => f.write_str("table with a `label:` row"),
        }
    }
}

/// Bout-history table, most specific first. Shape heuristics come last.
pub fn bout_chain(heuristic_min_rows: usize) -> Vec<Locator> {
    vec![
        Locator::Css("#ratingsDataTable"),
        Locator::Css("table.careerTable"),
        Locator::Css("#careerTable"),
        Locator::Css("table.dataTable"),
        Locator::ClassContains("career"),
        Locator::ClassContains("datatable"),
        Locator::MinRows(heuristic_min_rows),
        Locator::KnownHeaders(2),
    ]
}

/// Profile/info table.
pub fn profile_chain() -> Vec<Locator> {
    vec![
        Locator::Css("table.profileTable"),
        Locator::ClassContains("profile"),
        Locator::LabelValueRows,
        Locator::LabelRow,
    ]
}

impl Locator {
    /// First table this strategy accepts, in document order, skipping `exclude`.
    pub fn locate<'a>(
        &self,
        doc: &'a Html,
        exclude: Option<ElementRef<'a>>,
    ) -> Option<ElementRef<'a>> {
        let css = match self {
            Locator::Css(css) => *css,
            _ => "table",
        };
        let sel = html::selector(css)?;
        doc.select(&sel)
            .filter(|el| el.value().name().eq_ignore_ascii_case("table"))
            .filter(|el| Some(*el) != exclude)
            .find(|el| self.accepts(*el))
    }

    fn accepts(&self, table: ElementRef<'_>) -> bool {
        match self {
            Locator::Css(_) => true,
            Locator::ClassContains(frag) => class_contains(table, frag),
            Locator::MinRows(n) => table_rows(table).len() > *n,
            Locator::LabelValueRows => {
                let rows = table_rows(table);
                let pairs = rows.iter().filter(|r| row_cells(**r).len() == 2).count();
                pairs >= 2 && pairs * 2 >= rows.len()
            }
            Locator::KnownHeaders(n) => {
                ColumnMap::from_headers(&split_header(table).headers).known_fields() >= *n
            }
            Locator::LabelRow => table_rows(table).into_iter().any(|r| {
                let cells = row_cells(r);
                cells.len() == 2 && {
                    let label = text_of(cells[0]);
                    label.trim_end().ends_with(':') && !text_of(cells[1]).trim().is_empty()
                }
            }),
        }
    }
}

/// Try each strategy in order; first hit wins.
pub fn locate_first<'a>(
    doc: &'a Html,
    chain: &[Locator],
    exclude: Option<ElementRef<'a>>,
) -> Option<ElementRef<'a>> {
    for loc in chain {
        if let Some(el) = loc.locate(doc, exclude) {
            debug!("table located by {loc}");
            return Some(el);
        }
    }
    None
}
