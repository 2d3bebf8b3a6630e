// src/specs/rows.rs
//! Row extraction from a located bout-history table.
//!
//! Three generations of the career table are in the wild:
//!
//! | generation | min cells per row | column mapping                           |
//! |------------|-------------------|------------------------------------------|
//! | `Legacy`   | 3                 | header names, or a fixed default order   |
//! | `Ratings`  | 7                 | header names                             |
//! | `Modern`   | 9                 | fixed positions, nested elements only    |
//!
//! The generation is detected from the header width. When that gives nothing
//! usable, every generation is tried and the one producing the most records wins.
//!
//! Non-data rows (header rows, rows with a marker class such as `SR`/`ad`/`spacer`,
//! rows narrower than the generation's minimum) are dropped here; rows with cells
//! but no content are dropped later by the normalizer.

use std::str::FromStr;

use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::consts::{LEGACY_MIN_HEADERS, MARKER_CLASSES};
use crate::core::html::{first_in, has_class, in_thead, row_cells, spaced_text_of, table_rows, text_of};
use crate::data::BoutRecord;
use crate::normalize::{ColumnMap, Field, Normalizer, RawRow};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutGen {
    Legacy,
    Ratings,
    Modern,
}

const LEGACY_ORDER: [Field; 6] = [
    Field::Date,
    Field::Opponent,
    Field::Result,
    Field::Rounds,
    Field::Location,
    Field::Method,
];

const MODERN_POSITIONS: [Field; 9] = [
    Field::Date,
    Field::Ignore, // weight / rating icon
    Field::Opponent,
    Field::OpponentRecord,
    Field::Ignore, // last 6
    Field::Location,
    Field::Result,
    Field::Method,
    Field::Rounds,
];

impl LayoutGen {
    /// Most specific first; probing relies on this order for ties.
    pub const ALL: [LayoutGen; 3] = [LayoutGen::Modern, LayoutGen::Ratings, LayoutGen::Legacy];

    pub fn min_columns(self) -> usize {
        match self {
            LayoutGen::Legacy => 3,
            LayoutGen::Ratings => 7,
            LayoutGen::Modern => 9,
        }
    }

    /// Generation implied by the number of header cells. `None` without a header.
    pub fn detect(header_count: usize) -> Option<LayoutGen> {
        match header_count {
            0 => None,
            1..=6 => Some(LayoutGen::Legacy),
            7 | 8 => Some(LayoutGen::Ratings),
            _ => Some(LayoutGen::Modern),
        }
    }

    /// Column mapping for this generation given the (possibly empty) header texts.
    pub fn column_map(self, headers: &[String]) -> ColumnMap {
        match self {
            LayoutGen::Modern => ColumnMap::new(MODERN_POSITIONS.to_vec()),
            LayoutGen::Legacy if headers.len() < LEGACY_MIN_HEADERS => {
                ColumnMap::new(LEGACY_ORDER.to_vec())
            }
            LayoutGen::Ratings if headers.is_empty() => ColumnMap::new(LEGACY_ORDER.to_vec()),
            _ => ColumnMap::from_headers(headers),
        }
    }

    /// Modern rows are read from their nested elements only.
    fn strict(self) -> bool {
        self == LayoutGen::Modern
    }

    pub fn label(self) -> &'static str {
        match self {
            LayoutGen::Legacy => "legacy",
            LayoutGen::Ratings => "ratings",
            LayoutGen::Modern => "modern",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutHint {
    #[default]
    Auto,
    Legacy,
    Ratings,
    Modern,
}

impl LayoutHint {
    fn forced(self) -> Option<LayoutGen> {
        match self {
            LayoutHint::Auto => None,
            LayoutHint::Legacy => Some(LayoutGen::Legacy),
            LayoutHint::Ratings => Some(LayoutGen::Ratings),
            LayoutHint::Modern => Some(LayoutGen::Modern),
        }
    }
}

impl FromStr for LayoutHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(LayoutHint::Auto),
            "legacy" => Ok(LayoutHint::Legacy),
            "ratings" => Ok(LayoutHint::Ratings),
            "modern" => Ok(LayoutHint::Modern),
            other => Err(format!("unknown layout: {other} (auto|legacy|ratings|modern)")),
        }
    }
}

/// A table's header texts and its candidate data rows.
pub struct HeaderSplit<'a> {
    pub headers: Vec<String>,
    pub data: Vec<ElementRef<'a>>,
}

/// Header row: the last `thead` row; else the first row if it has a `th`;
/// else the first row if at least two of its cells name known fields.
pub fn split_header(table: ElementRef<'_>) -> HeaderSplit<'_> {
    let rows = table_rows(table);

    let first_is_header = |row: &ElementRef<'_>| {
        let cells = row_cells(*row);
        cells.iter().any(|c| c.value().name().eq_ignore_ascii_case("th"))
            || cells
                .iter()
                .filter(|c| Field::from_header(&text_of(**c)) != Field::Ignore)
                .count()
                >= 2
    };

    let header_idx = rows
        .iter()
        .rposition(|r| in_thead(*r))
        .or_else(|| rows.first().filter(|r| first_is_header(*r)).map(|_| 0));

    let headers = header_idx
        .map(|i| row_cells(rows[i]).into_iter().map(text_of).collect())
        .unwrap_or_default();

    let data = rows
        .into_iter()
        .enumerate()
        .filter(|(i, r)| Some(*i) != header_idx && !in_thead(*r))
        .map(|(_, r)| r)
        .collect();

    HeaderSplit { headers, data }
}

fn has_marker(row: ElementRef<'_>) -> bool {
    MARKER_CLASSES.iter().any(|m| has_class(row, m))
}

fn read_cell(cell: ElementRef<'_>, field: Field, strict: bool) -> String {
    let nested = match field {
        Field::Opponent => first_in(cell, "a.personLink")
            .or_else(|| first_in(cell, "a"))
            .map(spaced_text_of),
        Field::Result => first_in(cell, ".boutResult")
            .or_else(|| first_in(cell, "div"))
            .map(text_of),
        _ => return text_of(cell),
    };
    match nested {
        Some(text) => text,
        None if strict => s!(),
        None => text_of(cell),
    }
}

/// Raw cell tuples for one generation, plus the column map to read them with.
pub fn extract_rows(split: &HeaderSplit<'_>, layout: LayoutGen) -> (ColumnMap, Vec<RawRow>) {
    let map = layout.column_map(&split.headers);
    let mut out = Vec::with_capacity(split.data.len());

    for row in &split.data {
        if has_marker(*row) {
            trace!("skipping marker row");
            continue;
        }
        let cells = row_cells(*row);
        if cells.len() < layout.min_columns() {
            trace!("skipping row with {} cells (< {})", cells.len(), layout.min_columns());
            continue;
        }
        let texts = cells
            .into_iter()
            .enumerate()
            .map(|(i, c)| read_cell(c, map.field(i), layout.strict()))
            .collect();
        out.push(RawRow(texts));
    }
    (map, out)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoutTable {
    pub layout: LayoutGen,
    pub bouts: Vec<BoutRecord>,
}

/// Rows → records. Uses the hinted generation when one is forced, the detected one
/// when it produces anything, and otherwise probes every generation.
pub fn read_bouts(table: ElementRef<'_>, hint: LayoutHint, normalizer: &Normalizer) -> BoutTable {
    let split = split_header(table);
    let records = |layout: LayoutGen| -> Vec<BoutRecord> {
        let (map, rows) = extract_rows(&split, layout);
        rows.iter().filter_map(|r| normalizer.record(r, &map)).collect()
    };

    if let Some(layout) = hint.forced() {
        return BoutTable { layout, bouts: records(layout) };
    }

    if let Some(layout) = LayoutGen::detect(split.headers.len()) {
        let bouts = records(layout);
        if !bouts.is_empty() || split.data.is_empty() {
            debug!("{} layout from {} header cells", layout.label(), split.headers.len());
            return BoutTable { layout, bouts };
        }
        debug!("{} layout yielded no records; probing", layout.label());
    }

    let mut best = BoutTable { layout: LayoutGen::ALL[0], bouts: records(LayoutGen::ALL[0]) };
    for layout in &LayoutGen::ALL[1..] {
        let bouts = records(*layout);
        if bouts.len() > best.bouts.len() {
            best = BoutTable { layout: *layout, bouts };
        }
    }
    debug!("probed layout: {} ({} records)", best.layout.label(), best.bouts.len());
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::first_in_doc;
    use crate::data::Outcome;
    use scraper::Html;

    fn table(doc: &Html) -> ElementRef<'_> {
        first_in_doc(doc, "table").unwrap()
    }

    #[test]
    fn detection_by_header_width() {
        assert_eq!(LayoutGen::detect(0), None);
        assert_eq!(LayoutGen::detect(5), Some(LayoutGen::Legacy));
        assert_eq!(LayoutGen::detect(7), Some(LayoutGen::Ratings));
        assert_eq!(LayoutGen::detect(8), Some(LayoutGen::Ratings));
        assert_eq!(LayoutGen::detect(9), Some(LayoutGen::Modern));
        assert_eq!(LayoutGen::detect(12), Some(LayoutGen::Modern));
    }

    #[test]
    fn header_from_thead_or_first_row() {
        let doc = Html::parse_document(
            r#"<table><thead><tr><th>x</th></tr><tr><th>Date</th><th>Opponent</th></tr></thead>
               <tbody><tr><td>Jan 47</td><td>A</td></tr></tbody></table>"#,
        );
        let split = split_header(table(&doc));
        assert_eq!(split.headers, vec!["Date", "Opponent"]);
        assert_eq!(split.data.len(), 1);

        let doc = Html::parse_document(
            r#"<table><tr><td>Fecha</td><td>Oponente</td></tr><tr><td>Jan 47</td><td>A</td></tr></table>"#,
        );
        let split = split_header(table(&doc));
        assert_eq!(split.headers, vec!["Fecha", "Oponente"]);
        assert_eq!(split.data.len(), 1);

        let doc = Html::parse_document(
            r#"<table><tr><td>Jan 47</td><td>A</td><td>W</td></tr></table>"#,
        );
        let split = split_header(table(&doc));
        assert!(split.headers.is_empty());
        assert_eq!(split.data.len(), 1);
    }

    #[test]
    fn marker_and_narrow_rows_are_skipped() {
        let doc = Html::parse_document(
            r#"<table>
                 <tr class="SR"><td>a</td><td>b</td><td>c</td></tr>
                 <tr class="ad"><td>a</td><td>b</td><td>c</td></tr>
                 <tr><td colspan="3">banner</td></tr>
                 <tr><td>Jan 47</td><td>Someone</td><td>W</td></tr>
               </table>"#,
        );
        let split = split_header(table(&doc));
        let (_, rows) = extract_rows(&split, LayoutGen::Legacy);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell(1), "Someone");
    }

    #[test]
    fn strict_cells_degrade_to_empty() {
        let row = r#"<tr><td>Jan 47</td><td></td><td>Plain Name</td><td>1-0-0</td><td></td>
                     <td>Madrid</td><td>W</td><td>KO</td><td>3</td></tr>"#;
        let doc = Html::parse_document(&format!("<table>{row}</table>"));
        let split = split_header(table(&doc));

        let (_, strict) = extract_rows(&split, LayoutGen::Modern);
        assert_eq!(strict[0].cell(2), "");
        assert_eq!(strict[0].cell(6), "");
        assert_eq!(strict[0].cell(5), "Madrid");

        let (_, lenient) = extract_rows(&split, LayoutGen::Legacy);
        assert_eq!(lenient[0].cell(1), "");
        assert_eq!(lenient[0].cell(2), "Plain Name");
    }

    #[test]
    fn probing_prefers_specific_layout_on_tie() {
        let row = r#"<tr><td>Jan 47</td><td></td>
                     <td><a class="personLink" href="/x">Jose Martinez</a></td><td>10-2-1</td><td></td>
                     <td>Madrid</td><td><div class="boutResult">W</div></td><td>TKO</td><td>4</td></tr>"#;
        let doc = Html::parse_document(&format!("<table>{row}{row}</table>"));
        let got = read_bouts(table(&doc), LayoutHint::Auto, &Normalizer::default());
        assert_eq!(got.layout, LayoutGen::Modern);
        assert_eq!(got.bouts.len(), 2);
        assert_eq!(got.bouts[0].opponent, "Jose Martinez");
        assert_eq!(got.bouts[0].outcome, Outcome::Win);
        assert_eq!(got.bouts[0].rounds, Some(4));
    }

    #[test]
    fn forced_hint_is_used_as_given() {
        let doc = Html::parse_document(
            r#"<table><tr><td>Jan 47</td><td>Someone</td><td>L</td></tr></table>"#,
        );
        let got = read_bouts(table(&doc), LayoutHint::Modern, &Normalizer::default());
        assert_eq!(got.layout, LayoutGen::Modern);
        assert!(got.bouts.is_empty());

        let got = read_bouts(table(&doc), LayoutHint::Legacy, &Normalizer::default());
        assert_eq!(got.bouts.len(), 1);
        assert_eq!(got.bouts[0].outcome, Outcome::Loss);
    }

    #[test]
    fn hint_from_str() {
        assert_eq!("Modern".parse::<LayoutHint>(), Ok(LayoutHint::Modern));
        assert!("newest".parse::<LayoutHint>().is_err());
    }
}
