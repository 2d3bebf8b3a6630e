// src/csv.rs
// CSV/TSV export and import of bout lists.
//
// Export columns, fixed order: Date, Parsed date, Opponent, Opponent record,
// Location, Result, Method, Rounds. Result is the one-letter code (blank when
// unknown); Parsed date is ISO `YYYY-MM-DD` (blank when the date didn't parse).
//
// Import goes through the same header table and `Normalizer::record` as HTML
// rows do, so an exported file reads back into equal records.

use std::io::{Read, Write};

use ::csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use crate::config::options::{ExportOptions, HeaderLang};
use crate::data::BoutRecord;
use crate::error::ExportError;
use crate::normalize::{ColumnMap, Field, Normalizer, RawRow};

/* ---------------- Export ---------------- */

pub fn export_headers(lang: HeaderLang) -> Vec<&'static str> {
    Field::EXPORT.iter().map(|f| f.header(lang)).collect()
}

pub fn export_row(b: &BoutRecord) -> Vec<String> {
    vec![
        b.raw_date.clone(),
        b.parsed_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        b.opponent.clone(),
        b.opponent_record.clone().unwrap_or_default(),
        b.location.clone().unwrap_or_default(),
        s!(b.outcome.code()),
        b.method.clone().unwrap_or_default(),
        b.rounds.map(|r| r.to_string()).unwrap_or_default(),
    ]
}

pub fn write_bouts<W: Write>(out: W, bouts: &[BoutRecord], opts: &ExportOptions) -> Result<(), ExportError> {
    let mut wtr = WriterBuilder::new().delimiter(opts.delim()).from_writer(out);
    if opts.include_headers {
        wtr.write_record(export_headers(opts.lang))?;
    }
    for b in bouts {
        wtr.write_record(export_row(b))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Whole export as one string (headers per `opts.include_headers`).
pub fn to_export_string(bouts: &[BoutRecord], opts: &ExportOptions) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_bouts(&mut buf, bouts, opts)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/* ---------------- Import ---------------- */

/// Read a bout list written by [`write_bouts`] (or any file with recognizable
/// header names, English or Spanish). A header row is required.
pub fn read_bouts<R: Read>(input: R, delim: u8, normalizer: &Normalizer) -> Result<Vec<BoutRecord>, ExportError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| s!(h.trim_start_matches('\u{feff}')))
        .collect();
    let map = ColumnMap::from_headers(&headers);
    if map.known_fields() == 0 {
        return Err(ExportError::NoKnownColumns(headers));
    }

    let mut out = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let row = RawRow(rec?.iter().map(String::from).collect());
        match normalizer.record(&row, &map) {
            Some(b) => out.push(b),
            None => debug!("import: row {} has no content, skipped", i + 1),
        }
    }
    Ok(out)
}

pub fn import_str(text: &str, delim: u8, normalizer: &Normalizer) -> Result<Vec<BoutRecord>, ExportError> {
    read_bouts(text.as_bytes(), delim, normalizer)
}
