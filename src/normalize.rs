// src/normalize.rs
//! Field normalization: raw cell text → validated [`BoutRecord`].
//!
//! Everything here is origin-agnostic. An HTML row (see `specs::rows`) and a CSV
//! row (see `csv`) both arrive as a [`RawRow`] plus a [`ColumnMap`] built from
//! their header names through the same [`Field::from_header`] table, and both go
//! through [`Normalizer::record`].
//!
//! No function in this module fails on a single field. A value that can't be
//! read becomes `None` / [`Outcome::Unknown`]; the row is kept as long as
//! something other than its date carries information.

use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use tracing::trace;

use crate::config::consts::MISSING_OPPONENT;
use crate::config::options::HeaderLang;
use crate::core::sanitize::{first_digits, normalize_key, normalize_ws};
use crate::data::{BoutRecord, Outcome};

/* ---------------- Dates ---------------- */

/// What to do with two-digit years that chrono resolves into the 2000s
/// (`"May 48"` parses as 2048).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CenturyPolicy {
    /// Keep whatever the parser produced.
    #[default]
    AsParsed,
    /// Any parsed year >= the given year moves back 100 years.
    Cutover(i32),
    /// Years >= 2000 move back 100 years when the profile's career ended before 2000.
    /// Without a known career span this behaves like `AsParsed`.
    CareerSpan,
}

impl FromStr for CenturyPolicy {
    type Err = String;

    /// `as-parsed` | `career` | `cutover:<year>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lc = s.trim().to_ascii_lowercase();
        match lc.as_str() {
            "as-parsed" | "none" => Ok(CenturyPolicy::AsParsed),
            "career" | "career-span" => Ok(CenturyPolicy::CareerSpan),
            other => match other.strip_prefix("cutover:") {
                Some(y) => y
                    .trim()
                    .parse()
                    .map(CenturyPolicy::Cutover)
                    .map_err(|e| format!("bad cutover year '{y}': {e}")),
                None => Err(format!("unknown century policy: {s}")),
            },
        }
    }
}

// Tried in order against "01 <raw>" and then against "<raw>".
// chrono's %b takes short or long month names, case-insensitive.
const DATE_FORMATS: &[&str] = &["%d %b %y", "%d %b %Y"];
const ISO_FORMAT: &str = "%Y-%m-%d";

/* ---------------- Results / methods ---------------- */

const WIN_WORDS: &[&str] = &["w", "win", "won", "victoria"];
const LOSS_WORDS: &[&str] = &["l", "loss", "lost", "derrota"];
const DRAW_WORDS: &[&str] = &["d", "draw", "drawn", "drew", "empate"];

fn keyword(word: &str) -> Option<Outcome> {
    if WIN_WORDS.contains(&word) { return Some(Outcome::Win); }
    if LOSS_WORDS.contains(&word) { return Some(Outcome::Loss); }
    if DRAW_WORDS.contains(&word) { return Some(Outcome::Draw); }
    None
}

/// Outcome from free result text. Whole keywords first (on the full text, then on
/// its first token), then a substring scan of the first token in priority W, L, D.
pub fn outcome_of(text: &str) -> Outcome {
    let t = normalize_ws(text).to_lowercase();
    if t.is_empty() {
        return Outcome::Unknown;
    }
    if let Some(o) = keyword(&t) {
        return o;
    }
    let first = t
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .find(|w| !w.is_empty())
        .unwrap_or("");
    if let Some(o) = keyword(first) {
        return o;
    }
    for (needle, o) in [('w', Outcome::Win), ('l', Outcome::Loss), ('d', Outcome::Draw)] {
        if first.contains(needle) {
            return o;
        }
    }
    Outcome::Unknown
}

/// Split a result cell into its outcome and any trailing method text.
/// `"W TKO"` → (Win, Some("TKO")); `"L-UD"` → (Loss, Some("UD")); `"W"` → (Win, None).
pub fn split_result(text: &str) -> (Outcome, Option<String>) {
    let t = normalize_ws(text);
    if let Some(cut) = t.find(|c: char| c == ' ' || c == '-') {
        let head = outcome_of(&t[..cut]);
        if head != Outcome::Unknown {
            return (head, non_empty!(t[cut + 1..]));
        }
    }
    (outcome_of(&t), None)
}

/// Facts derivable from method text. Independent of each other and of the outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MethodKind {
    pub knockout: bool,
    pub decision: bool,
}

impl MethodKind {
    pub fn of(text: &str) -> Self {
        let up = text.to_uppercase();
        Self {
            knockout: up.contains("KO"),
            decision: ["UD", "SD", "MD", "PTS"].iter().any(|k| up.contains(k)),
        }
    }

    pub fn is_known(self) -> bool {
        self.knockout || self.decision
    }
}

/* ---------------- Field mapping ---------------- */

/// Logical bout columns, shared by HTML headers and CSV headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Date,
    ParsedDate,
    Opponent,
    OpponentRecord,
    Location,
    Result,
    Method,
    Rounds,
    Ignore,
}

impl Field {
    /// Export column order.
    pub const EXPORT: [Field; 8] = [
        Field::Date,
        Field::ParsedDate,
        Field::Opponent,
        Field::OpponentRecord,
        Field::Location,
        Field::Result,
        Field::Method,
        Field::Rounds,
    ];

    /// Header name → field. Case, whitespace, underscores and trailing colons don't matter.
    pub fn from_header(header: &str) -> Field {
        let key = normalize_key(&header.replace('_', " "));
        match key.as_str() {
            "date" | "fecha" | "date str" | "fight date" => Field::Date,
            "parsed date" | "fecha normalizada" => Field::ParsedDate,
            "opponent" | "oponente" | "rival" | "opponent name" => Field::Opponent,
            "w-l-d" | "opponent w-l-d" | "opponent record" | "record" | "récord oponente"
            | "record oponente" => Field::OpponentRecord,
            "location" | "venue" | "lugar" | "place" => Field::Location,
            "result" | "resultado" | "outcome" | "res" => Field::Result,
            "method" | "método" | "metodo" | "decision" | "type" | "notes" => Field::Method,
            "rounds" | "round" | "rds" | "rounds numeric" | "asaltos" => Field::Rounds,
            _ => Field::Ignore,
        }
    }

    pub fn header(self, lang: HeaderLang) -> &'static str {
        match lang {
            HeaderLang::English => match self {
                Field::Date => "Date",
                Field::ParsedDate => "Parsed date",
                Field::Opponent => "Opponent",
                Field::OpponentRecord => "Opponent record",
                Field::Location => "Location",
                Field::Result => "Result",
                Field::Method => "Method",
                Field::Rounds => "Rounds",
                Field::Ignore => "",
            },
            HeaderLang::Spanish => match self {
                Field::Date => "Fecha",
                Field::ParsedDate => "Fecha normalizada",
                Field::Opponent => "Oponente",
                Field::OpponentRecord => "Récord oponente",
                Field::Location => "Lugar",
                Field::Result => "Resultado",
                Field::Method => "Método",
                Field::Rounds => "Asaltos",
                Field::Ignore => "",
            },
        }
    }
}

/// Column index → field, for one table or file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnMap {
    columns: Vec<Field>,
}

impl ColumnMap {
    pub fn new(columns: Vec<Field>) -> Self {
        Self { columns }
    }

    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        Self::new(headers.iter().map(|h| Field::from_header(h.as_ref())).collect())
    }

    pub fn len(&self) -> usize { self.columns.len() }
    pub fn is_empty(&self) -> bool { self.columns.is_empty() }

    pub fn field(&self, index: usize) -> Field {
        self.columns.get(index).copied().unwrap_or(Field::Ignore)
    }

    /// First column mapped to `field`.
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.columns.iter().position(|f| *f == field)
    }

    /// Distinct fields this map can fill (Ignore excluded).
    pub fn known_fields(&self) -> usize {
        Field::EXPORT.iter().filter(|f| self.index_of(**f).is_some()).count()
    }
}

/// One physical row's cell texts, in column order. Missing cells read as `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow(pub Vec<String>);

impl RawRow {
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/* ---------------- Normalizer ---------------- */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalizer {
    century: CenturyPolicy,
    career: Option<(i32, i32)>,
}

impl Normalizer {
    pub fn new(century: CenturyPolicy) -> Self {
        Self { century, career: None }
    }

    /// Career span used by `CenturyPolicy::CareerSpan`.
    pub fn with_career(mut self, span: Option<(i32, i32)>) -> Self {
        self.career = span;
        self
    }

    pub fn century(&self) -> CenturyPolicy { self.century }

    /// `"May 48"` → May 1st; `"01 May 48"` → May 1st; `"TBD"` → None.
    /// The synthesized day-prefixed form is tried first, then the text as given.
    pub fn date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = normalize_ws(raw);
        if raw.is_empty() {
            return None;
        }
        let day_first = format!("01 {raw}");
        let parsed = DATE_FORMATS
            .iter()
            .find_map(|fmt| {
                NaiveDate::parse_from_str(&day_first, fmt)
                    .or_else(|_| NaiveDate::parse_from_str(&raw, fmt))
                    .ok()
            })
            .or_else(|| NaiveDate::parse_from_str(&raw, ISO_FORMAT).ok());

        match parsed {
            Some(d) => Some(self.apply_century(d)),
            None => {
                trace!("unparseable date '{raw}'");
                None
            }
        }
    }

    fn apply_century(&self, d: NaiveDate) -> NaiveDate {
        let shift = match self.century {
            CenturyPolicy::AsParsed => false,
            CenturyPolicy::Cutover(y) => d.year() >= y,
            CenturyPolicy::CareerSpan => {
                matches!(self.career, Some((_, end)) if end < 2000 && d.year() >= 2000)
            }
        };
        if shift { d.with_year(d.year() - 100).unwrap_or(d) } else { d }
    }

    /// Map one raw row through the column map. `None` means the row carried
    /// nothing beyond a date and must be dropped.
    pub fn record(&self, row: &RawRow, map: &ColumnMap) -> Option<BoutRecord> {
        let cell = |f: Field| map.index_of(f).map(|i| row.cell(i)).unwrap_or("");

        let raw_date = normalize_ws(cell(Field::Date));
        let parsed_date = NaiveDate::parse_from_str(cell(Field::ParsedDate).trim(), ISO_FORMAT)
            .ok()
            .or_else(|| self.date(&raw_date));

        let opponent = non_empty!(normalize_ws(cell(Field::Opponent)))
            .unwrap_or_else(|| s!(MISSING_OPPONENT));
        let (outcome, result_method) = split_result(cell(Field::Result));
        // free-text notes never hide a stoppage or decision written in the result cell
        let method = match (non_empty!(normalize_ws(cell(Field::Method))), result_method) {
            (Some(col), Some(res))
                if !MethodKind::of(&col).is_known() && MethodKind::of(&res).is_known() =>
            {
                Some(res)
            }
            (col, res) => col.or(res),
        };

        let record = BoutRecord {
            parsed_date,
            opponent,
            opponent_record: non_empty!(normalize_ws(cell(Field::OpponentRecord))),
            location: non_empty!(normalize_ws(cell(Field::Location))),
            outcome,
            method,
            rounds: first_digits(cell(Field::Rounds)),
            raw_date,
        };

        if record.has_content() {
            Some(record)
        } else {
            trace!("row skipped: nothing besides date '{}'", record.raw_date);
            None
        }
    }
}
