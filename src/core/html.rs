// src/core/html.rs
// DOM helpers over `scraper`. Everything here is tolerant: a missing child or a
// selector that fails to parse yields an empty/None result, never an error.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::sanitize::normalize_ws;

/// Parse a CSS selector, logging (not failing) on bad input.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!("invalid CSS selector '{css}': {e}");
            None
        }
    }
}

/// First element matching `css` in document order.
pub fn first_in_doc<'a>(doc: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    doc.select(&sel).next()
}

/// First descendant of `el` matching `css`.
pub fn first_in<'a>(el: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    el.select(&sel).next()
}

/// Concatenated text of an element, whitespace-normalized.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Text nodes joined with a single space, whitespace-normalized.
/// Use for links whose parts sit in separate inline tags (`<span>Jose</span><span>Martinez</span>`).
pub fn spaced_text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Direct element children with the given tag name.
pub fn children_named<'a>(el: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| c.value().name().eq_ignore_ascii_case(name))
        .collect()
}

/// `true` when the element's class list holds `class` exactly (ASCII case-insensitive).
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c.eq_ignore_ascii_case(class))
}

/// `true` when the raw class attribute contains `fragment` (case-insensitive).
pub fn class_contains(el: ElementRef<'_>, fragment: &str) -> bool {
    el.value()
        .attr("class")
        .map(|c| c.to_ascii_lowercase().contains(&fragment.to_ascii_lowercase()))
        .unwrap_or(false)
}

/// Rows belonging to this table only: `tr` children of the table itself and of its
/// `thead`/`tbody`/`tfoot` sections. Rows of nested tables are not included.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name().to_ascii_lowercase().as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(children_named(child, "tr")),
            _ => {}
        }
    }
    rows
}

/// `td`/`th` children of a row, in order.
pub fn row_cells<'a>(row: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|c| {
            let n = c.value().name();
            n.eq_ignore_ascii_case("td") || n.eq_ignore_ascii_case("th")
        })
        .collect()
}

/// `true` when the row sits directly inside a `thead`.
pub fn in_thead(row: ElementRef<'_>) -> bool {
    row.parent()
        .and_then(ElementRef::wrap)
        .map(|p| p.value().name().eq_ignore_ascii_case("thead"))
        .unwrap_or(false)
}

/// `true` if the document has no visible text and no tables: nothing worth extracting.
pub fn is_blank(doc: &Html) -> bool {
    let has_text = doc.root_element().text().any(|t| !t.trim().is_empty());
    !has_text && first_in_doc(doc, "table").is_none()
}
