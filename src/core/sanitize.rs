// src/core/sanitize.rs
use tracing::trace;

/// Collapse every run of whitespace (including non-breaking space) into a
/// single ASCII space and trim both ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Profile-table key: lower-case, whitespace collapsed, trailing colons dropped.
/// `"Nationality:"`, `" NATIONALITY "` and `"nationality :"` all become `"nationality"`.
pub fn normalize_key(s: &str) -> String {
    let ws = normalize_ws(s).to_lowercase();
    ws.trim_end_matches(|c: char| c == ':' || c.is_whitespace()).trim().to_string()
}

/// First contiguous run of ASCII digits, parsed. `"10 rounds"` → 10, `"3/6"` → 3.
/// A run too long for `u32` saturates.
pub fn first_digits(s: &str) -> Option<u32> {
    let mut value: Option<u32> = None;
    let mut saturated = false;
    for ch in s.chars() {
        match ch.to_digit(10) {
            Some(d) => {
                let next = value.unwrap_or(0).checked_mul(10).and_then(|v| v.checked_add(d));
                saturated |= next.is_none();
                value = Some(next.unwrap_or(u32::MAX));
            }
            None if value.is_some() => break,
            None => {}
        }
    }
    if saturated {
        trace!("digit run in '{s}' saturated");
    }
    value
}

/// Turn a boxer's name (or any label) into a safe file stem.
/// Runs of whitespace become one `_`; anything but ASCII alphanumerics, `-` and `_` is dropped.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch == '-' || ch == '_' { if !(last_us && ch == '_') { out.push(ch); } last_us = ch == '_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Cache file stem for a URL: scheme dropped, separators flattened, dots kept.
/// `"https://boxrec.com/en/box-pro/1"` → `"boxrec.com_en_box-pro_1"`.
pub fn url_cache_stem(url: &str) -> String {
    let bare = url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let mut out = String::with_capacity(bare.len());
    for ch in bare.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' {
            out.push(ch);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    let out = out.trim_matches('_');
    if out.is_empty() { s!("document") } else { s!(out) }
}
