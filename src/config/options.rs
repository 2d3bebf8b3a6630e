// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::normalize::CenturyPolicy;
use crate::specs::rows::LayoutHint;
use crate::stats::KoScope;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub extract: ExtractOptions,
    pub ko_scope: KoScope,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Sleep before each network request.
    pub pause: Duration,
    pub cache: CacheOptions,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(DEFAULT_URL),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            cache: CacheOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheOptions {
    pub enabled: bool,
    pub ttl: Duration,
    /// On-disk copy of fetched documents; `None` keeps the cache in memory only.
    pub dir: Option<PathBuf>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: Duration::from_secs(CACHE_TTL_SECS),
            dir: Some(PathBuf::from(STORE_DIR)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub century: CenturyPolicy,
    pub layout: LayoutHint,
    /// "More than N rows" threshold of the last-resort bout-table heuristic.
    pub heuristic_min_rows: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            century: CenturyPolicy::AsParsed,
            layout: LayoutHint::Auto,
            heuristic_min_rows: HEURISTIC_MIN_ROWS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

/// Language of the exported header row. Import accepts both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderLang {
    English,
    Spanish,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    pub lang: HeaderLang,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            lang: HeaderLang::English,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// Final file path. A user-typed extension wins; otherwise the format decides.
    pub fn out_path(&self) -> PathBuf {
        let mut name = self.out_path.file_stem.clone();
        name.push(".");
        match &self.out_path.ext {
            Some(ext) => name.push(ext),
            None => name.push(self.format.ext()),
        }
        self.out_path.dir.join(name)
    }

    /// Parse user text into dir + stem (+ explicit extension, if typed).
    /// A trailing separator means "directory only": the stem stays as it was.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() { return; }

        let p = Path::new(s);
        if s.ends_with('/') || s.ends_with('\\') {
            self.out_path.dir = p.to_path_buf();
            return;
        }
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }

    /// Replace only the stem (e.g. with the sanitized boxer name), keeping dir + extension policy.
    pub fn set_stem(&mut self, stem: &str) {
        self.out_path.file_stem = OsString::from(stem);
    }

    pub fn delim(&self) -> u8 {
        self.format.delim()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR).join(DEFAULT_BOUTS_SUBDIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
