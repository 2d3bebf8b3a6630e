// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::consts::DEFAULT_FILE;
use crate::config::options::ExportOptions;
use crate::core::sanitize::sanitize_filename;
use crate::csv::write_bouts;
use crate::data::{BoutRecord, ProfileSummary};
use crate::error::ExportError;

/// Write one export file based on ExportOptions (path, headers policy, delimiter, etc.).
/// Returns the final path written to.
pub fn write_export(export: &ExportOptions, bouts: &[BoutRecord]) -> Result<PathBuf, ExportError> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut out = BufWriter::new(File::create(&path)?);
    write_bouts(&mut out, bouts, export)?;
    out.flush()?;

    info!("wrote {} bouts to {}", bouts.len(), path.display());
    Ok(path)
}

/// File stem for a boxer's export: the sanitized name, or the default when unknown.
pub fn stem_for(profile: &ProfileSummary) -> String {
    if profile.is_unknown() {
        s!(DEFAULT_FILE)
    } else {
        sanitize_filename(profile.name(), DEFAULT_FILE)
    }
}

/// Apply a user `-o` value on top of the defaults. A directory (existing, or hinted by a
/// trailing separator) keeps the name-derived stem; anything else is a file path.
pub fn apply_user_path(export: &mut ExportOptions, user_o: &str, profile: &ProfileSummary) {
    export.set_stem(&stem_for(profile));
    let user_o = normalize_separators(user_o.trim());
    if user_o.is_empty() {
        return;
    }
    let p = Path::new(&user_o);
    if p.is_dir() && !looks_like_dir_hint(p) {
        export.set_path(&format!("{user_o}{}", std::path::MAIN_SEPARATOR));
    } else {
        export.set_path(&user_o);
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c == '/' || c == '\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.display().to_string()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
