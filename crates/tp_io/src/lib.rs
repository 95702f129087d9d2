//! crates/tp_io/src/lib.rs
//! File-facing half of the engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Offline posture: any `<scheme>://` path is rejected before touching disk.
//! - Public surface kept small; details live in submodules.

#![forbid(unsafe_code)]

use std::fs;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

/// Unified error for tp_io (canonical_json/hasher/params/syllabus).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, fsync, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failures.
    #[error("schema error: {0}")]
    Schema(String),

    /// Delimited-text parse errors.
    #[error("csv error: {0}")]
    Csv(String),

    /// A required syllabus column matched none of its aliases.
    #[error("missing column `{column}` (accepted headers: {accepted})")]
    MissingColumn { column: &'static str, accepted: String },

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; report root.
        IoError::Json {
            pointer: "/".to_string(),
            msg: e.to_string(),
        }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod params;
pub mod syllabus;

/* ---------------- Shared helpers ---------------- */

/// Upper bound for JSON inputs read into memory.
pub const MAX_JSON_BYTES: u64 = 8 * 1024 * 1024;

/// Returns true if `s` looks like a URL (any `<scheme>://`, including `file://`).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    s.trim().contains("://")
}

/// Fail early on URL-like paths; everything here is local-file only.
pub fn ensure_local(path: &Path) -> IoResult<()> {
    if looks_like_url_strict(&path.to_string_lossy()) {
        return Err(IoError::Invalid(format!(
            "only local files are supported: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Read a local JSON file into a `Value`, bounded by `MAX_JSON_BYTES`.
pub fn read_json_value(path: &Path) -> IoResult<serde_json::Value> {
    ensure_local(path)?;
    let len = fs::metadata(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?
        .len();
    if len > MAX_JSON_BYTES {
        return Err(IoError::Invalid(format!(
            "{} is {len} bytes (limit {MAX_JSON_BYTES})",
            path.display()
        )));
    }
    let mut buf = String::with_capacity(len as usize);
    fs::File::open(path)
        .map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?
        .read_to_string(&mut buf)?;
    Ok(serde_json::from_str(&buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn url_paths_are_rejected() {
        assert!(looks_like_url_strict("https://example.org/syllabus.tsv"));
        assert!(looks_like_url_strict(" file:///tmp/x.json"));
        assert!(!looks_like_url_strict("data/syllabus.tsv"));
        assert!(matches!(
            ensure_local(Path::new("http://host/p.json")),
            Err(IoError::Invalid(_))
        ));
    }

    #[test]
    fn reads_json_value() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"periods_per_day": 6}}"#).unwrap();
        let v = read_json_value(f.path()).unwrap();
        assert_eq!(v["periods_per_day"], 6);
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(matches!(read_json_value(f.path()), Err(IoError::Json { .. })));
    }
}
