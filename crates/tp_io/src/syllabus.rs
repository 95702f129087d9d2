//! Syllabus sheets: one row per (grade, subject, chapter, learning outcome).
//!
//! Headers are matched against configured aliases once per file
//! (`SchemaMapping`); after that every row is read by column index. Values are
//! trimmed and rows with any empty field are dropped. Grades stay strings so
//! "Nursery", "LKG" and "10" all survive loading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tp_core::band::parse_grade_number;
use tp_core::variables::ColumnAliases;

use crate::{ensure_local, IoError, IoResult};

/// Locations tried by `discover` when no explicit path is given.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["data/master.tsv", "data/syllabus.tsv"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyllabusRecord {
    pub grade: String,
    pub subject: String,
    pub chapter: String,
    pub learning_outcome: String,
}

/// Column index of each canonical field, resolved from the header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaMapping {
    pub grade: usize,
    pub subject: usize,
    pub chapter: usize,
    pub learning_outcome: usize,
}

impl SchemaMapping {
    /// Headers are compared trimmed and lowercased; for each field the first
    /// alias (in configured order) present in the header row wins.
    pub fn resolve<S: AsRef<str>>(headers: &[S], aliases: &ColumnAliases) -> IoResult<Self> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();
        let find = |column: &'static str, accepted: &[String]| -> IoResult<usize> {
            accepted
                .iter()
                .find_map(|a| {
                    let a = a.trim().to_lowercase();
                    normalized.iter().position(|h| *h == a)
                })
                .ok_or_else(|| IoError::MissingColumn {
                    column,
                    accepted: accepted.join(", "),
                })
        };
        Ok(Self {
            grade: find("grade", aliases.grade.as_slice())?,
            subject: find("subject", aliases.subject.as_slice())?,
            chapter: find("chapter", aliases.chapter.as_slice())?,
            learning_outcome: find("learning_outcome", aliases.learning_outcome.as_slice())?,
        })
    }

    fn extract(&self, row: &csv::StringRecord) -> Option<SyllabusRecord> {
        let field = |i: usize| -> Option<String> {
            let v = row.get(i)?.trim();
            (!v.is_empty()).then(|| v.to_string())
        };
        Some(SyllabusRecord {
            grade: field(self.grade)?,
            subject: field(self.subject)?,
            chapter: field(self.chapter)?,
            learning_outcome: field(self.learning_outcome)?,
        })
    }
}

/// Tab for `.tsv` (and `.tab`), comma for everything else.
pub fn delimiter_for(path: &Path) -> u8 {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => b'\t',
        _ => b',',
    }
}

/// First candidate that exists as a file.
pub fn discover<P: AsRef<Path>>(candidates: &[P]) -> IoResult<PathBuf> {
    for c in candidates {
        let p = c.as_ref();
        if p.is_file() {
            return Ok(p.to_path_buf());
        }
    }
    let tried: Vec<String> = candidates
        .iter()
        .map(|c| c.as_ref().display().to_string())
        .collect();
    Err(IoError::Path(format!(
        "syllabus file not found; expected one of: {}",
        tried.join(", ")
    )))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Syllabus {
    records: Vec<SyllabusRecord>,
}

impl Syllabus {
    pub fn load(path: &Path, aliases: &ColumnAliases) -> IoResult<Self> {
        ensure_local(path)?;
        let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
        let syllabus = Self::from_reader(f, delimiter_for(path), aliases)?;
        tracing::debug!(
            path = %path.display(),
            rows = syllabus.len(),
            "syllabus loaded"
        );
        Ok(syllabus)
    }

    pub fn from_reader<R: Read>(rdr: R, delimiter: u8, aliases: &ColumnAliases) -> IoResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(rdr);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mapping = SchemaMapping::resolve(&headers, aliases)?;

        let mut records = Vec::new();
        let mut dropped = 0usize;
        for row in reader.records() {
            match mapping.extract(&row?) {
                Some(rec) => records.push(rec),
                None => dropped += 1,
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, "rows with empty fields skipped");
        }
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<SyllabusRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SyllabusRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct grades: numeric classes ascending, then named grades A–Z.
    pub fn grades(&self) -> Vec<String> {
        let mut out: Vec<String> = self.records.iter().map(|r| r.grade.clone()).collect();
        out.sort_by(|a, b| grade_key(a).cmp(&grade_key(b)));
        out.dedup();
        out
    }

    /// Distinct subjects taught in `grade`, A–Z.
    pub fn subjects_for(&self, grade: &str) -> Vec<String> {
        let grade = grade.trim();
        let mut out: Vec<String> = self
            .records
            .iter()
            .filter(|r| r.grade == grade)
            .map(|r| r.subject.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    /// Rows for one grade and subject, in file order.
    pub fn rows_for<'a>(
        &'a self,
        grade: &'a str,
        subject: &'a str,
    ) -> impl Iterator<Item = &'a SyllabusRecord> + 'a {
        let (grade, subject) = (grade.trim(), subject.trim());
        self.records
            .iter()
            .filter(move |r| r.grade == grade && r.subject == subject)
    }
}

fn grade_key(g: &str) -> (bool, u32, &str) {
    match parse_grade_number(g) {
        Some(n) => (false, n, g),
        None => (true, 0, g),
    }
}
