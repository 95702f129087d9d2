//! LOAD stage: syllabus rows → per-chapter weight records.
//!
//! - Rows are selected by exact (trimmed) grade and subject.
//! - Chapters keep their first-appearance order; that order is the only
//!   tie-break the allocator uses.
//! - Raw count = distinct learning-outcome tags per chapter.

use std::path::Path;

use tp_core::band::Band;
use tp_core::determinism::{count_distinct, group_in_first_appearance_order};
use tp_core::ids::ChapterId;
use tp_core::variables::PlanParams;
use tp_io::syllabus::Syllabus;

use crate::PipelineError;

/// Request-scoped, immutable weight signal for one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterWeightRecord {
    pub chapter_id: ChapterId,
    pub raw_outcome_count: u32,
    pub band: Band,
}

/// Load a syllabus file with the configured column aliases.
pub fn read_syllabus(path: &Path, params: &PlanParams) -> Result<Syllabus, PipelineError> {
    Ok(Syllabus::load(path, &params.columns)?)
}

/// Chapter names are normalized, never rejected: control characters become
/// spaces and over-long names are cut. Rows whose name has nothing printable
/// left are skipped with a warning.
pub fn chapter_records(
    syllabus: &Syllabus,
    grade: &str,
    subject: &str,
    params: &PlanParams,
) -> Vec<ChapterWeightRecord> {
    let band = params.band_for_grade(grade);
    let mut skipped = 0usize;
    let groups = group_in_first_appearance_order(syllabus.rows_for(grade, subject).filter_map(|r| {
        match ChapterId::normalized(&r.chapter) {
            Some(id) => {
                if id.as_str() != r.chapter.trim() {
                    tracing::warn!(original = %r.chapter, chapter = %id, "chapter name normalized");
                }
                Some((id, r.learning_outcome.as_str()))
            }
            None => {
                skipped += 1;
                None
            }
        }
    }));
    if skipped > 0 {
        tracing::warn!(skipped, "rows without a usable chapter name skipped");
    }

    let records: Vec<ChapterWeightRecord> = groups
        .into_iter()
        .map(|(chapter_id, outcomes)| ChapterWeightRecord {
            chapter_id,
            raw_outcome_count: u32::try_from(count_distinct(&outcomes)).unwrap_or(u32::MAX),
            band,
        })
        .collect();

    tracing::debug!(grade, subject, %band, chapters = records.len(), "chapters grouped");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_io::syllabus::SyllabusRecord;

    fn row(g: &str, s: &str, c: &str, lo: &str) -> SyllabusRecord {
        SyllabusRecord {
            grade: g.into(),
            subject: s.into(),
            chapter: c.into(),
            learning_outcome: lo.into(),
        }
    }

    #[test]
    fn groups_by_chapter_in_file_order_with_distinct_outcomes() {
        let s = Syllabus::from_records(vec![
            row("6", "Science", "Light", "LO1"),
            row("6", "Science", "Food", "LO1"),
            row("6", "Science", "Light", "LO2"),
            row("6", "Science", "Light", "LO1"),
            row("6", "Maths", "Fractions", "LO1"),
            row("7", "Science", "Heat", "LO1"),
        ]);
        let recs = chapter_records(&s, "6", "Science", &PlanParams::default());
        let got: Vec<(&str, u32)> = recs
            .iter()
            .map(|r| (r.chapter_id.as_str(), r.raw_outcome_count))
            .collect();
        assert_eq!(got, vec![("Light", 2), ("Food", 1)]);
        assert!(recs.iter().all(|r| r.band == Band::Middle));
    }

    #[test]
    fn named_grades_use_the_default_band() {
        let s = Syllabus::from_records(vec![row("Nursery", "EVS", "Colours", "LO1")]);
        let recs = chapter_records(&s, "Nursery", "EVS", &PlanParams::default());
        assert_eq!(recs[0].band, Band::Primary);
    }

    #[test]
    fn odd_chapter_names_are_normalized_not_fatal() {
        let long = "A".repeat(300);
        let s = Syllabus::from_records(vec![
            row("7", "Science", "Light", "LO1"),
            row("7", "Science", &long, "LO1"),
            row("7", "Science", &long, "LO2"),
            row("7", "Science", "Heat\u{7}Transfer", "LO1"),
            row("7", "Science", "\u{1b}", "LO1"),
        ]);
        let recs = chapter_records(&s, "7", "Science", &PlanParams::default());
        let got: Vec<(&str, u32)> = recs
            .iter()
            .map(|r| (r.chapter_id.as_str(), r.raw_outcome_count))
            .collect();
        assert_eq!(got.len(), 3);
        assert_eq!(got[0], ("Light", 1));
        assert_eq!(got[1], (&long[..256], 2));
        assert_eq!(got[2], ("Heat Transfer", 1));
    }

    #[test]
    fn unknown_grade_or_subject_is_empty() {
        let s = Syllabus::from_records(vec![row("6", "Science", "Light", "LO1")]);
        assert!(chapter_records(&s, "6", "History", &PlanParams::default()).is_empty());
        assert!(chapter_records(&s, "9", "Science", &PlanParams::default()).is_empty());
    }
}
