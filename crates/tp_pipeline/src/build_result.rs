//! BUILD_RESULT: typed, serializable plan plus its content id.
//!
//! The id is `PLAN:` + sha256 over the canonical JSON of the result with
//! `plan_id` omitted, so it depends on inputs and parameters only.

use serde::{Deserialize, Serialize};

use tp_algo::allocation::CapacityInfeasible;
use tp_algo::{to_weeks, BudgetBlocks, WeightExtractor};
use tp_core::band::Band;
use tp_core::ids::{ChapterId, PlanId};
use tp_core::progress::PlanProgress;
use tp_core::rounding::Tenths;
use tp_core::variables::{AllocationStrategy, PlanParams};

use crate::allocate::AllocatedUnits;
use crate::{Budget, ChapterWeightRecord, PipelineError, PlanContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChapterStatus {
    Planned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalBlocks {
    pub revision: u64,
    pub assessment: u64,
    pub exams: u64,
    pub buffer: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum PlanWarning {
    /// Chapter floors need more units than the teaching block holds; the
    /// plan is over-committed by `required - capacity`.
    CapacityInfeasible { required: u64, capacity: u64, message: String },
}

impl From<CapacityInfeasible> for PlanWarning {
    fn from(w: CapacityInfeasible) -> Self {
        PlanWarning::CapacityInfeasible {
            required: w.required,
            capacity: w.capacity,
            message: w.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterAllocation {
    pub chapter_id: ChapterId,
    pub raw_outcome_count: u32,
    pub band: Band,
    pub weight: u32,
    pub min_required_units: u64,
    pub assigned_units: u64,
    pub approx_weeks: Tenths,
    pub suggested_days: u32,
    pub status: ChapterStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<PlanId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub total_days: u64,
    pub units_per_day: u32,
    pub weekly_frequency: u32,
    pub strategy: AllocationStrategy,
    pub total_units: u64,
    pub teaching_units: u64,
    pub categorical_blocks: CategoricalBlocks,
    pub chapters: Vec<ChapterAllocation>,
    pub warnings: Vec<PlanWarning>,
}

impl AllocationResult {
    pub fn assigned_total(&self) -> u64 {
        self.chapters.iter().map(|c| c.assigned_units).sum()
    }

    /// Fresh day-progression tracker: one entry per chapter, sized by its
    /// suggested days, all at day 1.
    pub fn progress(&self) -> PlanProgress {
        PlanProgress::from_day_counts(
            self.chapters
                .iter()
                .map(|c| (c.chapter_id.clone(), c.suggested_days)),
        )
    }
}

pub(crate) fn build(
    records: &[ChapterWeightRecord],
    budget: &Budget,
    blocks: &BudgetBlocks,
    allocated: AllocatedUnits,
    ctx: Option<PlanContext>,
    params: &PlanParams,
) -> Result<AllocationResult, PipelineError> {
    let wx = WeightExtractor::new(params);
    let chapters = records
        .iter()
        .zip(allocated.units)
        .map(|(r, units)| {
            Ok(ChapterAllocation {
                chapter_id: r.chapter_id.clone(),
                raw_outcome_count: r.raw_outcome_count,
                band: r.band,
                weight: wx.weight(r.raw_outcome_count, r.band),
                min_required_units: wx.min_required_units(r.raw_outcome_count, r.band),
                assigned_units: units,
                approx_weeks: to_weeks(units, budget.weekly_frequency)?,
                suggested_days: wx.suggested_days(r.raw_outcome_count),
                status: ChapterStatus::Planned,
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    let (grade, subject) = match ctx {
        Some(c) => (Some(c.grade), Some(c.subject)),
        None => (None, None),
    };

    let mut result = AllocationResult {
        plan_id: None,
        grade,
        subject,
        total_days: budget.total_days,
        units_per_day: budget.units_per_day,
        weekly_frequency: budget.weekly_frequency,
        strategy: params.strategy,
        total_units: blocks.total_units,
        teaching_units: blocks.teaching,
        categorical_blocks: CategoricalBlocks {
            revision: blocks.revision,
            assessment: blocks.assessment,
            exams: blocks.exams,
            buffer: blocks.buffer,
        },
        chapters,
        warnings: allocated.warning.into_iter().map(PlanWarning::from).collect(),
    };
    result.plan_id = Some(tp_io::hasher::plan_id_for(&result)?);
    Ok(result)
}
