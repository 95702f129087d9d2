//! tp_pipeline — deterministic planning surface
//! (syllabus rows → chapter weights → budget → allocate → result).
//!
//! Delegates files/JSON/hashing to `tp_io` and math to `tp_algo`. Every call is
//! independent: no shared state, identical inputs give a field-for-field
//! identical result (including `plan_id`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tp_algo::{AllocError, BudgetError, ConvertError};
use tp_core::variables::{AllocationStrategy, PlanParams};
use tp_io::syllabus::Syllabus;

pub mod allocate;
pub mod build_result;
pub mod load;

pub use build_result::{
    AllocationResult, CategoricalBlocks, ChapterAllocation, ChapterStatus, PlanWarning,
};
pub use load::ChapterWeightRecord;

/// Message carried by the empty-result sentinel.
pub const NO_DATA_MESSAGE: &str = "No syllabus data found";

/// Single error surface for the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Days, units per day or weekly frequency were zero.
    #[error("invalid budget: {0}")]
    InvalidBudget(String),

    #[error("allocation failed: {0}")]
    Allocate(String),

    #[error(transparent)]
    Io(#[from] tp_io::IoError),
}

impl From<BudgetError> for PipelineError {
    fn from(e: BudgetError) -> Self {
        PipelineError::InvalidBudget(e.to_string())
    }
}

impl From<AllocError> for PipelineError {
    fn from(e: AllocError) -> Self {
        PipelineError::Allocate(e.to_string())
    }
}

impl From<ConvertError> for PipelineError {
    fn from(e: ConvertError) -> Self {
        PipelineError::InvalidBudget(e.to_string())
    }
}

/// Explicit "nothing to plan" result: `{chapters: [], message}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoData {
    pub chapters: Vec<ChapterAllocation>,
    pub message: String,
}

impl Default for NoData {
    fn default() -> Self {
        Self { chapters: Vec::new(), message: NO_DATA_MESSAGE.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AllocationOutcome {
    Planned(Box<AllocationResult>),
    NoData(NoData),
}

impl AllocationOutcome {
    pub fn planned(&self) -> Option<&AllocationResult> {
        match self {
            AllocationOutcome::Planned(r) => Some(r),
            AllocationOutcome::NoData(_) => None,
        }
    }

    pub fn warnings(&self) -> &[PlanWarning] {
        match self {
            AllocationOutcome::Planned(r) => &r.warnings,
            AllocationOutcome::NoData(_) => &[],
        }
    }
}

/// Budget inputs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    /// Working days in the year.
    pub total_days: u64,
    pub units_per_day: u32,
    pub weekly_frequency: u32,
}

/// Grade/subject the chapters were drawn from; echoed into the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanContext {
    pub grade: String,
    pub subject: String,
}

/// Plan one grade/subject out of a loaded syllabus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub grade: String,
    pub subject: String,
    pub total_days: u64,
    /// Falls back to `params.periods_per_day`.
    pub units_per_day: Option<u32>,
    /// Falls back to `params.strategy`.
    pub strategy: Option<AllocationStrategy>,
}

/// Core entry point over already-grouped chapter records.
///
/// `total_units = total_days * units_per_day`; the teaching block is the
/// allocation capacity. Zero chapters yield `AllocationOutcome::NoData`.
pub fn compute_allocation(
    records: &[ChapterWeightRecord],
    total_days: u64,
    weekly_frequency: u32,
    units_per_day: u32,
    params: &PlanParams,
) -> Result<AllocationOutcome, PipelineError> {
    let budget = Budget { total_days, units_per_day, weekly_frequency };
    run(records, budget, None, params)
}

/// Select, group and plan `req.grade`/`req.subject` from `syllabus`.
pub fn plan_for(
    syllabus: &Syllabus,
    req: &PlanRequest,
    params: &PlanParams,
) -> Result<AllocationOutcome, PipelineError> {
    let mut params = params.clone();
    if let Some(s) = req.strategy {
        params.strategy = s;
    }
    let records = load::chapter_records(syllabus, &req.grade, &req.subject, &params);
    let budget = Budget {
        total_days: req.total_days,
        units_per_day: req.units_per_day.unwrap_or(params.periods_per_day),
        weekly_frequency: params.weekly_frequency_for(&req.subject),
    };
    let ctx = PlanContext {
        grade: req.grade.trim().to_string(),
        subject: req.subject.trim().to_string(),
    };
    run(&records, budget, Some(ctx), &params)
}

fn run(
    records: &[ChapterWeightRecord],
    budget: Budget,
    ctx: Option<PlanContext>,
    params: &PlanParams,
) -> Result<AllocationOutcome, PipelineError> {
    if records.is_empty() {
        tracing::info!("no chapters matched; returning empty plan");
        return Ok(AllocationOutcome::NoData(NoData::default()));
    }
    validate_budget(&budget)?;

    let total_units = budget
        .total_days
        .checked_mul(budget.units_per_day as u64)
        .ok_or_else(|| PipelineError::InvalidBudget("total units overflow".into()))?;
    let blocks = tp_algo::decompose(total_units, &params.block_ratios)?;
    tracing::debug!(total_units, teaching = blocks.teaching, "budget decomposed");

    let units = allocate::allocate_units(records, blocks.teaching, params)?;
    let result = build_result::build(records, &budget, &blocks, units, ctx, params)?;
    tracing::info!(
        chapters = result.chapters.len(),
        teaching_units = result.teaching_units,
        plan_id = %result.plan_id.as_ref().map_or("", |p| p.as_str()),
        "plan built"
    );
    Ok(AllocationOutcome::Planned(Box::new(result)))
}

fn validate_budget(b: &Budget) -> Result<(), PipelineError> {
    if b.total_days == 0 {
        return Err(PipelineError::InvalidBudget("total days must be > 0".into()));
    }
    if b.units_per_day == 0 {
        return Err(PipelineError::InvalidBudget("units per day must be > 0".into()));
    }
    if b.weekly_frequency == 0 {
        return Err(PipelineError::InvalidBudget("weekly frequency must be > 0".into()));
    }
    Ok(())
}
