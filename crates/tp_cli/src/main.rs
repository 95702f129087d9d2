// crates/tp_cli/src/main.rs
//
// Offline, deterministic term planner.
// - Loads params (JSON, optional) and the syllabus sheet (TSV/CSV)
// - Plans one grade/subject: budget → blocks → per-chapter allocation
// - Writes plan.json as canonical JSON; --print adds a table on stdout
// - Exit codes are stable (see `exitcodes`)

mod args;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tp_core::variables::PlanParams;
use tp_io::IoError;
use tp_pipeline::{plan_for, AllocationOutcome, AllocationResult, PipelineError, PlanRequest};

use crate::args::{parse_and_validate, Args};

mod exitcodes {
    pub const OK: u8 = 0;
    pub const VALIDATION: u8 = 2; // bad flags, params, syllabus layout, budget
    pub const IO: u8 = 4; // read/write failures
    pub const STRICT: u8 = 5; // allocation failure, or warnings under --strict
}

#[derive(Debug)]
enum MainError {
    Validation(String),
    Io(String),
    Strict(String),
}

impl MainError {
    fn code(&self) -> u8 {
        match self {
            MainError::Validation(_) => exitcodes::VALIDATION,
            MainError::Io(_) => exitcodes::IO,
            MainError::Strict(_) => exitcodes::STRICT,
        }
    }
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) => write!(f, "validation: {m}"),
            MainError::Io(m) => write!(f, "io: {m}"),
            MainError::Strict(m) => write!(f, "strict: {m}"),
        }
    }
}

fn main() -> ExitCode {
    let args = match parse_and_validate() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(exitcodes::VALIDATION);
        }
    };
    logging::init(args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(e.code())
        }
    }
}

fn run(args: &Args) -> Result<(), MainError> {
    let params = match &args.params {
        Some(p) => tp_io::params::load_params(p).map_err(map_io_err)?,
        None => PlanParams::default(),
    };

    let sheet = syllabus_path(args)?;
    let syllabus = tp_pipeline::load::read_syllabus(&sheet, &params).map_err(map_pipeline_err)?;
    tracing::info!(path = %sheet.display(), rows = syllabus.len(), "syllabus loaded");

    if args.list {
        for grade in syllabus.grades() {
            println!("{grade}: {}", syllabus.subjects_for(&grade).join(", "));
        }
        return Ok(());
    }
    if args.validate_only {
        println!("ok: {} rows, {} grades", syllabus.len(), syllabus.grades().len());
        return Ok(());
    }

    let req = PlanRequest {
        grade: args.grade.clone().unwrap_or_default(),
        subject: args.subject.clone().unwrap_or_default(),
        total_days: args.days.unwrap_or_default(),
        units_per_day: args.units_per_day,
        strategy: args.strategy,
    };
    let outcome = plan_for(&syllabus, &req, &params).map_err(map_pipeline_err)?;

    let out_path = write_artifacts(&args.out, &outcome)?;
    tracing::info!(path = %out_path.display(), "plan written");

    if args.print {
        print_outcome(&outcome);
    }

    let warnings = outcome.warnings();
    if args.strict && !warnings.is_empty() {
        return Err(MainError::Strict(format!("{} capacity warning(s)", warnings.len())));
    }
    Ok(())
}

fn syllabus_path(args: &Args) -> Result<PathBuf, MainError> {
    match &args.syllabus {
        Some(p) => Ok(p.clone()),
        None => tp_io::syllabus::discover(&tp_io::syllabus::DEFAULT_CANDIDATES[..]).map_err(map_io_err),
    }
}

fn write_artifacts(out_dir: &Path, outcome: &AllocationOutcome) -> Result<PathBuf, MainError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| MainError::Io(format!("create {}: {e}", out_dir.display())))?;
    let path = out_dir.join("plan.json");
    tp_io::canonical_json::write_canonical(&path, outcome).map_err(map_io_err)?;
    Ok(path)
}

fn print_outcome(outcome: &AllocationOutcome) {
    match outcome {
        AllocationOutcome::NoData(nd) => println!("{}", nd.message),
        AllocationOutcome::Planned(r) => print_table(r),
    }
}

fn print_table(r: &AllocationResult) {
    let width = r
        .chapters
        .iter()
        .map(|c| c.chapter_id.as_str().chars().count())
        .max()
        .unwrap_or(0)
        .max("Chapter".len());

    println!(
        "{} / {}: {} days x {} = {} units, teaching {} ({}), {} per week",
        r.grade.as_deref().unwrap_or("-"),
        r.subject.as_deref().unwrap_or("-"),
        r.total_days,
        r.units_per_day,
        r.total_units,
        r.teaching_units,
        r.strategy,
        r.weekly_frequency,
    );
    println!("{:<width$}  {:>3}  {:>6}  {:>5}  {:>5}  {:>6}  {:>4}", "Chapter", "LOs", "Weight", "Min", "Units", "Weeks", "Days");
    for c in &r.chapters {
        println!(
            "{:<width$}  {:>3}  {:>6}  {:>5}  {:>5}  {:>6}  {:>4}",
            c.chapter_id.as_str(),
            c.raw_outcome_count,
            c.weight,
            c.min_required_units,
            c.assigned_units,
            c.approx_weeks.to_string(),
            c.suggested_days,
        );
    }
    let b = &r.categorical_blocks;
    println!(
        "revision {}  assessment {}  exams {}  buffer {}",
        b.revision, b.assessment, b.exams, b.buffer
    );
    for w in &r.warnings {
        let tp_pipeline::PlanWarning::CapacityInfeasible { message, .. } = w;
        println!("warning: {message}");
    }
    if let Some(id) = &r.plan_id {
        println!("{id}");
    }
}

fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Path(m) => MainError::Io(m),
        other => MainError::Validation(other.to_string()),
    }
}

fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Io(io) => map_io_err(io),
        PipelineError::InvalidBudget(_) => MainError::Validation(e.to_string()),
        PipelineError::Allocate(_) => MainError::Strict(e.to_string()),
    }
}
