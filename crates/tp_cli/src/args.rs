// crates/tp_cli/src/args.rs
//
// Deterministic, offline CLI argument surface.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - Planning needs --grade, --subject and --days; --list and --validate-only do not
// - --syllabus may be omitted; well-known locations are tried in order
// - Output: --out dir (plan.json), --print for a table on stdout

use clap::Parser;
use std::path::{Path, PathBuf};

use tp_core::variables::AllocationStrategy;

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "tp",
    disable_help_subcommand = true,
    about = "Offline, deterministic term planner: split a school year across syllabus chapters"
)]
pub struct Args {
    // --- Inputs ---
    /// Syllabus sheet (.tsv tab-separated, anything else comma-separated).
    #[arg(long)]
    pub syllabus: Option<PathBuf>,
    /// PlanParams JSON path (defaults apply when omitted).
    #[arg(long)]
    pub params: Option<PathBuf>,

    // --- Selection & budget ---
    /// Grade/class exactly as written in the syllabus ("7", "Class 9", "LKG").
    #[arg(long)]
    pub grade: Option<String>,
    /// Subject exactly as written in the syllabus.
    #[arg(long)]
    pub subject: Option<String>,
    /// Working days in the year.
    #[arg(long)]
    pub days: Option<u64>,
    /// Periods per day (overrides params.periods_per_day).
    #[arg(long)]
    pub units_per_day: Option<u32>,
    /// Allocation strategy: proportional | minimum-required.
    #[arg(long, value_parser = parse_strategy)]
    pub strategy: Option<AllocationStrategy>,

    // --- Output ---
    /// Output directory for plan.json (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
    /// Print a chapter table to stdout.
    #[arg(long)]
    pub print: bool,

    // --- Control ---
    /// Exit non-zero when the plan carries capacity warnings.
    #[arg(long)]
    pub strict: bool,
    /// Load and check inputs only; do not plan.
    #[arg(long)]
    pub validate_only: bool,
    /// List grades and their subjects found in the syllabus, then exit.
    #[arg(long, conflicts_with = "validate_only")]
    pub list: bool,
    /// Only warnings and errors on stderr.
    #[arg(long)]
    pub quiet: bool,
}

impl Args {
    pub fn plans(&self) -> bool {
        !self.list && !self.validate_only
    }
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    Missing(&'static str),
    NonLocalPath(String),
    NotFound(String),
    BadValue(&'static str, String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            Missing(s) => write!(f, "missing required flag: {s}"),
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadValue(flag, v) => write!(f, "invalid value for {flag}: {v}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Accepts the wire token (`minimum_required`) and the dashed spelling.
pub fn parse_strategy(s: &str) -> Result<AllocationStrategy, String> {
    s.trim()
        .replace('-', "_")
        .parse::<AllocationStrategy>()
        .map_err(|_| "expected proportional | minimum-required".to_string())
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
pub fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match std::fs::metadata(p) {
        Ok(m) if m.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    validate(Args::parse())
}

pub fn validate(args: Args) -> Result<Args, CliError> {
    for p in [args.syllabus.as_deref(), args.params.as_deref(), Some(args.out.as_path())]
        .into_iter()
        .flatten()
    {
        ensure_local_path(p)?;
    }
    if let Some(s) = &args.syllabus {
        ensure_local_exists(s, "--syllabus")?;
    }
    if let Some(p) = &args.params {
        ensure_local_exists(p, "--params")?;
    }

    if args.plans() {
        let grade = args.grade.as_deref().ok_or(CliError::Missing("--grade"))?;
        let subject = args.subject.as_deref().ok_or(CliError::Missing("--subject"))?;
        let days = args.days.ok_or(CliError::Missing("--days"))?;
        if grade.trim().is_empty() {
            return Err(CliError::BadValue("--grade", grade.to_string()));
        }
        if subject.trim().is_empty() {
            return Err(CliError::BadValue("--subject", subject.to_string()));
        }
        if days == 0 {
            return Err(CliError::BadValue("--days", "must be > 0".into()));
        }
    }
    if args.units_per_day == Some(0) {
        return Err(CliError::BadValue("--units-per-day", "must be > 0".into()));
    }
    Ok(args)
}
