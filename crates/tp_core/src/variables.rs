//! variables.rs — Engine constants as one `PlanParams` snapshot with safe defaults.
//!
//! Everything the allocation engine treats as a "configuration constant"
//! lives here: block ratios, band profiles, weight bounds, weekly subject
//! frequencies. Validation helpers are at the bottom of the file.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::band::Band;

/// ------------ Macros ------------

/// Define an enum with explicit wire tokens (serde derives are feature-gated).
macro_rules! wire_enum {
    ($(#[$m:meta])* $name:ident => { $($variant:ident = $token:expr),+ $(,)? }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $token, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = crate::errors::CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($token) {
                        return Ok($name::$variant);
                    }
                )+
                Err(crate::errors::CoreError::DomainOutOfRange(stringify!($name)))
            }
        }
    };
}

wire_enum!(
    /// How the teaching block is shared out across chapters.
    AllocationStrategy => {
        Proportional    = "proportional",
        MinimumRequired = "minimum_required"
    }
);

wire_enum!(
    /// Categorical blocks of the yearly budget.
    BlockKind => {
        Teaching   = "teaching",
        Revision   = "revision",
        Assessment = "assessment",
        Exams      = "exams",
        Buffer     = "buffer"
    }
);

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Teaching,
        BlockKind::Revision,
        BlockKind::Assessment,
        BlockKind::Exams,
        BlockKind::Buffer,
    ];
}

/// ------------ Newtypes with invariants ------------

/// Whole percent, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pct(u8);

impl Pct {
    pub fn new(v: u8) -> Result<Self, String> {
        if v <= 100 { Ok(Self(v)) } else { Err(format!("pct out of range: {v}")) }
    }
    pub const fn as_u8(self) -> u8 { self.0 }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Pct {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as _, Unexpected};
        let v = u8::deserialize(d)?;
        if v <= 100 { Ok(Pct(v)) }
        else { Err(D::Error::invalid_value(Unexpected::Unsigned(v as u64), &"0..=100")) }
    }
}

/// ------------ Complex shapes ------------

/// Fixed share of the total budget per block. Must sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockRatios {
    pub teaching: Pct,
    pub revision: Pct,
    pub assessment: Pct,
    pub exams: Pct,
    pub buffer: Pct,
}

impl BlockRatios {
    pub fn get(&self, kind: BlockKind) -> Pct {
        match kind {
            BlockKind::Teaching => self.teaching,
            BlockKind::Revision => self.revision,
            BlockKind::Assessment => self.assessment,
            BlockKind::Exams => self.exams,
            BlockKind::Buffer => self.buffer,
        }
    }

    pub fn total(&self) -> u32 {
        BlockKind::ALL.iter().map(|k| self.get(*k).as_u8() as u32).sum()
    }
}

impl Default for BlockRatios {
    fn default() -> Self {
        Self {
            teaching: Pct(65),
            revision: Pct(10),
            assessment: Pct(10),
            exams: Pct(10),
            buffer: Pct(5),
        }
    }
}

/// Per-band load: the base units every chapter starts from, and the absolute
/// floor no chapter may be scaled below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandProfile {
    pub base_units: u32,
    pub floor_units: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandProfiles {
    pub primary: BandProfile,
    pub middle: BandProfile,
    pub secondary: BandProfile,
}

impl BandProfiles {
    pub fn get(&self, band: Band) -> BandProfile {
        match band {
            Band::Primary => self.primary,
            Band::Middle => self.middle,
            Band::Secondary => self.secondary,
        }
    }
}

impl Default for BandProfiles {
    fn default() -> Self {
        Self {
            primary: BandProfile { base_units: 6, floor_units: 6 },
            middle: BandProfile { base_units: 10, floor_units: 10 },
            secondary: BandProfile { base_units: 14, floor_units: 14 },
        }
    }
}

/// Inclusive `[min, max]` clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    #[inline]
    pub fn clamp(self, v: u32) -> u32 {
        v.max(self.min).min(self.max)
    }
}

/// Accepted header spellings per canonical syllabus column (lowercase).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnAliases {
    pub grade: Vec<String>,
    pub subject: Vec<String>,
    pub chapter: Vec<String>,
    pub learning_outcome: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        fn v(xs: &[&str]) -> Vec<String> { xs.iter().map(|s| s.to_string()).collect() }
        Self {
            grade: v(&["grade", "class"]),
            subject: v(&["subject"]),
            chapter: v(&["chapter", "chapter name", "lesson"]),
            learning_outcome: v(&["learning outcome", "learning outcomes", "lo"]),
        }
    }
}

/// ------------ Params ------------

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PlanParams {
    /// Schedulable periods in one working day.
    pub periods_per_day: u32,
    pub block_ratios: BlockRatios,
    pub band_profiles: BandProfiles,
    /// Mandatory integration periods added to every chapter's requirement.
    pub integration_units: u32,
    /// Clamp applied to the raw learning-outcome count.
    pub weight_bounds: Bounds,
    /// Subject name → periods per week.
    pub weekly_frequency: BTreeMap<String, u32>,
    pub default_weekly_frequency: u32,
    /// Band used when a grade token carries no class number.
    pub default_band: Band,
    pub strategy: AllocationStrategy,
    /// Clamp for the per-chapter suggested day count.
    pub suggested_days: Bounds,
    pub columns: ColumnAliases,
}

impl Default for PlanParams {
    fn default() -> Self {
        let weekly_frequency = [
            ("Science", 5),
            ("Mathematics", 5),
            ("English", 5),
            ("Social Science", 4),
            ("Hindi", 4),
            ("Language", 4),
            ("Computer", 2),
            ("GK", 2),
            ("EVS", 5),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            periods_per_day: 8,
            block_ratios: BlockRatios::default(),
            band_profiles: BandProfiles::default(),
            integration_units: 3,
            weight_bounds: Bounds { min: 1, max: 5 },
            weekly_frequency,
            default_weekly_frequency: 4,
            default_band: Band::Primary,
            strategy: AllocationStrategy::Proportional,
            suggested_days: Bounds { min: 3, max: 7 },
            columns: ColumnAliases::default(),
        }
    }
}

impl PlanParams {
    /// Weekly periods for a subject.
    ///
    /// Case-insensitive exact key first; otherwise the longest key contained
    /// in the subject name; otherwise `default_weekly_frequency`.
    ///
    /// This is not a first-match scan: scanning keys in table order and taking
    /// the first contained one resolves "Social Science" to Science (5 a week)
    /// instead of its own entry (4). The longest contained key is the most
    /// specific subject name, so it decides.
    pub fn weekly_frequency_for(&self, subject: &str) -> u32 {
        let subject_lc = subject.trim().to_lowercase();
        if let Some((_, &f)) = self
            .weekly_frequency
            .iter()
            .find(|(k, _)| k.to_lowercase() == subject_lc)
        {
            return f;
        }
        let mut best: Option<(usize, u32)> = None;
        for (k, &f) in &self.weekly_frequency {
            let k_lc = k.to_lowercase();
            if !k_lc.is_empty() && subject_lc.contains(&k_lc) {
                // Strictly longer wins; equal length keeps the earlier key.
                if best.map_or(true, |(len, _)| k_lc.len() > len) {
                    best = Some((k_lc.len(), f));
                }
            }
        }
        best.map_or(self.default_weekly_frequency, |(_, f)| f)
    }

    pub fn band_for_grade(&self, grade: &str) -> Band {
        Band::from_grade_token(grade, self.default_band)
    }
}

/// -------- Validation (domain + cross-field consistency) --------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarsError {
    Domain(String),
    Consistency(String),
}

impl fmt::Display for VarsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarsError::Domain(m) => write!(f, "domain: {m}"),
            VarsError::Consistency(m) => write!(f, "consistency: {m}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VarsError {}

pub type VarsResult<T> = Result<T, VarsError>;

impl PlanParams {
    /// Validate numeric domains and cross-field consistency.
    pub fn validate_domains(&self) -> VarsResult<()> {
        if self.periods_per_day == 0 {
            return Err(VarsError::Domain("periods_per_day must be > 0".into()));
        }
        let total = self.block_ratios.total();
        if total != 100 {
            return Err(VarsError::Consistency(format!(
                "block_ratios must sum to 100, got {total}"
            )));
        }
        if self.block_ratios.teaching.as_u8() == 0 {
            return Err(VarsError::Domain("block_ratios.teaching must be > 0".into()));
        }
        for (name, b) in [("weight_bounds", self.weight_bounds), ("suggested_days", self.suggested_days)] {
            if b.min == 0 || b.min > b.max {
                return Err(VarsError::Domain(format!(
                    "{name} must satisfy 1 <= min <= max, got [{}, {}]",
                    b.min, b.max
                )));
            }
        }
        if self.default_weekly_frequency == 0 {
            return Err(VarsError::Domain("default_weekly_frequency must be > 0".into()));
        }
        let zero_freq: Vec<&str> = self
            .weekly_frequency
            .iter()
            .filter(|(_, f)| **f == 0)
            .map(|(k, _)| k.as_str())
            .collect();
        if !zero_freq.is_empty() {
            return Err(VarsError::Domain(format!(
                "weekly_frequency must be > 0 for: {}",
                zero_freq.join(", ")
            )));
        }
        for (name, aliases) in [
            ("grade", &self.columns.grade),
            ("subject", &self.columns.subject),
            ("chapter", &self.columns.chapter),
            ("learning_outcome", &self.columns.learning_outcome),
        ] {
            if aliases.is_empty() || aliases.iter().any(|a| a.trim().is_empty()) {
                return Err(VarsError::Domain(format!(
                    "columns.{name} needs at least one non-empty alias"
                )));
            }
        }
        Ok(())
    }

    /// Lowercase/trim column aliases so header matching is exact afterwards.
    pub fn normalize_columns(&mut self) {
        for aliases in [
            &mut self.columns.grade,
            &mut self.columns.subject,
            &mut self.columns.chapter,
            &mut self.columns.learning_outcome,
        ] {
            let mut seen: Vec<String> = vec![];
            for a in aliases.drain(..) {
                let a = a.trim().to_lowercase();
                if !seen.contains(&a) {
                    seen.push(a);
                }
            }
            *aliases = seen;
        }
    }
}
