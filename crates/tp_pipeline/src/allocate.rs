//! ALLOCATE stage: teaching units per chapter under the configured strategy.
//!
//! - `proportional`: Hamilton apportionment over bounded weights; sums to the
//!   teaching block exactly.
//! - `minimum_required`: per-chapter requirement, rescaled only on overflow;
//!   under-subscription is left as is. The floor used is the strictest band
//!   floor among the chapters.

use tp_algo::allocation::{allocate_proportional, normalize_overflow, CapacityInfeasible};
use tp_algo::WeightExtractor;
use tp_core::ids::ChapterId;
use tp_core::variables::{AllocationStrategy, PlanParams};

use crate::{ChapterWeightRecord, PipelineError};

/// Units per chapter (input order) plus any capacity warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedUnits {
    pub units: Vec<u64>,
    pub warning: Option<CapacityInfeasible>,
}

pub fn allocate_units(
    records: &[ChapterWeightRecord],
    teaching_units: u64,
    params: &PlanParams,
) -> Result<AllocatedUnits, PipelineError> {
    let wx = WeightExtractor::new(params);
    let (units, warning) = match params.strategy {
        AllocationStrategy::Proportional => {
            let items: Vec<(ChapterId, u32)> = records
                .iter()
                .map(|r| (r.chapter_id.clone(), wx.weight(r.raw_outcome_count, r.band)))
                .collect();
            let a = allocate_proportional(&items, teaching_units)?;
            (a.units, a.warning)
        }
        AllocationStrategy::MinimumRequired => {
            let items: Vec<(ChapterId, u64)> = records
                .iter()
                .map(|r| (r.chapter_id.clone(), wx.min_required_units(r.raw_outcome_count, r.band)))
                .collect();
            let floor = records.iter().map(|r| wx.band_floor(r.band)).max().unwrap_or(0);
            let o = normalize_overflow(&items, teaching_units, floor)?;
            if o.scaled {
                tracing::debug!(teaching_units, floor, "minimum requirements rescaled");
            }
            (o.units, o.warning)
        }
    };

    if let Some(w) = &warning {
        tracing::warn!(required = w.required, capacity = w.capacity, "{w}");
    }

    Ok(AllocatedUnits {
        units: units.into_iter().map(|(_, u)| u).collect(),
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::band::Band;

    fn recs(n: usize, raw: u32, band: Band) -> Vec<ChapterWeightRecord> {
        (0..n)
            .map(|i| ChapterWeightRecord {
                chapter_id: format!("Chapter {i}").parse().unwrap(),
                raw_outcome_count: raw,
                band,
            })
            .collect()
    }

    #[test]
    fn proportional_fills_the_block() {
        let a = allocate_units(&recs(3, 1, Band::Primary), 10, &PlanParams::default()).unwrap();
        assert_eq!(a.units, vec![4, 3, 3]);
        assert!(a.warning.is_none());
    }

    #[test]
    fn minimum_required_leaves_slack_when_it_fits() {
        let p = PlanParams { strategy: AllocationStrategy::MinimumRequired, ..PlanParams::default() };
        // primary: 6 + 2 + 3 = 11 each
        let a = allocate_units(&recs(4, 2, Band::Primary), 100, &p).unwrap();
        assert_eq!(a.units, vec![11; 4]);
        assert!(a.warning.is_none());
    }

    #[test]
    fn minimum_required_over_capacity_warns() {
        let p = PlanParams { strategy: AllocationStrategy::MinimumRequired, ..PlanParams::default() };
        let a = allocate_units(&recs(40, 1, Band::Secondary), 400, &p).unwrap();
        assert!(a.units.iter().all(|&u| u == 14));
        assert_eq!(a.warning, Some(CapacityInfeasible { required: 560, capacity: 400 }));
    }
}
