//! Overflow renormalization of per-chapter minimum requirements.
//!
//! When the requirements fit, they pass through untouched (under-subscription
//! is fine). When `sum > capacity`, each is scaled by `capacity / sum`
//! (integer floor of `req * capacity / sum`) and raised back to the band
//! floor. If the floors alone exceed the capacity, the result is still
//! returned, over-committed, with a `CapacityInfeasible` warning.

use alloc::vec::Vec;

use tp_core::ids::ChapterId;

use super::{AllocError, CapacityInfeasible};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// `(chapter, units)` in input order.
    pub units: Vec<(ChapterId, u64)>,
    /// True when the requirements overflowed and were rescaled.
    pub scaled: bool,
    pub warning: Option<CapacityInfeasible>,
}

impl NormalizeOutcome {
    pub fn total(&self) -> u64 {
        self.units.iter().map(|(_, u)| *u).sum()
    }
}

pub fn normalize_overflow(
    min_required: &[(ChapterId, u64)],
    capacity: u64,
    band_floor: u64,
) -> Result<NormalizeOutcome, AllocError> {
    if min_required.is_empty() {
        return Err(AllocError::EmptyItemSet);
    }
    let sum: u128 = min_required.iter().map(|(_, u)| *u as u128).sum();
    if sum <= capacity as u128 {
        return Ok(NormalizeOutcome {
            units: min_required.to_vec(),
            scaled: false,
            warning: None,
        });
    }

    let cap = capacity as u128;
    let units = min_required
        .iter()
        .map(|(id, req)| {
            // req * cap / sum < req, so it fits in u64.
            let scaled = (*req as u128 * cap / sum) as u64;
            (id.clone(), scaled.max(band_floor))
        })
        .collect();

    let floors = band_floor as u128 * min_required.len() as u128;
    let warning = (floors > cap).then(|| CapacityInfeasible {
        required: floors.min(u64::MAX as u128) as u64,
        capacity,
    });

    Ok(NormalizeOutcome { units, scaled: true, warning })
}
