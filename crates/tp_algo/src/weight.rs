//! Chapter weight and minimum-requirement calculation.
//!
//! The raw signal is the number of distinct learning outcomes a chapter
//! carries. It is clamped into the configured weight bounds; the band
//! contributes a base load and an absolute floor.

use tp_core::band::Band;
use tp_core::variables::{Bounds, PlanParams};

/// Clamp a raw outcome count into `bounds` (default `[1, 5]`).
#[inline]
pub fn extract_weight(raw_count: u32, bounds: Bounds) -> u32 {
    bounds.clamp(raw_count)
}

/// Band-aware calculations over one parameter snapshot.
#[derive(Clone, Copy, Debug)]
pub struct WeightExtractor<'a> {
    params: &'a PlanParams,
}

impl<'a> WeightExtractor<'a> {
    pub fn new(params: &'a PlanParams) -> Self {
        Self { params }
    }

    /// Bounded weight. The band does not change the clamp; it is accepted so
    /// callers can treat weight and requirement uniformly.
    pub fn weight(&self, raw_count: u32, _band: Band) -> u32 {
        extract_weight(raw_count, self.params.weight_bounds)
    }

    /// `base(band) + weight + integration_units`, raised to the band floor.
    pub fn min_required_units(&self, raw_count: u32, band: Band) -> u64 {
        let profile = self.params.band_profiles.get(band);
        let need = profile.base_units as u64
            + self.weight(raw_count, band) as u64
            + self.params.integration_units as u64;
        need.max(profile.floor_units as u64)
    }

    pub fn band_floor(&self, band: Band) -> u64 {
        self.params.band_profiles.get(band).floor_units as u64
    }

    /// Teaching days suggested for a chapter, one per outcome within bounds.
    pub fn suggested_days(&self, raw_count: u32) -> u32 {
        self.params.suggested_days.clamp(raw_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tp_core::variables::BandProfile;

    #[test]
    fn weight_is_clamped() {
        let b = Bounds { min: 1, max: 5 };
        assert_eq!(extract_weight(0, b), 1);
        assert_eq!(extract_weight(3, b), 3);
        assert_eq!(extract_weight(12, b), 5);
    }

    #[test]
    fn min_required_per_band() {
        let p = PlanParams::default();
        let w = WeightExtractor::new(&p);
        // 6 + 3 + 3
        assert_eq!(w.min_required_units(3, Band::Primary), 12);
        // 10 + 5 + 3
        assert_eq!(w.min_required_units(9, Band::Middle), 18);
        // 14 + 1 + 3
        assert_eq!(w.min_required_units(0, Band::Secondary), 18);
    }

    #[test]
    fn min_required_respects_floor() {
        let mut p = PlanParams::default();
        p.band_profiles.primary = BandProfile { base_units: 1, floor_units: 20 };
        let w = WeightExtractor::new(&p);
        assert_eq!(w.min_required_units(2, Band::Primary), 20);
        assert_eq!(w.band_floor(Band::Primary), 20);
    }

    #[test]
    fn suggested_days_bounds() {
        let p = PlanParams::default();
        let w = WeightExtractor::new(&p);
        assert_eq!(w.suggested_days(1), 3);
        assert_eq!(w.suggested_days(5), 5);
        assert_eq!(w.suggested_days(11), 7);
    }
}
