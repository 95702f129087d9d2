//! Budget decomposition into fixed-ratio blocks.
//!
//! Each block is `floor(total * pct / 100)`; the flooring slack is left
//! unassigned (no remainder correction), so the blocks never exceed the total.

use core::fmt;

use tp_core::rounding::floor_percent;
use tp_core::variables::{BlockKind, BlockRatios};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetError {
    InvalidBudget,
}

impl fmt::Display for BudgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetError::InvalidBudget => write!(f, "invalid budget: total units must be > 0"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BudgetError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetBlocks {
    pub total_units: u64,
    pub teaching: u64,
    pub revision: u64,
    pub assessment: u64,
    pub exams: u64,
    pub buffer: u64,
}

impl BudgetBlocks {
    pub fn get(&self, kind: BlockKind) -> u64 {
        match kind {
            BlockKind::Teaching => self.teaching,
            BlockKind::Revision => self.revision,
            BlockKind::Assessment => self.assessment,
            BlockKind::Exams => self.exams,
            BlockKind::Buffer => self.buffer,
        }
    }

    /// Sum of all five blocks; at most `total_units`.
    pub fn assigned(&self) -> u64 {
        BlockKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Units lost to flooring.
    pub fn unassigned(&self) -> u64 {
        self.total_units - self.assigned()
    }
}

pub fn decompose(total_units: u64, ratios: &BlockRatios) -> Result<BudgetBlocks, BudgetError> {
    if total_units == 0 {
        return Err(BudgetError::InvalidBudget);
    }
    let block = |k: BlockKind| floor_percent(total_units, ratios.get(k).as_u8());
    Ok(BudgetBlocks {
        total_units,
        teaching: block(BlockKind::Teaching),
        revision: block(BlockKind::Revision),
        assessment: block(BlockKind::Assessment),
        exams: block(BlockKind::Exams),
        buffer: block(BlockKind::Buffer),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratios_on_a_full_year() {
        // 180 days x 8 periods
        let b = decompose(1440, &BlockRatios::default()).unwrap();
        assert_eq!(b.teaching, 936);
        assert_eq!(b.revision, 144);
        assert_eq!(b.assessment, 144);
        assert_eq!(b.exams, 144);
        assert_eq!(b.buffer, 72);
        assert_eq!(b.assigned(), 1440);
    }

    #[test]
    fn flooring_slack_is_left_unassigned() {
        let b = decompose(7, &BlockRatios::default()).unwrap();
        assert_eq!(b.teaching, 4);
        assert_eq!(b.revision, 0);
        assert_eq!(b.buffer, 0);
        assert!(b.assigned() <= 7);
        assert_eq!(b.unassigned(), 3);
    }

    #[test]
    fn zero_total_is_rejected() {
        assert_eq!(decompose(0, &BlockRatios::default()), Err(BudgetError::InvalidBudget));
    }
}
