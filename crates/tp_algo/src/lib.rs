// crates/tp_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use tp_core::{band::Band, ids::ChapterId};

// ----------------------------- Weights & budget ---------------------------------------

pub mod budget;
pub mod units;
pub mod weight;

pub use budget::{decompose, BudgetBlocks, BudgetError};
pub use units::{to_weeks, ConvertError};
pub use weight::{extract_weight, WeightExtractor};

// ----------------------------- Allocation (public surface) ---------------------------

pub mod allocation {
    use core::fmt;

    // File modules (actual implementations)
    pub mod largest_remainder;
    pub mod overflow;

    pub use largest_remainder::{allocate_proportional, Apportionment};
    pub use overflow::{normalize_overflow, NormalizeOutcome};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum AllocError {
        /// No chapters to allocate across.
        EmptyItemSet,
        /// Every weight is zero, so shares are undefined.
        ZeroTotalWeight,
    }

    impl fmt::Display for AllocError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                AllocError::EmptyItemSet => write!(f, "no items to allocate"),
                AllocError::ZeroTotalWeight => write!(f, "total weight is zero"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for AllocError {}

    /// Per-chapter floors need more units than the capacity holds. Attached to
    /// a best-effort (over-committed) result rather than failing it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct CapacityInfeasible {
        /// Units the floors alone require.
        pub required: u64,
        pub capacity: u64,
    }

    impl fmt::Display for CapacityInfeasible {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "capacity infeasible: floors need {} units but only {} are available",
                self.required, self.capacity
            )
        }
    }
}

pub use allocation::{AllocError, CapacityInfeasible};
