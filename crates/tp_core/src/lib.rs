//! tp_core — Core types, domains, ordering helpers, and integer-first rounding.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`tp_algo`, `tp_io`, `tp_pipeline`, `tp_cli`).
//!
//! - Output IDs: `PLAN:`
//! - Input tokens: `ChapterId`
//! - Grade bands: `Band` (primary / middle / secondary)
//! - Engine constants: `PlanParams` (ratios, band profiles, weekly frequencies)
//! - Integer-first numerics (`Tenths`, half-even rounding)
//! - Explicit per-chapter day progression (`Locked → Unlocked → Completed`)
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidId,
        InvalidToken,
        InvalidBand,
        ZeroDenominator,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidBand => write!(f, "invalid band"),
                CoreError::ZeroDenominator => write!(f, "zero denominator"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod band;
pub mod determinism;
pub mod ids;
pub mod progress;
pub mod rounding;
pub mod variables;

pub use band::Band;
pub use errors::CoreError;
pub use ids::{ChapterId, PlanId};
pub use rounding::Tenths;
pub use variables::{AllocationStrategy, PlanParams};
