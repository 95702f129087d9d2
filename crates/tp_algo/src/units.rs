//! Display transform: periods → approximate weeks (one decimal, half-even).

use core::fmt;

use tp_core::rounding::Tenths;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvertError {
    /// Weekly frequency was zero.
    DivisionUndefined,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::DivisionUndefined => write!(f, "weekly frequency must be > 0"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConvertError {}

pub fn to_weeks(units: u64, weekly_frequency: u32) -> Result<Tenths, ConvertError> {
    if weekly_frequency == 0 {
        return Err(ConvertError::DivisionUndefined);
    }
    Tenths::from_ratio(units, weekly_frequency as u64).map_err(|_| ConvertError::DivisionUndefined)
}
