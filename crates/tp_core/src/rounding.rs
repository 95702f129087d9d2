//! Integer-first ratio helpers and a one-decimal fixed-point type.
//!
//! - Pure integer math; no float arithmetic on the decision path.
//! - Deterministic across OS/arch.
//! - Rounding only where explicitly allowed (nearest-even, one decimal).

use core::fmt;

use crate::errors::CoreError;

/// `floor(value * pct / 100)` without going through floats.
#[inline]
pub fn floor_percent(value: u64, pct: u8) -> u64 {
    ((value as u128 * pct as u128) / 100) as u64
}

/// Round `num / den` to the nearest integer, ties to even.
pub fn round_half_even(num: u128, den: u128) -> Result<u128, CoreError> {
    if den == 0 {
        return Err(CoreError::ZeroDenominator);
    }
    let q = num / den;
    let r = num % den;
    let twice = r * 2;
    let up = twice > den || (twice == den && q % 2 == 1);
    Ok(if up { q + 1 } else { q })
}

/// Non-negative decimal with exactly one fractional digit, stored as tenths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tenths(u64);

impl Tenths {
    pub const ZERO: Tenths = Tenths(0);

    #[inline]
    pub const fn from_tenths(t: u64) -> Self {
        Tenths(t)
    }

    /// `num / den` rounded half-even to one decimal.
    pub fn from_ratio(num: u64, den: u64) -> Result<Self, CoreError> {
        let t = round_half_even(num as u128 * 10, den as u128)?;
        Ok(Tenths(t.min(u64::MAX as u128) as u64))
    }

    #[inline]
    pub const fn tenths(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

// Serialized as a JSON number (4.2), not as the raw tenths count.
#[cfg(feature = "serde")]
impl serde::Serialize for Tenths {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_f64(self.as_f64())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tenths {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::{Error as _, Unexpected};
        let v = f64::deserialize(d)?;
        if !v.is_finite() || v < 0.0 || v > (u64::MAX / 20) as f64 {
            return Err(D::Error::invalid_value(Unexpected::Float(v), &"finite non-negative decimal"));
        }
        let scaled = v * 10.0;
        let whole = scaled as u64;
        let frac = scaled - whole as f64;
        let up = frac > 0.5 || (frac == 0.5 && whole % 2 == 1);
        Ok(Tenths(if up { whole + 1 } else { whole }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_even_ties() {
        assert_eq!(round_half_even(5, 2).unwrap(), 2); // 2.5 -> 2
        assert_eq!(round_half_even(7, 2).unwrap(), 4); // 3.5 -> 4
        assert_eq!(round_half_even(7, 3).unwrap(), 2);
        assert_eq!(round_half_even(8, 3).unwrap(), 3);
        assert_eq!(round_half_even(1, 0), Err(CoreError::ZeroDenominator));
    }

    #[test]
    fn tenths_from_ratio() {
        assert_eq!(Tenths::from_ratio(21, 5).unwrap().tenths(), 42);
        assert_eq!(Tenths::from_ratio(10, 3).unwrap().tenths(), 33);
        assert_eq!(Tenths::from_ratio(1, 4).unwrap().tenths(), 2); // 0.25 -> 0.2
        assert_eq!(Tenths::from_ratio(3, 4).unwrap().tenths(), 8); // 0.75 -> 0.8
        assert_eq!(Tenths::from_ratio(0, 4).unwrap(), Tenths::ZERO);
        assert!(Tenths::from_ratio(1, 0).is_err());
    }

    #[test]
    fn display_one_decimal() {
        assert_eq!(Tenths::from_tenths(42).to_string(), "4.2");
        assert_eq!(Tenths::from_tenths(30).to_string(), "3.0");
        assert_eq!(Tenths::from_tenths(5).to_string(), "0.5");
    }

    #[test]
    fn percent_floor() {
        assert_eq!(floor_percent(1440, 65), 936);
        assert_eq!(floor_percent(1441, 5), 72);
        assert_eq!(floor_percent(0, 65), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_decimal_number() {
        let s = serde_json::to_string(&Tenths::from_tenths(42)).unwrap();
        assert_eq!(s, "4.2");
        let back: Tenths = serde_json::from_str("4.2").unwrap();
        assert_eq!(back.tenths(), 42);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_ties_round_half_even() {
        let t = |s: &str| serde_json::from_str::<Tenths>(s).unwrap().tenths();
        assert_eq!(t("0.25"), 2);
        assert_eq!(t("0.75"), 8);
        assert_eq!(t("0.26"), 3);
        assert_eq!(Tenths::from_ratio(1, 4).unwrap().tenths(), t("0.25"));
    }
}
