//! Grade bands. A band decides a chapter's base load and its absolute floor.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Band {
    /// Classes 1–5 (and pre-primary, by default).
    Primary,
    /// Classes 6–8.
    Middle,
    /// Classes 9 and up.
    Secondary,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Primary, Band::Middle, Band::Secondary];

    pub fn as_str(self) -> &'static str {
        match self {
            Band::Primary => "primary",
            Band::Middle => "middle",
            Band::Secondary => "secondary",
        }
    }

    pub fn from_grade_number(grade: u32) -> Band {
        match grade {
            0..=5 => Band::Primary,
            6..=8 => Band::Middle,
            _ => Band::Secondary,
        }
    }

    /// Resolve a raw grade token ("7", "Class 9", "LKG", ...) to a band.
    /// Tokens that carry no class number fall back to `default`.
    pub fn from_grade_token(token: &str, default: Band) -> Band {
        parse_grade_number(token).map_or(default, Band::from_grade_number)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Band {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Band::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s))
            .ok_or(CoreError::InvalidBand)
    }
}

/// Extract the class number from a grade token. Accepts an optional
/// case-insensitive `class`/`grade` prefix; anything else yields `None`.
pub fn parse_grade_number(token: &str) -> Option<u32> {
    let t = token.trim();
    let t = strip_prefix_ci(t, "class")
        .or_else(|| strip_prefix_ci(t, "grade"))
        .unwrap_or(t)
        .trim_start_matches([' ', '-', '_'])
        .trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    t.parse().ok()
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let n = prefix.len();
    if s.len() >= n && s.is_char_boundary(n) && s[..n].eq_ignore_ascii_case(prefix) {
        Some(&s[n..])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(Band::from_grade_number(1), Band::Primary);
        assert_eq!(Band::from_grade_number(5), Band::Primary);
        assert_eq!(Band::from_grade_number(6), Band::Middle);
        assert_eq!(Band::from_grade_number(8), Band::Middle);
        assert_eq!(Band::from_grade_number(9), Band::Secondary);
        assert_eq!(Band::from_grade_number(12), Band::Secondary);
    }

    #[test]
    fn grade_tokens() {
        assert_eq!(parse_grade_number(" 7 "), Some(7));
        assert_eq!(parse_grade_number("Class 10"), Some(10));
        assert_eq!(parse_grade_number("GRADE-3"), Some(3));
        assert_eq!(parse_grade_number("LKG"), None);
        assert_eq!(parse_grade_number("7A"), None);
        assert_eq!(parse_grade_number(""), None);
    }

    #[test]
    fn non_numeric_grades_fall_back_to_default() {
        assert_eq!(Band::from_grade_token("Nursery", Band::Primary), Band::Primary);
        assert_eq!(Band::from_grade_token("UKG", Band::Middle), Band::Middle);
        assert_eq!(Band::from_grade_token("class 9", Band::Primary), Band::Secondary);
    }

    #[test]
    fn parse_band_names() {
        assert_eq!("Middle".parse::<Band>().unwrap(), Band::Middle);
        assert!("tertiary".parse::<Band>().is_err());
    }
}
