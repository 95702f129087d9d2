//! crates/tp_core/src/ids.rs
//! Chapter tokens (input) and plan ids (output). Strict shapes; no I/O.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const HEX64_LEN: usize = 64;
const CHAPTER_MAX_LEN: usize = 256;
const PLAN_PREFIX: &str = "PLAN:";

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == HEX64_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Chapter names come straight from curriculum sheets: free text, but trimmed,
/// non-empty, bounded, and without control characters.
#[inline]
pub fn is_valid_chapter_name(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= CHAPTER_MAX_LEN
        && s.trim() == s
        && !s.chars().any(char::is_control)
}

/// Opaque chapter identifier (the chapter name as it appears in the syllabus).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ChapterId(String);

impl ChapterId {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lenient constructor for sheet text: control characters become spaces,
    /// the result is trimmed and cut to the length bound on a char boundary.
    /// `None` only when nothing printable is left.
    pub fn normalized(raw: &str) -> Option<Self> {
        let cleaned: String = raw
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        let t = cleaned.trim();
        let mut end = t.len().min(CHAPTER_MAX_LEN);
        while !t.is_char_boundary(end) {
            end -= 1;
        }
        let t = t[..end].trim_end();
        if t.is_empty() {
            None
        } else {
            Some(Self(t.to_string()))
        }
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChapterId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if is_valid_chapter_name(t) {
            Ok(Self(t.to_string()))
        } else {
            Err(CoreError::InvalidToken)
        }
    }
}

impl TryFrom<String> for ChapterId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChapterId> for String {
    fn from(id: ChapterId) -> Self {
        id.0
    }
}

/// "PLAN:" + 64-hex (lowercase); digest of the canonical plan bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct PlanId(String);

impl PlanId {
    /// Build from a bare 64-hex digest.
    pub fn from_digest_hex(hex64: &str) -> Result<Self, CoreError> {
        if is_valid_sha256(hex64) {
            let mut s = String::with_capacity(PLAN_PREFIX.len() + HEX64_LEN);
            s.push_str(PLAN_PREFIX);
            s.push_str(hex64);
            Ok(Self(s))
        } else {
            Err(CoreError::InvalidId)
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digest part without the prefix.
    #[inline]
    pub fn digest_hex(&self) -> &str {
        &self.0[PLAN_PREFIX.len()..]
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlanId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix(PLAN_PREFIX).ok_or(CoreError::InvalidId)?;
        Self::from_digest_hex(rest)
    }
}

impl TryFrom<String> for PlanId {
    type Error = CoreError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PlanId> for String {
    fn from(id: PlanId) -> Self {
        id.0
    }
}
