//! Per-chapter day progression: `Locked → Unlocked → Completed`.
//!
//! Exactly one day per chapter is unlocked at a time (the day after the last
//! completed one). The tracker is an explicit value owned by the caller's
//! session; nothing here is global.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::ChapterId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DayState {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressError {
    UnknownChapter(ChapterId),
    /// Day is outside `1..=total_days`.
    OutOfRange { day: u32, total_days: u32 },
    /// Only the currently unlocked day can be completed.
    NotUnlocked { day: u32, state: DayState },
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::UnknownChapter(c) => write!(f, "unknown chapter: {c}"),
            ProgressError::OutOfRange { day, total_days } => {
                write!(f, "day {day} outside 1..={total_days}")
            }
            ProgressError::NotUnlocked { day, state } => {
                write!(f, "day {day} is {state:?}, not unlocked")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProgressError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChapterProgress {
    total_days: u32,
    completed: u32,
}

impl ChapterProgress {
    pub fn new(total_days: u32) -> Self {
        Self { total_days, completed: 0 }
    }

    pub fn total_days(&self) -> u32 {
        self.total_days
    }

    pub fn completed_days(&self) -> u32 {
        self.completed
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total_days
    }

    pub fn state(&self, day: u32) -> Result<DayState, ProgressError> {
        if day == 0 || day > self.total_days {
            return Err(ProgressError::OutOfRange { day, total_days: self.total_days });
        }
        Ok(if day <= self.completed {
            DayState::Completed
        } else if day == self.completed + 1 {
            DayState::Unlocked
        } else {
            DayState::Locked
        })
    }

    /// The currently unlocked day, if any remain.
    pub fn next_day(&self) -> Option<u32> {
        (!self.is_finished()).then_some(self.completed + 1)
    }

    /// Days a teacher may open: every completed day plus the unlocked one.
    pub fn available_days(&self) -> Vec<u32> {
        let last = (self.completed + 1).min(self.total_days);
        (1..=last).collect()
    }

    pub fn complete(&mut self, day: u32) -> Result<(), ProgressError> {
        match self.state(day)? {
            DayState::Unlocked => {
                self.completed = day;
                Ok(())
            }
            state => Err(ProgressError::NotUnlocked { day, state }),
        }
    }
}

/// Progress across all chapters of one plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanProgress {
    chapters: BTreeMap<ChapterId, ChapterProgress>,
}

impl PlanProgress {
    pub fn from_day_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (ChapterId, u32)>,
    {
        Self {
            chapters: counts
                .into_iter()
                .map(|(id, days)| (id, ChapterProgress::new(days)))
                .collect(),
        }
    }

    pub fn chapter(&self, id: &ChapterId) -> Option<&ChapterProgress> {
        self.chapters.get(id)
    }

    pub fn state(&self, id: &ChapterId, day: u32) -> Result<DayState, ProgressError> {
        self.get(id)?.state(day)
    }

    pub fn complete(&mut self, id: &ChapterId, day: u32) -> Result<(), ProgressError> {
        self.chapters
            .get_mut(id)
            .ok_or_else(|| ProgressError::UnknownChapter(id.clone()))?
            .complete(day)
    }

    pub fn is_finished(&self) -> bool {
        self.chapters.values().all(ChapterProgress::is_finished)
    }

    fn get(&self, id: &ChapterId) -> Result<&ChapterProgress, ProgressError> {
        self.chapters
            .get(id)
            .ok_or_else(|| ProgressError::UnknownChapter(id.clone()))
    }
}
