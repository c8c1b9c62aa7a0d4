use crate::model::{DoctorId, Month, Roster};
use chrono::NaiveDate;
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Push yesterday's assignee to the back of today's ranking unless they
    /// are the only candidate.
    pub avoid_back_to_back: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            avoid_back_to_back: true,
        }
    }
}

/// Terminal outcome of a generation run. The two variants are mutually
/// exclusive: `Complete` covers every date, `PartiallyCovered` names every
/// gap explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Complete(Roster),
    PartiallyCovered {
        roster: Roster,
        uncovered: Vec<NaiveDate>,
    },
}

impl SolveOutcome {
    pub fn roster(&self) -> &Roster {
        match self {
            Self::Complete(r) => r,
            Self::PartiallyCovered { roster, .. } => roster,
        }
    }

    pub fn uncovered(&self) -> &[NaiveDate] {
        match self {
            Self::Complete(_) => &[],
            Self::PartiallyCovered { uncovered, .. } => uncovered,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Assigned on a date the doctor marked unavailable.
    UnavailableAssignment,
    /// Assigned to a doctor no longer active.
    InactiveAssignment,
    /// Cell references a doctor missing from the registry.
    UnknownDoctor,
}

/// One hard-constraint breach found by the roster audit.
#[derive(Debug, Clone)]
pub struct Violation {
    pub date: NaiveDate,
    pub doctor: DoctorId,
    pub kind: ViolationKind,
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("doctor does not resolve to an active doctor: {0}")]
    InvalidDoctor(String),
    #[error("doctor is deactivated: {0}")]
    InactiveDoctor(String),
    #[error("invalid month token: {0}")]
    InvalidMonth(String),
    #[error("date {date} is outside month {month}")]
    DateOutOfRange { date: NaiveDate, month: Month },
    #[error("dates listed both unavailable and preferred: {0:?}")]
    ConflictingDateSets(Vec<NaiveDate>),
    #[error("desired shift count {got} not in 0..={max}")]
    InvalidShiftCount { got: i64, max: u32 },
    #[error("initials already used by an active doctor: {0}")]
    DuplicateInitials(String),
    #[error("doctor name and initials must be non-empty")]
    EmptyDoctorFields,
    #[error("no roster generated yet for month {0}")]
    MonthNotGenerated(Month),
    #[error("doctor {doctor} marked {date} unavailable")]
    DoctorUnavailable { doctor: String, date: NaiveDate },
    #[error("nothing to generate for {0}: no active doctors or no submissions")]
    NoData(Month),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
