#![forbid(unsafe_code)]
//! Nightroster — MICU night-shift roster library (no database).
//!
//! - File storage (JSON/CSV), atomic writes.
//! - Debt-based fair generation over one calendar month.
//! - Hard unavailability constraints, soft preferences, manual overrides.
//! - Deterministic: identical inputs produce identical rosters.

pub mod export;
pub mod io;
pub mod model;
pub mod scheduler;
pub mod storage;

pub use export::{coverage_summary, doctor_ics, month_report, CoverageRow};
pub use model::{Board, Doctor, DoctorId, Month, Preference, Roster};
pub use scheduler::{
    RankKey, RosterError, Scheduler, SolveOptions, SolveOutcome, Violation, ViolationKind,
};
pub use storage::{JsonStorage, Storage};
