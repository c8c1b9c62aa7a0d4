use super::types::{RosterError, Violation, ViolationKind};
use crate::model::{Board, DoctorId, Month, Preference, Roster};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Validates a raw submission and builds the `Preference` to store.
///
/// Rejection policy: a date in both sets is a client bug and is surfaced as
/// `ConflictingDateSets` rather than silently resolved.
pub(super) fn validate_submission(
    board: &Board,
    doctor_id: &DoctorId,
    month: Month,
    unavailable: &[NaiveDate],
    preferred: &[NaiveDate],
    desired_shifts: i64,
) -> Result<Preference, RosterError> {
    match board.find_doctor(doctor_id) {
        Some(d) if d.active => {}
        _ => return Err(RosterError::InvalidDoctor(doctor_id.as_str().to_string())),
    }

    for &date in unavailable.iter().chain(preferred) {
        if !month.contains(date) {
            return Err(RosterError::DateOutOfRange { date, month });
        }
    }

    let unavailable: BTreeSet<NaiveDate> = unavailable.iter().copied().collect();
    let preferred: BTreeSet<NaiveDate> = preferred.iter().copied().collect();
    let both: Vec<NaiveDate> = unavailable.intersection(&preferred).copied().collect();
    if !both.is_empty() {
        return Err(RosterError::ConflictingDateSets(both));
    }

    let max = month.num_days();
    if desired_shifts < 0 || desired_shifts > i64::from(max) {
        return Err(RosterError::InvalidShiftCount {
            got: desired_shifts,
            max,
        });
    }

    Ok(Preference {
        doctor_id: doctor_id.clone(),
        month,
        unavailable,
        preferred,
        desired_shifts: desired_shifts as u32,
    })
}

/// Sweeps a stored roster for hard-constraint breaches. Read-only; used by
/// the CLI `check` subcommand and as the test oracle.
pub(super) fn audit_roster(board: &Board, roster: &Roster) -> Vec<Violation> {
    let mut out = Vec::new();

    for (&date, doctor_id) in &roster.cells {
        let Some(doctor) = board.find_doctor(doctor_id) else {
            out.push(Violation {
                date,
                doctor: doctor_id.clone(),
                kind: ViolationKind::UnknownDoctor,
            });
            continue;
        };
        if !doctor.active {
            out.push(Violation {
                date,
                doctor: doctor_id.clone(),
                kind: ViolationKind::InactiveAssignment,
            });
        }
        if let Some(pref) = board.preference_for(doctor_id, roster.month) {
            if pref.unavailable.contains(&date) {
                out.push(Violation {
                    date,
                    doctor: doctor_id.clone(),
                    kind: ViolationKind::UnavailableAssignment,
                });
            }
        }
    }

    out
}
