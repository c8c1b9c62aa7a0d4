use super::types::RosterError;
use crate::model::{Board, DoctorId, Month};
use chrono::NaiveDate;

/// Applies a single manual (date -> doctor) patch to an existing roster,
/// bypassing generation. `None` clears the cell, which is always permitted.
///
/// All checks run before the write: a rejected override leaves every cell
/// untouched. Unavailability is enforced even here; it is never overridable.
pub(super) fn override_assignment(
    board: &mut Board,
    date: NaiveDate,
    doctor: Option<DoctorId>,
) -> Result<(), RosterError> {
    let month = Month::of(date);
    if !board.rosters.contains_key(&month) {
        return Err(RosterError::MonthNotGenerated(month));
    }

    if let Some(doctor_id) = &doctor {
        let found = board
            .find_doctor(doctor_id)
            .ok_or_else(|| RosterError::InvalidDoctor(doctor_id.as_str().to_string()))?;
        if !found.active {
            return Err(RosterError::InactiveDoctor(doctor_id.as_str().to_string()));
        }
        if let Some(pref) = board.preference_for(doctor_id, month) {
            if pref.unavailable.contains(&date) {
                return Err(RosterError::DoctorUnavailable {
                    doctor: doctor_id.as_str().to_string(),
                    date,
                });
            }
        }
    }

    // checks passed; the roster was verified present above
    let roster = board
        .rosters
        .get_mut(&month)
        .ok_or_else(|| RosterError::MonthNotGenerated(month))?;
    match doctor {
        Some(id) => roster.assign(date, id),
        None => roster.clear(date),
    }
    Ok(())
}
