mod mutate;
mod rank;
mod solve;
mod types;
mod validate;

pub use rank::RankKey;
pub use types::{RosterError, SolveOptions, SolveOutcome, Violation, ViolationKind};

use crate::model::{Board, Doctor, DoctorId, Month, Roster};
use chrono::NaiveDate;

/// Scheduler : encapsule le Board (registre + soumissions + rosters)
#[derive(Debug, Default)]
pub struct Scheduler {
    board: Board,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            board: Board::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Registers a doctor. Initials must be unique among active doctors.
    pub fn add_doctor(&mut self, name: &str, initials: &str) -> Result<DoctorId, RosterError> {
        let name = name.trim();
        let initials = initials.trim();
        if name.is_empty() || initials.is_empty() {
            return Err(RosterError::EmptyDoctorFields);
        }
        if self.board.active_doctors().any(|d| d.initials == initials) {
            return Err(RosterError::DuplicateInitials(initials.to_string()));
        }
        let doctor = Doctor::new(name, initials);
        let id = doctor.id.clone();
        self.board.doctors.push(doctor);
        Ok(id)
    }

    /// Soft delete: the doctor stays referenced by historical rosters but is
    /// excluded from future generation and overrides.
    pub fn deactivate_doctor(&mut self, id: &DoctorId) -> Result<(), RosterError> {
        let doctor = self
            .board
            .find_doctor_mut(id)
            .ok_or_else(|| RosterError::InvalidDoctor(id.as_str().to_string()))?;
        doctor.active = false;
        Ok(())
    }

    /// Re-activation re-checks the initials-uniqueness rule.
    pub fn activate_doctor(&mut self, id: &DoctorId) -> Result<(), RosterError> {
        let initials = self
            .board
            .find_doctor(id)
            .ok_or_else(|| RosterError::InvalidDoctor(id.as_str().to_string()))?
            .initials
            .clone();
        if self
            .board
            .active_doctors()
            .any(|d| d.initials == initials && &d.id != id)
        {
            return Err(RosterError::DuplicateInitials(initials));
        }
        if let Some(doctor) = self.board.find_doctor_mut(id) {
            doctor.active = true;
        }
        Ok(())
    }

    /// Validates and stores a submission, replacing any prior one for the
    /// same (doctor, month) wholesale. Rejections leave the store untouched.
    pub fn submit_preference(
        &mut self,
        doctor_id: &DoctorId,
        month: Month,
        unavailable: &[NaiveDate],
        preferred: &[NaiveDate],
        desired_shifts: i64,
    ) -> Result<(), RosterError> {
        let pref = validate::validate_submission(
            &self.board,
            doctor_id,
            month,
            unavailable,
            preferred,
            desired_shifts,
        )?;
        self.board
            .preferences
            .retain(|p| !(p.doctor_id == *doctor_id && p.month == month));
        self.board.preferences.push(pref);
        Ok(())
    }

    /// Generates the month's roster and stores it, destructively replacing
    /// any prior roster (manual edits included). On error the prior roster
    /// is left untouched.
    pub fn generate(
        &mut self,
        month: Month,
        opts: SolveOptions,
    ) -> Result<SolveOutcome, RosterError> {
        let outcome = solve::generate(&self.board, month, opts)?;
        self.board.rosters.insert(month, outcome.roster().clone());
        Ok(outcome)
    }

    pub fn override_assignment(
        &mut self,
        date: NaiveDate,
        doctor: Option<DoctorId>,
    ) -> Result<(), RosterError> {
        mutate::override_assignment(&mut self.board, date, doctor)
    }

    pub fn roster(&self, month: Month) -> Option<&Roster> {
        self.board.roster(month)
    }

    pub fn audit(&self, month: Month) -> Result<Vec<Violation>, RosterError> {
        let roster = self
            .board
            .roster(month)
            .ok_or(RosterError::MonthNotGenerated(month))?;
        Ok(validate::audit_roster(&self.board, roster))
    }
}
