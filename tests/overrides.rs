#![forbid(unsafe_code)]
use chrono::NaiveDate;
use nightroster::{DoctorId, Month, RosterError, Scheduler, SolveOptions};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn march() -> Month {
    Month::new(2025, 3).unwrap()
}

fn generated_scheduler() -> (Scheduler, DoctorId, DoctorId) {
    let mut s = Scheduler::new();
    let a = s.add_doctor("Alice Ardent", "AA").unwrap();
    let b = s.add_doctor("Boris Brun", "BB").unwrap();
    s.submit_preference(&a, march(), &[d(2025, 3, 20)], &[], 16)
        .unwrap();
    s.submit_preference(&b, march(), &[], &[], 15).unwrap();
    s.generate(march(), SolveOptions::default()).unwrap();
    (s, a, b)
}

#[test]
fn edit_requires_a_generated_month() {
    let mut s = Scheduler::new();
    let a = s.add_doctor("Alice Ardent", "AA").unwrap();
    let err = s.override_assignment(d(2025, 3, 1), Some(a)).unwrap_err();
    assert!(matches!(err, RosterError::MonthNotGenerated(_)));
}

#[test]
fn override_patches_exactly_one_cell() {
    let (mut s, _a, b) = generated_scheduler();
    let before = s.roster(march()).unwrap().clone();

    s.override_assignment(d(2025, 3, 5), Some(b.clone())).unwrap();

    let after = s.roster(march()).unwrap();
    assert_eq!(after.assigned(d(2025, 3, 5)), Some(&b));
    for date in march().days() {
        if date != d(2025, 3, 5) {
            assert_eq!(after.assigned(date), before.assigned(date));
        }
    }
}

#[test]
fn unavailability_is_never_overridable() {
    let (mut s, a, _b) = generated_scheduler();
    let before = s.roster(march()).unwrap().clone();

    // A marked the 20th unavailable
    let err = s
        .override_assignment(d(2025, 3, 20), Some(a.clone()))
        .unwrap_err();
    assert!(matches!(err, RosterError::DoctorUnavailable { .. }));

    // the whole roster, cell included, is untouched
    assert_eq!(s.roster(march()).unwrap(), &before);
}

#[test]
fn inactive_doctor_rejected() {
    let (mut s, a, _b) = generated_scheduler();
    s.deactivate_doctor(&a).unwrap();

    let err = s.override_assignment(d(2025, 3, 2), Some(a)).unwrap_err();
    assert!(matches!(err, RosterError::InactiveDoctor(_)));
}

#[test]
fn unknown_doctor_rejected() {
    let (mut s, _a, _b) = generated_scheduler();
    let ghost = DoctorId::random();
    let err = s.override_assignment(d(2025, 3, 2), Some(ghost)).unwrap_err();
    assert!(matches!(err, RosterError::InvalidDoctor(_)));
}

#[test]
fn clearing_is_always_permitted() {
    let (mut s, _a, _b) = generated_scheduler();
    assert!(s.roster(march()).unwrap().is_complete());

    s.override_assignment(d(2025, 3, 8), None).unwrap();

    let roster = s.roster(march()).unwrap();
    assert!(!roster.is_complete());
    assert_eq!(roster.assigned(d(2025, 3, 8)), None);
    assert_eq!(roster.uncovered_dates(), vec![d(2025, 3, 8)]);
}

#[test]
fn regeneration_overwrites_manual_edits() {
    let (mut s, _a, b) = generated_scheduler();
    s.override_assignment(d(2025, 3, 5), Some(b)).unwrap();
    let edited = s.roster(march()).unwrap().clone();

    let outcome = s.generate(march(), SolveOptions::default()).unwrap();
    // destructive overwrite: the regenerated month matches a fresh run, not
    // the hand-patched roster
    assert_ne!(outcome.roster(), &edited);
    assert_eq!(s.roster(march()).unwrap(), outcome.roster());
}
