use super::rank::RankKey;
use super::types::{RosterError, SolveOptions, SolveOutcome};
use crate::model::{Board, DoctorId, Month, Preference, Roster};
use std::collections::BTreeMap;

/// Generates a full month's roster from the current registry and submissions.
///
/// Pure function of its inputs: identical preferences and active-doctor set
/// produce an identical roster. Dates with no eligible candidate are left
/// uncovered and reported, not raised as failures.
pub(super) fn generate(
    board: &Board,
    month: Month,
    opts: SolveOptions,
) -> Result<SolveOutcome, RosterError> {
    let active: Vec<_> = board.active_doctors().collect();
    let prefs: BTreeMap<&DoctorId, &Preference> = board
        .preferences_for_month(month)
        .map(|p| (&p.doctor_id, p))
        .collect();

    if active.is_empty() || prefs.is_empty() {
        return Err(RosterError::NoData(month));
    }

    let mut roster = Roster::empty(month);
    let mut counts: BTreeMap<&DoctorId, u32> = BTreeMap::new();
    let mut uncovered = Vec::new();
    let mut prev: Option<DoctorId> = None;

    for date in month.days() {
        let mut candidates: Vec<(&DoctorId, RankKey)> = Vec::with_capacity(active.len());
        for doctor in &active {
            let pref = prefs.get(&doctor.id);
            let unavailable = pref.map_or(false, |p| p.unavailable.contains(&date));
            if unavailable {
                continue;
            }
            // unavailable-wins already holds here; a doctor with no
            // submission joins with desired 0 and no marked dates
            let preferred = pref.map_or(false, |p| p.preferred.contains(&date));
            let desired = pref.map_or(0, |p| i64::from(p.desired_shifts));
            let assigned = counts.get(&doctor.id).copied().unwrap_or(0);
            candidates.push((
                &doctor.id,
                RankKey {
                    preferred,
                    debt: desired - i64::from(assigned),
                    assigned,
                    initials: doctor.initials.clone(),
                },
            ));
        }

        if candidates.is_empty() {
            uncovered.push(date);
            prev = None;
            continue;
        }

        candidates.sort_by(|a, b| a.1.cmp(&b.1));

        // soft no-consecutive-night rule: yesterday's assignee drops to the
        // back of today's ranking unless nobody else is eligible
        let pick = if opts.avoid_back_to_back {
            candidates
                .iter()
                .find(|(id, _)| prev.as_ref() != Some(*id))
                .unwrap_or(&candidates[0])
        } else {
            &candidates[0]
        };

        let chosen = pick.0.clone();
        *counts.entry(pick.0).or_insert(0) += 1;
        roster.assign(date, chosen.clone());
        prev = Some(chosen);
    }

    if uncovered.is_empty() {
        Ok(SolveOutcome::Complete(roster))
    } else {
        Ok(SolveOutcome::PartiallyCovered { roster, uncovered })
    }
}
