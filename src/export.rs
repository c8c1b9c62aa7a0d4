use crate::model::{Board, DoctorId, Month};
use anyhow::{Context, Result};
use chrono::Datelike;
use std::fmt::Write as _;

/// One row of the preference-vs-actual summary (the admin "status column").
#[derive(Debug, Clone)]
pub struct CoverageRow {
    pub doctor_id: DoctorId,
    pub name: String,
    pub initials: String,
    pub desired: u32,
    pub assigned: u32,
}

/// Target-vs-assigned counts per active doctor, plus any inactive doctor
/// still holding cells in the month's roster.
pub fn coverage_summary(board: &Board, month: Month) -> Result<Vec<CoverageRow>> {
    let roster = board
        .roster(month)
        .with_context(|| format!("no roster generated for {month}"))?;

    let mut rows: Vec<CoverageRow> = board
        .doctors
        .iter()
        .filter(|d| d.active || roster.shift_count(&d.id) > 0)
        .map(|d| CoverageRow {
            doctor_id: d.id.clone(),
            name: d.name.clone(),
            initials: d.initials.clone(),
            desired: board
                .preference_for(&d.id, month)
                .map_or(0, |p| p.desired_shifts),
            assigned: roster.shift_count(&d.id),
        })
        .collect();
    rows.sort_by(|a, b| a.initials.cmp(&b.initials));
    Ok(rows)
}

/// ICS (RFC 5545) calendar of one doctor's assigned nights: all-day events
/// with deterministic UIDs, so re-exports update in place.
pub fn doctor_ics(board: &Board, month: Month, initials: &str) -> Result<String> {
    let doctor = board
        .find_doctor_by_initials(initials)
        .with_context(|| format!("unknown doctor initials: {initials}"))?;
    let roster = board
        .roster(month)
        .with_context(|| format!("no roster generated for {month}"))?;

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//nightroster//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        format!("X-WR-CALNAME:MICU Night Shifts - {}", doctor.name),
    ];

    for (date, assigned) in &roster.cells {
        if assigned != &doctor.id {
            continue;
        }
        let next = *date + chrono::Duration::days(1);
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("UID:{}-{}@nightroster", date, doctor.initials));
        lines.push(format!("DTSTART;VALUE=DATE:{}", date.format("%Y%m%d")));
        lines.push(format!("DTEND;VALUE=DATE:{}", next.format("%Y%m%d")));
        lines.push("SUMMARY:MICU Night Shift".to_string());
        lines.push("STATUS:CONFIRMED".to_string());
        lines.push("END:VEVENT".to_string());
    }

    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\r\n") + "\r\n")
}

/// Printable plain-text roster for the month: one line per date, then the
/// coverage summary. Carries the same content as the dashboard view.
pub fn month_report(board: &Board, month: Month) -> Result<String> {
    let roster = board
        .roster(month)
        .with_context(|| format!("no roster generated for {month}"))?;

    let mut out = String::new();
    writeln!(out, "MICU night shifts — {month}")?;
    writeln!(out)?;

    for date in month.days() {
        let weekday = date.weekday();
        match roster.assigned(date).and_then(|id| board.find_doctor(id)) {
            Some(d) => writeln!(out, "{date} {weekday}  {}  {}", d.initials, d.name)?,
            None => match roster.assigned(date) {
                // cell points at a doctor missing from the registry
                Some(id) => writeln!(out, "{date} {weekday}  ??  ({})", id.as_str())?,
                None => writeln!(out, "{date} {weekday}  --  (uncovered)")?,
            },
        }
    }

    writeln!(out)?;
    writeln!(out, "doctor        assigned / target")?;
    for row in coverage_summary(board, month)? {
        writeln!(
            out,
            "{:<4} {:<12} {:>3} / {}",
            row.initials,
            row.name,
            row.assigned,
            row.desired
        )?;
    }
    let uncovered = roster.uncovered_dates();
    if !uncovered.is_empty() {
        writeln!(out)?;
        writeln!(out, "uncovered: {} date(s)", uncovered.len())?;
        for date in uncovered {
            writeln!(out, "  {date}")?;
        }
    }
    Ok(out)
}
