use crate::model::{Board, Month};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// Raw registry row, to be fed through `Scheduler::add_doctor` so the
/// initials-uniqueness rule applies.
#[derive(Debug, Clone)]
pub struct DoctorRow {
    pub name: String,
    pub initials: String,
}

/// Import de médecins depuis CSV: header `name,initials`
pub fn import_doctors_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<DoctorRow>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let initials = rec.get(1).context("missing initials")?.trim();
        if name.is_empty() || initials.is_empty() {
            bail!("invalid doctor row (empty)");
        }
        out.push(DoctorRow {
            name: name.to_string(),
            initials: initials.to_string(),
        });
    }
    Ok(out)
}

/// Export CSV du planning d'un mois: header `date,doctor_id,initials,name`
/// (covered dates only).
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    board: &Board,
    month: Month,
) -> anyhow::Result<()> {
    let roster = board
        .roster(month)
        .with_context(|| format!("no roster generated for {month}"))?;

    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "doctor_id", "initials", "name"])?;
    for (date, doctor_id) in &roster.cells {
        let (initials, name) = board
            .find_doctor(doctor_id)
            .map(|d| (d.initials.as_str(), d.name.as_str()))
            .unwrap_or(("", ""));
        let date = date.to_string();
        w.write_record([date.as_str(), doctor_id.as_str(), initials, name])?;
    }
    w.flush()?;
    Ok(())
}
