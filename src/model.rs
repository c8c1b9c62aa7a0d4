use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour Doctor
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DoctorId(String);

impl DoctorId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Physician in the unit registry. Deactivation is a soft delete: the record
/// stays so historical rosters remain resolvable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub initials: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Doctor {
    pub fn new<N: Into<String>, I: Into<String>>(name: N, initials: I) -> Self {
        Self {
            id: DoctorId::random(),
            name: name.into(),
            initials: initials.into(),
            active: true,
        }
    }
}

/// Calendar month (`YYYY-MM`). Owns its day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("month must be 1..=12, got {month}"));
        }
        if !(1..=9999).contains(&year) {
            return Err(format!("year out of range: {year}"));
        }
        Ok(Self { year, month })
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        // year/month validated at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    pub fn num_days(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .unwrap();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// Every calendar date of the month, chronological.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first_day();
        (0..self.num_days()).map(move |i| first + chrono::Duration::days(i64::from(i)))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {s:?}"))?;
        let year: i32 = y.parse().map_err(|_| format!("invalid year in {s:?}"))?;
        let month: u32 = m.parse().map_err(|_| format!("invalid month in {s:?}"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Month> for String {
    fn from(m: Month) -> Self {
        m.to_string()
    }
}

/// One doctor's submission for one month. Replaced wholesale on re-submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub doctor_id: DoctorId,
    pub month: Month,
    #[serde(default)]
    pub unavailable: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub preferred: BTreeSet<NaiveDate>,
    pub desired_shifts: u32,
}

/// Per-month mapping of dates to assigned doctors. Only covered dates carry a
/// cell; the month's day range defines exhaustiveness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub month: Month,
    #[serde(default)]
    pub cells: BTreeMap<NaiveDate, DoctorId>,
}

impl Roster {
    pub fn empty(month: Month) -> Self {
        Self {
            month,
            cells: BTreeMap::new(),
        }
    }

    pub fn assigned(&self, date: NaiveDate) -> Option<&DoctorId> {
        self.cells.get(&date)
    }

    pub fn assign(&mut self, date: NaiveDate, doctor: DoctorId) {
        self.cells.insert(date, doctor);
    }

    /// Returns the date to "uncovered".
    pub fn clear(&mut self, date: NaiveDate) {
        self.cells.remove(&date);
    }

    pub fn shift_count(&self, doctor: &DoctorId) -> u32 {
        self.cells.values().filter(|d| *d == doctor).count() as u32
    }

    /// Dates of the month with no assignment, chronological.
    pub fn uncovered_dates(&self) -> Vec<NaiveDate> {
        self.month
            .days()
            .filter(|d| !self.cells.contains_key(d))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.cells.len() as u32 == self.month.num_days()
    }
}

/// Whole persisted state: registry, submissions, generated rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub preferences: Vec<Preference>,
    #[serde(default)]
    pub rosters: BTreeMap<Month, Roster>,
}

impl Board {
    pub fn find_doctor<'a>(&'a self, id: &DoctorId) -> Option<&'a Doctor> {
        self.doctors.iter().find(|d| &d.id == id)
    }
    pub fn find_doctor_mut(&mut self, id: &DoctorId) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| &d.id == id)
    }
    pub fn find_doctor_by_initials<'a>(&'a self, initials: &str) -> Option<&'a Doctor> {
        self.doctors.iter().find(|d| d.initials == initials)
    }
    pub fn active_doctors(&self) -> impl Iterator<Item = &Doctor> {
        self.doctors.iter().filter(|d| d.active)
    }
    pub fn preference_for<'a>(&'a self, doctor: &DoctorId, month: Month) -> Option<&'a Preference> {
        self.preferences
            .iter()
            .find(|p| &p.doctor_id == doctor && p.month == month)
    }
    pub fn preferences_for_month(&self, month: Month) -> impl Iterator<Item = &Preference> {
        self.preferences.iter().filter(move |p| p.month == month)
    }
    pub fn roster(&self, month: Month) -> Option<&Roster> {
        self.rosters.get(&month)
    }
}
