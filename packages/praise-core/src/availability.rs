//! Availability summaries.
//!
//! Entries are shown grouped by calendar month, nearest month first, each group
//! keeping the date order the store returned.

use chrono::{Datelike, NaiveDate};

use crate::error::PraiseError;
use crate::models::{AvailabilityDraft, AvailabilityEntry};

/// One month of availability entries, labelled like "October 2026".
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub entries: Vec<AvailabilityEntry>,
}

/// Check the form and return the date and trimmed name to store.
pub(crate) fn validate_draft(draft: &AvailabilityDraft) -> Result<(NaiveDate, String), PraiseError> {
    let name = draft.full_name.trim();
    match draft.date {
        Some(date) if !name.is_empty() => Ok((date, name.to_string())),
        _ => Err(PraiseError::Validation(
            "Please enter your name and select a date.".to_string(),
        )),
    }
}

/// Group entries by month, earliest month first.
pub fn group_by_month(entries: &[AvailabilityEntry]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for entry in entries {
        let (year, month) = (entry.date.year(), entry.date.month());
        match groups.iter_mut().find(|g| g.year == year && g.month == month) {
            Some(group) => group.entries.push(entry.clone()),
            None => groups.push(MonthGroup {
                label: entry.date.format("%B %Y").to_string(),
                year,
                month,
                entries: vec![entry.clone()],
            }),
        }
    }

    groups.sort_by_key(|g| (g.year, g.month));
    groups
}

/// Whether an entry belongs to `name`, the member using this device.
pub fn is_mine(entry: &AvailabilityEntry, name: &str) -> bool {
    !name.is_empty() && entry.full_name == name
}
