//! Musician roster for a service date.
//!
//! Coordinators pick one musician per instrument per date from the people who
//! said they are available. A roster can then prefill a setlist's musician slots.

use chrono::NaiveDate;

use crate::models::{Assignment, AvailabilityEntry, Instrument, Musicians};

/// Names of people available on `date` who play `instrument`.
///
/// Entries without an instrument count for every instrument. Names are
/// deduplicated and kept in entry order.
pub fn candidates(entries: &[AvailabilityEntry], date: NaiveDate, instrument: Instrument) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let plays = entry.instrument.map_or(true, |i| i == instrument);
        if entry.date == date && entry.available && plays && !names.contains(&entry.full_name) {
            names.push(entry.full_name.clone());
        }
    }
    names
}

/// Fill setlist slots from a date's assignments.
pub fn musicians_from(assignments: &[Assignment]) -> Musicians {
    let mut musicians = Musicians::default();
    for assignment in assignments {
        musicians.set_slot(assignment.instrument, assignment.musician.as_str());
    }
    musicians
}
