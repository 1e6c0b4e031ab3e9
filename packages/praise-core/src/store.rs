//! # Store
//!
//! The repository interface the operations in [`api`](crate::api) talk to.
//!
//! In production the rows live in a hosted database; this crate only needs
//! row-level create/read/update/delete with a few filters and orderings, which is
//! what [`Store`] describes. [`MemoryStore`] keeps everything in memory and can be
//! saved to (and loaded from) a YAML file, which is how the CLI persists data.
//!
//! ## Orderings
//! - Setlists: date descending
//! - Setlist entries: position ascending
//! - Availability: date ascending, from a given date on
//! - Assignments: instrument order

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PraiseError, StoreError};
use crate::models::{
    Assignment, AvailabilityEntry, Instrument, Musicians, SetlistEntry, Setlist, Song, SongDraft,
};

/// Row-level access to songs, setlists and their entries, availability and assignments.
pub trait Store {
    fn list_songs(&self) -> Result<Vec<Song>, StoreError>;
    fn get_song(&self, id: &str) -> Result<Option<Song>, StoreError>;
    fn insert_song(&mut self, draft: SongDraft) -> Result<Song, StoreError>;
    fn update_song(&mut self, song: &Song) -> Result<(), StoreError>;
    /// Deletes the song and every setlist entry pointing at it.
    fn delete_song(&mut self, id: &str) -> Result<(), StoreError>;

    fn list_setlists(&self) -> Result<Vec<Setlist>, StoreError>;
    fn get_setlist(&self, id: &str) -> Result<Option<Setlist>, StoreError>;
    fn insert_setlist(
        &mut self,
        name: &str,
        date: NaiveDate,
        musicians: &Musicians,
    ) -> Result<Setlist, StoreError>;
    fn update_setlist(&mut self, setlist: &Setlist) -> Result<(), StoreError>;
    /// Deletes the setlist and its entries.
    fn delete_setlist(&mut self, id: &str) -> Result<(), StoreError>;

    fn setlist_entries(&self, setlist_id: &str) -> Result<Vec<SetlistEntry>, StoreError>;
    fn delete_setlist_entries(&mut self, setlist_id: &str) -> Result<(), StoreError>;
    fn insert_setlist_entries(
        &mut self,
        setlist_id: &str,
        entries: &[SetlistEntry],
    ) -> Result<(), StoreError>;

    fn list_availability_from(&self, from: NaiveDate) -> Result<Vec<AvailabilityEntry>, StoreError>;
    fn insert_availability(
        &mut self,
        date: NaiveDate,
        full_name: &str,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<AvailabilityEntry, StoreError>;
    fn update_availability(
        &mut self,
        id: u64,
        date: NaiveDate,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<(), StoreError>;
    fn delete_availability(&mut self, id: u64) -> Result<(), StoreError>;

    fn list_assignments(&self, date: NaiveDate) -> Result<Vec<Assignment>, StoreError>;
    /// Inserts, or replaces the musician of the existing row for the same date and instrument.
    fn upsert_assignment(
        &mut self,
        date: NaiveDate,
        instrument: Instrument,
        musician: &str,
    ) -> Result<Assignment, StoreError>;
    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError>;
}

/// Stored setlist/song association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetlistSongRow {
    pub setlist_id: String,
    pub song_id: String,
    pub position: usize,
}

/// In-memory [`Store`], serializable as one YAML document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    songs: Vec<Song>,
    #[serde(default)]
    setlists: Vec<Setlist>,
    #[serde(default)]
    setlist_songs: Vec<SetlistSongRow>,
    #[serde(default)]
    availability: Vec<AvailabilityEntry>,
    #[serde(default)]
    assignments: Vec<Assignment>,
    #[serde(default)]
    next_availability_id: u64,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn missing(table: &'static str, id: impl ToString) -> StoreError {
    StoreError::Missing { table, id: id.to_string() }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a YAML file. A missing file gives an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PraiseError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path).map_err(|source| PraiseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, PraiseError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| PraiseError::store("read data file", StoreError::Persist(e.to_string())))
    }

    pub fn to_yaml(&self) -> Result<String, PraiseError> {
        serde_yaml::to_string(self)
            .map_err(|e| PraiseError::store("write data file", StoreError::Persist(e.to_string())))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PraiseError> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        fs::write(path, yaml).map_err(|source| PraiseError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}

impl Store for MemoryStore {
    fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        Ok(self.songs.clone())
    }

    fn get_song(&self, id: &str) -> Result<Option<Song>, StoreError> {
        Ok(self.songs.iter().find(|s| s.id == id).cloned())
    }

    fn insert_song(&mut self, draft: SongDraft) -> Result<Song, StoreError> {
        let song = draft.into_song(new_id());
        self.songs.push(song.clone());
        Ok(song)
    }

    fn update_song(&mut self, song: &Song) -> Result<(), StoreError> {
        let existing = self
            .songs
            .iter_mut()
            .find(|s| s.id == song.id)
            .ok_or_else(|| missing("songs", &song.id))?;
        *existing = song.clone();
        Ok(())
    }

    fn delete_song(&mut self, id: &str) -> Result<(), StoreError> {
        self.songs.retain(|s| s.id != id);
        self.setlist_songs.retain(|row| row.song_id != id);
        Ok(())
    }

    fn list_setlists(&self) -> Result<Vec<Setlist>, StoreError> {
        let mut setlists = self.setlists.clone();
        setlists.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(setlists)
    }

    fn get_setlist(&self, id: &str) -> Result<Option<Setlist>, StoreError> {
        Ok(self.setlists.iter().find(|s| s.id == id).cloned())
    }

    fn insert_setlist(
        &mut self,
        name: &str,
        date: NaiveDate,
        musicians: &Musicians,
    ) -> Result<Setlist, StoreError> {
        let setlist = Setlist {
            id: new_id(),
            name: name.to_string(),
            date,
            musicians: musicians.clone(),
        };
        self.setlists.push(setlist.clone());
        Ok(setlist)
    }

    fn update_setlist(&mut self, setlist: &Setlist) -> Result<(), StoreError> {
        let existing = self
            .setlists
            .iter_mut()
            .find(|s| s.id == setlist.id)
            .ok_or_else(|| missing("setlists", &setlist.id))?;
        *existing = setlist.clone();
        Ok(())
    }

    fn delete_setlist(&mut self, id: &str) -> Result<(), StoreError> {
        self.setlists.retain(|s| s.id != id);
        self.setlist_songs.retain(|row| row.setlist_id != id);
        Ok(())
    }

    fn setlist_entries(&self, setlist_id: &str) -> Result<Vec<SetlistEntry>, StoreError> {
        let mut entries: Vec<SetlistEntry> = self
            .setlist_songs
            .iter()
            .filter(|row| row.setlist_id == setlist_id)
            .map(|row| SetlistEntry {
                song_id: row.song_id.clone(),
                position: row.position,
            })
            .collect();
        entries.sort_by_key(|e| e.position);
        Ok(entries)
    }

    fn delete_setlist_entries(&mut self, setlist_id: &str) -> Result<(), StoreError> {
        self.setlist_songs.retain(|row| row.setlist_id != setlist_id);
        Ok(())
    }

    fn insert_setlist_entries(
        &mut self,
        setlist_id: &str,
        entries: &[SetlistEntry],
    ) -> Result<(), StoreError> {
        if !self.setlists.iter().any(|s| s.id == setlist_id) {
            return Err(missing("setlists", setlist_id));
        }
        self.setlist_songs.extend(entries.iter().map(|e| SetlistSongRow {
            setlist_id: setlist_id.to_string(),
            song_id: e.song_id.clone(),
            position: e.position,
        }));
        Ok(())
    }

    fn list_availability_from(&self, from: NaiveDate) -> Result<Vec<AvailabilityEntry>, StoreError> {
        let mut entries: Vec<AvailabilityEntry> = self
            .availability
            .iter()
            .filter(|e| e.date >= from)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    fn insert_availability(
        &mut self,
        date: NaiveDate,
        full_name: &str,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<AvailabilityEntry, StoreError> {
        self.next_availability_id += 1;
        let entry = AvailabilityEntry {
            id: self.next_availability_id,
            user_id: None,
            date,
            available,
            full_name: full_name.to_string(),
            instrument,
        };
        self.availability.push(entry.clone());
        Ok(entry)
    }

    fn update_availability(
        &mut self,
        id: u64,
        date: NaiveDate,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<(), StoreError> {
        let entry = self
            .availability
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| missing("availability", id))?;
        entry.date = date;
        entry.instrument = instrument;
        entry.available = available;
        Ok(())
    }

    fn delete_availability(&mut self, id: u64) -> Result<(), StoreError> {
        self.availability.retain(|e| e.id != id);
        Ok(())
    }

    fn list_assignments(&self, date: NaiveDate) -> Result<Vec<Assignment>, StoreError> {
        let mut assignments: Vec<Assignment> = self
            .assignments
            .iter()
            .filter(|a| a.date == date)
            .cloned()
            .collect();
        assignments.sort_by_key(|a| a.instrument);
        Ok(assignments)
    }

    fn upsert_assignment(
        &mut self,
        date: NaiveDate,
        instrument: Instrument,
        musician: &str,
    ) -> Result<Assignment, StoreError> {
        if let Some(existing) = self
            .assignments
            .iter_mut()
            .find(|a| a.date == date && a.instrument == instrument)
        {
            existing.musician = musician.to_string();
            return Ok(existing.clone());
        }
        let assignment = Assignment {
            id: new_id(),
            date,
            instrument,
            musician: musician.to_string(),
        };
        self.assignments.push(assignment.clone());
        Ok(assignment)
    }

    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError> {
        self.assignments.retain(|a| a.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(title: &str) -> SongDraft {
        SongDraft {
            title: title.to_string(),
            original_key: "G".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_setlists_listed_newest_first() {
        let mut store = MemoryStore::new();
        store.insert_setlist("Older", date(2026, 1, 4), &Musicians::default()).unwrap();
        store.insert_setlist("Newer", date(2026, 3, 1), &Musicians::default()).unwrap();
        let names: Vec<String> = store.list_setlists().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[test]
    fn test_entries_sorted_and_cascaded() {
        let mut store = MemoryStore::new();
        let song = store.insert_song(draft("Doxology")).unwrap();
        let setlist = store.insert_setlist("Sunday", date(2026, 1, 4), &Musicians::default()).unwrap();
        store
            .insert_setlist_entries(
                &setlist.id,
                &[
                    SetlistEntry { song_id: "b".to_string(), position: 1 },
                    SetlistEntry { song_id: song.id.clone(), position: 0 },
                ],
            )
            .unwrap();
        let entries = store.setlist_entries(&setlist.id).unwrap();
        assert_eq!(entries[0].song_id, song.id);
        assert_eq!(entries[1].song_id, "b");

        store.delete_song(&song.id).unwrap();
        assert_eq!(store.setlist_entries(&setlist.id).unwrap().len(), 1);

        store.delete_setlist(&setlist.id).unwrap();
        assert!(store.setlist_entries(&setlist.id).unwrap().is_empty());
    }

    #[test]
    fn test_entries_need_existing_setlist() {
        let mut store = MemoryStore::new();
        let err = store
            .insert_setlist_entries("nope", &[SetlistEntry { song_id: "a".to_string(), position: 0 }])
            .unwrap_err();
        assert_eq!(err, StoreError::Missing { table: "setlists", id: "nope".to_string() });
    }

    #[test]
    fn test_update_missing_rows() {
        let mut store = MemoryStore::new();
        let song = draft("Ghost").into_song("ghost".to_string());
        assert!(store.update_song(&song).is_err());
        assert!(store.update_availability(9, date(2026, 1, 1), None, true).is_err());
    }

    #[test]
    fn test_availability_ids_and_filter() {
        let mut store = MemoryStore::new();
        let a = store.insert_availability(date(2026, 5, 1), "Ana", None, true).unwrap();
        let b = store.insert_availability(date(2026, 4, 1), "Ben", Some(Instrument::Bass), false).unwrap();
        store.insert_availability(date(2025, 12, 1), "Old", None, true).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        let upcoming = store.list_availability_from(date(2026, 1, 1)).unwrap();
        let names: Vec<&str> = upcoming.iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Ana"]);
    }

    #[test]
    fn test_upsert_assignment_replaces() {
        let mut store = MemoryStore::new();
        let day = date(2026, 10, 18);
        let first = store.upsert_assignment(day, Instrument::Drum, "Caleb").unwrap();
        let second = store.upsert_assignment(day, Instrument::Drum, "Joel").unwrap();
        assert_eq!(first.id, second.id);
        let roster = store.list_assignments(day).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].musician, "Joel");
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut store = MemoryStore::new();
        let song = store.insert_song(draft("Doxology")).unwrap();
        let setlist = store.insert_setlist("Sunday", date(2026, 1, 4), &Musicians::default()).unwrap();
        store
            .insert_setlist_entries(&setlist.id, &[SetlistEntry { song_id: song.id, position: 0 }])
            .unwrap();
        store.insert_availability(date(2026, 1, 4), "Ana", Some(Instrument::Organ), true).unwrap();

        let yaml = store.to_yaml().unwrap();
        let loaded = MemoryStore::from_yaml(&yaml).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::load(dir.path().join("absent.yaml")).unwrap();
        assert_eq!(store, MemoryStore::new());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.yaml");
        let mut store = MemoryStore::new();
        store.insert_song(draft("Doxology")).unwrap();
        store.save(&path).unwrap();
        assert_eq!(MemoryStore::load(&path).unwrap(), store);
    }
}
