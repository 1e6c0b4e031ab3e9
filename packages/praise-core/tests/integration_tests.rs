//! Integration tests for the praise library
//!
//! Exercises the operations end to end against the in-memory store, plus a store
//! that fails on demand to check that errors abort the operation.

use chrono::NaiveDate;
use praise::{
    commit_staged, create_setlist, export, find_songs, import_song, load_setlist, load_setlists,
    save_setlist, song_sheet, transpose, Assignment, AvailabilityEntry, Direction, Instrument,
    MemoryStore, Musicians, PraiseError, Setlist, SetlistDraft, SetlistEntry, Song, SongDraft,
    StagedOrder, Store, StoreError,
};

const AMAZING_GRACE: &str = r#"---
title: Amazing Grace
key: G
artist: John Newton
category: Hymn
---
G               C       G
Amazing grace, how sweet the sound
G                   D
That saved a wretch like me
"#;

const DOXOLOGY: &str = "---\ntitle: Doxology\nkey: G\n---\nG  D  Em  C\nPraise God from whom all blessings flow";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(name: &str, on: NaiveDate) -> SetlistDraft {
    SetlistDraft {
        name: name.to_string(),
        date: Some(on),
        musicians: Musicians {
            guitar: "Ana".to_string(),
            ..Default::default()
        },
    }
}

#[test]
fn test_import_search_and_transpose() {
    let mut store = MemoryStore::new();
    import_song(&mut store, AMAZING_GRACE).unwrap();
    import_song(&mut store, DOXOLOGY).unwrap();

    let hymns = find_songs(&store, "hymn").unwrap();
    assert_eq!(hymns.len(), 1);

    let sheet = song_sheet(&hymns[0], Some("A"), 4);
    let lines: Vec<&str> = sheet.lines().collect();
    assert_eq!(lines[0], "A               D       A");
    assert_eq!(lines[1], "Amazing grace, how sweet the sound");
    assert_eq!(lines[2], "A                   E");

    // Offsets are relative to the original key, so going back is exact
    assert_eq!(transpose(&sheet, -2), hymns[0].lyrics);
}

#[test]
fn test_setlist_lifecycle_and_export() {
    let mut store = MemoryStore::new();
    let grace = import_song(&mut store, AMAZING_GRACE).unwrap();
    let doxology = import_song(&mut store, DOXOLOGY).unwrap();

    let older = create_setlist(&mut store, &draft("Old", date(2026, 9, 6)), &[]).unwrap();
    let sunday = create_setlist(
        &mut store,
        &draft("Sunday Morning", date(2026, 10, 18)),
        &[grace.id.clone(), doxology.id.clone()],
    )
    .unwrap();

    let views = load_setlists(&store).unwrap();
    assert_eq!(views[0].setlist.id, sunday.id);
    assert_eq!(views[1].setlist.id, older.id);
    assert!(views[1].songs.is_empty());

    let mut staged = StagedOrder::new(views[0].song_ids());
    staged.move_song(0, Direction::Down);
    commit_staged(&mut store, &sunday.id, &mut staged).unwrap();

    let entries = store.setlist_entries(&sunday.id).unwrap();
    assert_eq!(
        entries,
        vec![
            SetlistEntry { song_id: doxology.id.clone(), position: 0 },
            SetlistEntry { song_id: grace.id.clone(), position: 1 },
        ]
    );

    let text = export::to_text(&load_setlist(&store, &sunday.id).unwrap());
    assert!(text.contains("Guitar: Ana | Drummer: - | Piano: - | Acoustic: - | Bass: -"));
    let doxology_at = text.find("1. Doxology").unwrap();
    let grace_at = text.find("2. Amazing Grace").unwrap();
    assert!(doxology_at < grace_at);
}

#[test]
fn test_deleted_song_drops_out_of_setlist() {
    let mut store = MemoryStore::new();
    let grace = import_song(&mut store, AMAZING_GRACE).unwrap();
    let doxology = import_song(&mut store, DOXOLOGY).unwrap();
    let setlist = create_setlist(
        &mut store,
        &draft("Sunday", date(2026, 10, 18)),
        &[grace.id.clone(), doxology.id.clone()],
    )
    .unwrap();

    store.delete_song(&grace.id).unwrap();
    assert_eq!(load_setlist(&store, &setlist.id).unwrap().song_ids(), vec![doxology.id]);
}

/// Wraps a [`MemoryStore`] and fails the named operation.
struct FlakyStore {
    inner: MemoryStore,
    fail_on: &'static str,
}

impl FlakyStore {
    fn check(&self, op: &'static str) -> Result<(), StoreError> {
        if self.fail_on == op {
            Err(StoreError::Unavailable(format!("{} timed out", op)))
        } else {
            Ok(())
        }
    }
}

impl Store for FlakyStore {
    fn list_songs(&self) -> Result<Vec<Song>, StoreError> {
        self.check("list_songs")?;
        self.inner.list_songs()
    }
    fn get_song(&self, id: &str) -> Result<Option<Song>, StoreError> {
        self.inner.get_song(id)
    }
    fn insert_song(&mut self, draft: SongDraft) -> Result<Song, StoreError> {
        self.check("insert_song")?;
        self.inner.insert_song(draft)
    }
    fn update_song(&mut self, song: &Song) -> Result<(), StoreError> {
        self.inner.update_song(song)
    }
    fn delete_song(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.delete_song(id)
    }
    fn list_setlists(&self) -> Result<Vec<Setlist>, StoreError> {
        self.inner.list_setlists()
    }
    fn get_setlist(&self, id: &str) -> Result<Option<Setlist>, StoreError> {
        self.inner.get_setlist(id)
    }
    fn insert_setlist(
        &mut self,
        name: &str,
        date: NaiveDate,
        musicians: &Musicians,
    ) -> Result<Setlist, StoreError> {
        self.check("insert_setlist")?;
        self.inner.insert_setlist(name, date, musicians)
    }
    fn update_setlist(&mut self, setlist: &Setlist) -> Result<(), StoreError> {
        self.check("update_setlist")?;
        self.inner.update_setlist(setlist)
    }
    fn delete_setlist(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.delete_setlist(id)
    }
    fn setlist_entries(&self, setlist_id: &str) -> Result<Vec<SetlistEntry>, StoreError> {
        self.inner.setlist_entries(setlist_id)
    }
    fn delete_setlist_entries(&mut self, setlist_id: &str) -> Result<(), StoreError> {
        self.check("delete_setlist_entries")?;
        self.inner.delete_setlist_entries(setlist_id)
    }
    fn insert_setlist_entries(
        &mut self,
        setlist_id: &str,
        entries: &[SetlistEntry],
    ) -> Result<(), StoreError> {
        self.check("insert_setlist_entries")?;
        self.inner.insert_setlist_entries(setlist_id, entries)
    }
    fn list_availability_from(&self, from: NaiveDate) -> Result<Vec<AvailabilityEntry>, StoreError> {
        self.inner.list_availability_from(from)
    }
    fn insert_availability(
        &mut self,
        date: NaiveDate,
        full_name: &str,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<AvailabilityEntry, StoreError> {
        self.inner.insert_availability(date, full_name, instrument, available)
    }
    fn update_availability(
        &mut self,
        id: u64,
        date: NaiveDate,
        instrument: Option<Instrument>,
        available: bool,
    ) -> Result<(), StoreError> {
        self.inner.update_availability(id, date, instrument, available)
    }
    fn delete_availability(&mut self, id: u64) -> Result<(), StoreError> {
        self.inner.delete_availability(id)
    }
    fn list_assignments(&self, date: NaiveDate) -> Result<Vec<Assignment>, StoreError> {
        self.inner.list_assignments(date)
    }
    fn upsert_assignment(
        &mut self,
        date: NaiveDate,
        instrument: Instrument,
        musician: &str,
    ) -> Result<Assignment, StoreError> {
        self.inner.upsert_assignment(date, instrument, musician)
    }
    fn delete_assignment(&mut self, id: &str) -> Result<(), StoreError> {
        self.inner.delete_assignment(id)
    }
}

fn flaky_with_setlist(fail_on: &'static str) -> (FlakyStore, Setlist, Vec<String>) {
    let mut inner = MemoryStore::new();
    let a = import_song(&mut inner, AMAZING_GRACE).unwrap();
    let b = import_song(&mut inner, DOXOLOGY).unwrap();
    let order = vec![a.id, b.id];
    let setlist = create_setlist(&mut inner, &draft("Sunday", date(2026, 10, 18)), &order).unwrap();
    (FlakyStore { inner, fail_on }, setlist, order)
}

#[test]
fn test_header_failure_aborts_before_songs() {
    let (mut store, setlist, order) = flaky_with_setlist("update_setlist");
    let reversed: Vec<String> = order.iter().rev().cloned().collect();

    let err = save_setlist(&mut store, &setlist.id, &draft("Renamed", setlist.date), &order, &reversed)
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to update setlist: store unavailable: update_setlist timed out");

    let view = load_setlist(&store, &setlist.id).unwrap();
    assert_eq!(view.setlist.name, "Sunday");
    assert_eq!(view.song_ids(), order);
}

#[test]
fn test_song_rewrite_failure_leaves_header_updated() {
    let (mut store, setlist, order) = flaky_with_setlist("insert_setlist_entries");
    let reversed: Vec<String> = order.iter().rev().cloned().collect();

    let err = save_setlist(&mut store, &setlist.id, &draft("Renamed", setlist.date), &order, &reversed)
        .unwrap_err();
    assert!(matches!(err, PraiseError::Store { action: "update setlist songs", .. }));

    // Not rolled back: the header changed and the songs were already deleted
    let view = load_setlist(&store, &setlist.id).unwrap();
    assert_eq!(view.setlist.name, "Renamed");
    assert!(view.songs.is_empty());
}

#[test]
fn test_unchanged_order_skips_song_calls() {
    let (mut store, setlist, order) = flaky_with_setlist("delete_setlist_entries");
    let changed =
        save_setlist(&mut store, &setlist.id, &draft("Renamed", setlist.date), &order, &order).unwrap();
    assert!(!changed);
}

#[test]
fn test_create_failure_is_reported() {
    let mut store = FlakyStore { inner: MemoryStore::new(), fail_on: "insert_setlist" };
    let err = create_setlist(&mut store, &draft("Sunday", date(2026, 10, 18)), &[]).unwrap_err();
    assert_eq!(err.to_string(), "Failed to create setlist: store unavailable: insert_setlist timed out");
}

#[test]
fn test_validation_happens_before_store_calls() {
    // Would fail if the store were reached
    let mut store = FlakyStore { inner: MemoryStore::new(), fail_on: "insert_setlist" };
    let mut no_date = draft("Sunday", date(2026, 10, 18));
    no_date.date = None;
    assert!(matches!(
        create_setlist(&mut store, &no_date, &[]),
        Err(PraiseError::Validation(_))
    ));

    let mut songs = FlakyStore { inner: MemoryStore::new(), fail_on: "insert_song" };
    assert!(matches!(
        import_song(&mut songs, "---\nkey: G\n---\nG"),
        Err(PraiseError::Metadata(_))
    ));
}
