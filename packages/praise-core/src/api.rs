//! # Public API
//!
//! Operations a UI event handler calls. Each one validates its input, talks to a
//! [`Store`], and either succeeds or returns a [`PraiseError`] whose message can be
//! shown to the user as is.
//!
//! ## Songs
//! - [`import_song()`] - Parse a song sheet file and add it to the library
//! - [`find_songs()`] - Library search, sorted by title
//! - [`song_sheet()`] - Lyrics/chords transposed to a chosen key
//!
//! ## Setlists
//! - [`create_setlist()`] - Header plus songs in the chosen order
//! - [`save_setlist()`] - Update the header, rewrite songs only if the order changed
//! - [`commit_staged()`] - Persist a batch of manual reorders
//! - [`load_setlists()`] / [`load_setlist()`] - Setlists joined with their songs
//! - [`delete_setlist()`]
//!
//! ## Availability and roster
//! - [`save_availability()`], [`update_availability()`], [`delete_availability()`]
//! - [`availability_summary()`] - Upcoming entries grouped by month
//! - [`assign_musician()`], [`roster()`], [`roster_candidates()`], [`prefill_musicians()`]
//!
//! ## Failure model
//! Nothing is retried or rolled back. If a setlist header update succeeds and the
//! song rewrite that follows fails, the error is returned and the two stay out of
//! step until the next save.
//!
//! ## Typical Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use praise::{create_setlist, import_song, load_setlist, MemoryStore, SetlistDraft};
//!
//! let mut store = MemoryStore::new();
//! let song = import_song(&mut store, "---\ntitle: Doxology\nkey: G\n---\nG  D  G")?;
//!
//! let draft = SetlistDraft {
//!     name: "Sunday".to_string(),
//!     date: NaiveDate::from_ymd_opt(2026, 10, 18),
//!     ..Default::default()
//! };
//! let setlist = create_setlist(&mut store, &draft, &[song.id.clone()])?;
//!
//! let view = load_setlist(&store, &setlist.id)?;
//! assert_eq!(view.songs[0].title, "Doxology");
//! # Ok::<(), praise::PraiseError>(())
//! ```

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::availability::{group_by_month, validate_draft, MonthGroup};
use crate::error::{validate_required, PraiseError, StoreError};
use crate::library::search_songs;
use crate::models::{
    Assignment, AvailabilityDraft, AvailabilityEntry, Instrument, Musicians, Setlist,
    SetlistDraft, SetlistEntry, SetlistSong, SetlistView, Song,
};
use crate::roster::{candidates, musicians_from};
use crate::setlist::{build_replacement, has_order_changed, StagedOrder};
use crate::song::parse_song;
use crate::store::Store;
use crate::transpose::{offset_for, transpose_with_tab_width};

/// Attach the action name to a store failure and log it.
fn store_err(action: &'static str) -> impl FnOnce(StoreError) -> PraiseError {
    move |source| {
        warn!(action, error = %source, "store call failed");
        PraiseError::store(action, source)
    }
}

// ---------------------------------------------------------------- songs

/// Parse a song sheet and add it to the library.
pub fn import_song<S: Store + ?Sized>(store: &mut S, source: &str) -> Result<Song, PraiseError> {
    let draft = parse_song(source)?;
    let song = store.insert_song(draft).map_err(store_err("save song"))?;
    info!(id = %song.id, title = %song.title, "song added");
    Ok(song)
}

/// Library search over title, artist and category, sorted by title.
pub fn find_songs<S: Store + ?Sized>(store: &S, term: &str) -> Result<Vec<Song>, PraiseError> {
    let songs = store.list_songs().map_err(store_err("load songs"))?;
    Ok(search_songs(&songs, term).into_iter().cloned().collect())
}

/// A song's lyrics transposed from its original key to `target_key`.
///
/// With no target, or a key outside the chromatic table, the sheet is shown in
/// its original key (tabs still expanded).
pub fn song_sheet(song: &Song, target_key: Option<&str>, tab_width: usize) -> String {
    let steps = target_key.map_or(0, |target| offset_for(&song.original_key, target));
    transpose_with_tab_width(&song.lyrics, steps, tab_width)
}

// ---------------------------------------------------------------- setlists

fn require_date(draft: &SetlistDraft) -> Result<NaiveDate, PraiseError> {
    draft
        .date
        .ok_or_else(|| PraiseError::Validation("Please select a date for the setlist.".to_string()))
}

/// Create a setlist with its songs in the given order.
pub fn create_setlist<S: Store + ?Sized>(
    store: &mut S,
    draft: &SetlistDraft,
    song_ids: &[String],
) -> Result<Setlist, PraiseError> {
    let date = require_date(draft)?;

    let setlist = store
        .insert_setlist(draft.name.trim(), date, &draft.musicians)
        .map_err(store_err("create setlist"))?;

    let rows = build_replacement(song_ids);
    if !rows.is_empty() {
        store
            .insert_setlist_entries(&setlist.id, &rows)
            .map_err(store_err("save setlist songs"))?;
    }

    info!(id = %setlist.id, songs = rows.len(), "setlist created");
    Ok(setlist)
}

/// Save an edited setlist.
///
/// The header is always written. Songs are rewritten (delete all, insert all) only
/// when `new_order` differs from `original_order`. Returns whether they were.
pub fn save_setlist<S: Store + ?Sized>(
    store: &mut S,
    id: &str,
    draft: &SetlistDraft,
    original_order: &[String],
    new_order: &[String],
) -> Result<bool, PraiseError> {
    let date = require_date(draft)?;

    let setlist = Setlist {
        id: id.to_string(),
        name: draft.name.trim().to_string(),
        date,
        musicians: draft.musicians.clone(),
    };
    store
        .update_setlist(&setlist)
        .map_err(store_err("update setlist"))?;

    if !has_order_changed(original_order, new_order) {
        debug!(id, "setlist songs unchanged");
        return Ok(false);
    }

    replace_songs(store, id, new_order)?;
    Ok(true)
}

fn replace_songs<S: Store + ?Sized>(store: &mut S, id: &str, order: &[String]) -> Result<(), PraiseError> {
    store
        .delete_setlist_entries(id)
        .map_err(store_err("update setlist songs"))?;

    let rows = build_replacement(order);
    if !rows.is_empty() {
        store
            .insert_setlist_entries(id, &rows)
            .map_err(store_err("update setlist songs"))?;
    }
    info!(id, songs = rows.len(), "setlist songs replaced");
    Ok(())
}

/// Persist staged reorders of a setlist. Returns `false` when there was nothing to write.
pub fn commit_staged<S: Store + ?Sized>(
    store: &mut S,
    id: &str,
    staged: &mut StagedOrder,
) -> Result<bool, PraiseError> {
    if !staged.is_dirty() {
        return Ok(false);
    }
    replace_songs(store, id, staged.songs())?;
    staged.mark_committed();
    Ok(true)
}

pub fn delete_setlist<S: Store + ?Sized>(store: &mut S, id: &str) -> Result<(), PraiseError> {
    store.delete_setlist(id).map_err(store_err("delete setlist"))?;
    info!(id, "setlist deleted");
    Ok(())
}

fn join_songs(setlist: Setlist, entries: Vec<SetlistEntry>, songs: &[Song]) -> SetlistView {
    let songs = entries
        .into_iter()
        .filter_map(|entry| {
            let song = songs.iter().find(|s| s.id == entry.song_id);
            if song.is_none() {
                debug!(song_id = %entry.song_id, "skipping entry for missing song");
            }
            song.map(|s| SetlistSong {
                song_id: s.id.clone(),
                title: s.title.clone(),
                lyrics: s.lyrics.clone(),
            })
        })
        .collect();
    SetlistView { setlist, songs }
}

/// All setlists, newest first, each with its songs in position order.
pub fn load_setlists<S: Store + ?Sized>(store: &S) -> Result<Vec<SetlistView>, PraiseError> {
    let songs = store.list_songs().map_err(store_err("load songs"))?;
    let setlists = store.list_setlists().map_err(store_err("load setlists"))?;

    setlists
        .into_iter()
        .map(|setlist| -> Result<SetlistView, PraiseError> {
            let entries = store
                .setlist_entries(&setlist.id)
                .map_err(store_err("load setlist songs"))?;
            Ok(join_songs(setlist, entries, &songs))
        })
        .collect()
}

pub fn load_setlist<S: Store + ?Sized>(store: &S, id: &str) -> Result<SetlistView, PraiseError> {
    let setlist = store
        .get_setlist(id)
        .map_err(store_err("load setlist"))?
        .ok_or_else(|| PraiseError::NotFound { kind: "Setlist", id: id.to_string() })?;
    let entries = store
        .setlist_entries(id)
        .map_err(store_err("load setlist songs"))?;
    let songs = store.list_songs().map_err(store_err("load songs"))?;
    Ok(join_songs(setlist, entries, &songs))
}

// ---------------------------------------------------------------- availability

pub fn save_availability<S: Store + ?Sized>(
    store: &mut S,
    draft: &AvailabilityDraft,
) -> Result<AvailabilityEntry, PraiseError> {
    let (date, name) = validate_draft(draft)?;
    let entry = store
        .insert_availability(date, &name, draft.instrument, draft.available)
        .map_err(store_err("save availability"))?;
    info!(id = entry.id, %date, name = %entry.full_name, "availability saved");
    Ok(entry)
}

/// Update date, instrument and the available flag. The name is not editable.
pub fn update_availability<S: Store + ?Sized>(
    store: &mut S,
    id: u64,
    draft: &AvailabilityDraft,
) -> Result<(), PraiseError> {
    let (date, _) = validate_draft(draft)?;
    store
        .update_availability(id, date, draft.instrument, draft.available)
        .map_err(store_err("update availability"))
}

pub fn delete_availability<S: Store + ?Sized>(store: &mut S, id: u64) -> Result<(), PraiseError> {
    store
        .delete_availability(id)
        .map_err(store_err("delete availability"))
}

/// Entries from `today` on, grouped by month, nearest month first.
pub fn availability_summary<S: Store + ?Sized>(
    store: &S,
    today: NaiveDate,
) -> Result<Vec<MonthGroup>, PraiseError> {
    let entries = store
        .list_availability_from(today)
        .map_err(store_err("load availability"))?;
    Ok(group_by_month(&entries))
}

// ---------------------------------------------------------------- roster

pub fn assign_musician<S: Store + ?Sized>(
    store: &mut S,
    date: NaiveDate,
    instrument: Instrument,
    musician: &str,
) -> Result<Assignment, PraiseError> {
    let musician = musician.trim();
    validate_required("musician name", musician)?;
    let assignment = store
        .upsert_assignment(date, instrument, musician)
        .map_err(store_err("assign musician"))?;
    info!(%date, %instrument, musician, "musician assigned");
    Ok(assignment)
}

pub fn roster<S: Store + ?Sized>(store: &S, date: NaiveDate) -> Result<Vec<Assignment>, PraiseError> {
    store.list_assignments(date).map_err(store_err("load roster"))
}

/// People who said they are available on `date` for `instrument`.
pub fn roster_candidates<S: Store + ?Sized>(
    store: &S,
    date: NaiveDate,
    instrument: Instrument,
) -> Result<Vec<String>, PraiseError> {
    let entries = store
        .list_availability_from(date)
        .map_err(store_err("load availability"))?;
    Ok(candidates(&entries, date, instrument))
}

/// Musician slots for a new setlist on `date`, taken from the roster.
pub fn prefill_musicians<S: Store + ?Sized>(store: &S, date: NaiveDate) -> Result<Musicians, PraiseError> {
    Ok(musicians_from(&roster(store, date)?))
}
