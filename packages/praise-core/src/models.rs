//! # Data Model
//!
//! Records exchanged with the [`Store`](crate::store::Store) and shown to users.
//!
//! - [`Song`] - A lyrics/chords sheet in the song library
//! - [`Setlist`] / [`Musicians`] - A dated program header with its five musician slots
//! - [`SetlistEntry`] - One (song, position) association of a setlist
//! - [`SetlistView`] - A setlist joined with its songs in performance order
//! - [`AvailabilityEntry`] - A member saying whether they can play on a date
//! - [`Assignment`] - A coordinator's pick of musician for an instrument on a date

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A song in the library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    /// One of the chromatic key names; anything else disables transposition.
    pub original_key: String,
    pub lyrics: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Song fields before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongDraft {
    pub title: String,
    pub original_key: String,
    pub lyrics: String,
    pub artist: Option<String>,
    pub category: Option<String>,
}

impl SongDraft {
    pub fn into_song(self, id: String) -> Song {
        Song {
            id,
            title: self.title,
            original_key: self.original_key,
            lyrics: self.lyrics,
            artist: self.artist,
            category: self.category,
        }
    }
}

/// Instruments people sign up for and setlist slots are filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instrument {
    Drum,
    Guitar,
    Acoustic,
    Piano,
    Bass,
    Organ,
}

impl Instrument {
    /// Instruments offered on the availability form.
    pub const AVAILABILITY_CHOICES: [Instrument; 5] = [
        Instrument::Drum,
        Instrument::Bass,
        Instrument::Guitar,
        Instrument::Acoustic,
        Instrument::Organ,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Drum => "Drum",
            Instrument::Guitar => "Guitar",
            Instrument::Acoustic => "Acoustic",
            Instrument::Piano => "Piano",
            Instrument::Bass => "Bass",
            Instrument::Organ => "Organ",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Instrument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drum" | "drums" | "drummer" => Ok(Instrument::Drum),
            "guitar" | "electric" => Ok(Instrument::Guitar),
            "acoustic" => Ok(Instrument::Acoustic),
            "piano" | "keys" | "keyboard" => Ok(Instrument::Piano),
            "bass" => Ok(Instrument::Bass),
            "organ" => Ok(Instrument::Organ),
            other => Err(format!("Unknown instrument: {}", other)),
        }
    }
}

/// The five musician slots of a setlist. Free text, not linked to any member record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Musicians {
    #[serde(default)]
    pub drummer: String,
    #[serde(default)]
    pub guitar: String,
    #[serde(default)]
    pub acoustic: String,
    #[serde(default)]
    pub piano: String,
    #[serde(default)]
    pub bass: String,
}

impl Musicians {
    /// Slot for an instrument. Organ shares the piano slot.
    pub fn slot(&self, instrument: Instrument) -> &str {
        match instrument {
            Instrument::Drum => &self.drummer,
            Instrument::Guitar => &self.guitar,
            Instrument::Acoustic => &self.acoustic,
            Instrument::Piano | Instrument::Organ => &self.piano,
            Instrument::Bass => &self.bass,
        }
    }

    pub fn set_slot(&mut self, instrument: Instrument, name: impl Into<String>) {
        let slot = match instrument {
            Instrument::Drum => &mut self.drummer,
            Instrument::Guitar => &mut self.guitar,
            Instrument::Acoustic => &mut self.acoustic,
            Instrument::Piano | Instrument::Organ => &mut self.piano,
            Instrument::Bass => &mut self.bass,
        };
        *slot = name.into();
    }
}

/// Setlist header: everything except its songs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setlist {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub musicians: Musicians,
}

/// Setlist header fields as typed into the create/edit form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetlistDraft {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub musicians: Musicians,
}

impl From<&Setlist> for SetlistDraft {
    fn from(setlist: &Setlist) -> Self {
        Self {
            name: setlist.name.clone(),
            date: Some(setlist.date),
            musicians: setlist.musicians.clone(),
        }
    }
}

/// One (song, position) association. Positions of a setlist run `0..k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistEntry {
    pub song_id: String,
    pub position: usize,
}

/// A song as it appears inside a setlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetlistSong {
    pub song_id: String,
    pub title: String,
    pub lyrics: String,
}

/// A setlist joined with its songs, in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetlistView {
    pub setlist: Setlist,
    pub songs: Vec<SetlistSong>,
}

impl SetlistView {
    /// Song ids in performance order, the shape the reconciler works with.
    pub fn song_ids(&self) -> Vec<String> {
        self.songs.iter().map(|s| s.song_id.clone()).collect()
    }
}

/// A member's availability for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEntry {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<String>,
    pub date: NaiveDate,
    pub available: bool,
    pub full_name: String,
    #[serde(default)]
    pub instrument: Option<Instrument>,
}

/// Availability form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityDraft {
    pub date: Option<NaiveDate>,
    pub full_name: String,
    pub instrument: Option<Instrument>,
    pub available: bool,
}

/// Musician picked for an instrument on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub date: NaiveDate,
    pub instrument: Instrument,
    pub musician: String,
}
