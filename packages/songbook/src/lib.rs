//! Hymns bundled with praise, used to seed an empty library.
//!
//! Each entry is a song file (YAML frontmatter plus chord sheet) from `library/`,
//! named by its path without the `.song` extension.

include!(concat!(env!("OUT_DIR"), "/songs.rs"));

/// A bundled song file with its name and content
#[derive(Debug, Clone, PartialEq)]
pub struct BundledSong {
    pub name: String,
    pub content: String,
}

impl BundledSong {
    fn from_entry((name, content): &(&str, &str)) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
        }
    }
}

/// Get all bundled songs, ordered by name
pub fn get_all_songs() -> Vec<BundledSong> {
    SONGS.iter().map(BundledSong::from_entry).collect()
}

/// Get a bundled song by name
pub fn get_song(name: &str) -> Option<BundledSong> {
    SONGS
        .iter()
        .find(|(n, _)| *n == name)
        .map(BundledSong::from_entry)
}

/// List all bundled song names
pub fn list_songs() -> Vec<&'static str> {
    SONGS.iter().map(|(name, _)| *name).collect()
}
