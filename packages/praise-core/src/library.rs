//! Song library search.

use std::cmp::Ordering;

use crate::models::Song;

fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Library search: case-insensitive match on title, artist and category,
/// sorted by title.
pub fn search_songs<'a>(songs: &'a [Song], term: &str) -> Vec<&'a Song> {
    let needle = term.trim().to_lowercase();
    let mut found: Vec<&Song> = songs
        .iter()
        .filter(|song| {
            let haystack = format!(
                "{} {} {}",
                song.title,
                song.artist.as_deref().unwrap_or_default(),
                song.category.as_deref().unwrap_or_default()
            );
            haystack.to_lowercase().contains(&needle)
        })
        .collect();
    found.sort_by(|a, b| compare_titles(&a.title, &b.title));
    found
}

/// Setlist song picker filter: title only, original order kept.
pub fn filter_by_title<'a>(songs: &'a [Song], term: &str) -> Vec<&'a Song> {
    let needle = term.trim().to_lowercase();
    songs
        .iter()
        .filter(|song| song.title.to_lowercase().contains(&needle))
        .collect()
}
