//! # Song Sheet Files
//!
//! A song sheet is plain lyrics/chords text with a YAML metadata block between
//! `---` markers. The block can sit at the top or the bottom of the file.
//!
//! ```text
//! ---
//! title: Be Thou My Vision
//! key: D
//! artist: Traditional Irish
//! category: Hymn
//! ---
//! D        G      D
//! Be Thou my vision, O Lord of my heart
//! ```
//!
//! `title` is required. `key` defaults to `C`.
//!
//! ## Example
//! ```rust
//! use praise::parse_song;
//!
//! let draft = parse_song("---\ntitle: Doxology\nkey: G\n---\nG  D  G\nPraise God").unwrap();
//! assert_eq!(draft.title, "Doxology");
//! assert_eq!(draft.original_key, "G");
//! assert_eq!(draft.lyrics, "G  D  G\nPraise God");
//! ```

use serde::Deserialize;

use crate::error::PraiseError;
use crate::models::{Song, SongDraft};

const DEFAULT_KEY: &str = "C";

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawSongMetadata {
    title: Option<String>,
    key: Option<String>,
    artist: Option<String>,
    category: Option<String>,
}

/// Split the metadata block from the sheet body.
///
/// Returns (metadata_content, remaining_source)
pub(crate) fn extract_metadata(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let mut start_idx = None;
    let mut end_idx = None;

    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if start_idx.is_none() {
                start_idx = Some(i);
            } else {
                end_idx = Some(i);
                break;
            }
        }
    }

    match (start_idx, end_idx) {
        (Some(start), Some(end)) => {
            let metadata_content = lines[start + 1..end].join("\n");
            let remaining: Vec<&str> = lines[..start]
                .iter()
                .chain(lines[end + 1..].iter())
                .copied()
                .collect();
            (Some(metadata_content), remaining.join("\n"))
        }
        _ => (None, source.to_string()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a song sheet file into a draft ready for the store.
pub fn parse_song(source: &str) -> Result<SongDraft, PraiseError> {
    let (metadata_content, body) = extract_metadata(source);

    let content = metadata_content
        .ok_or_else(|| PraiseError::Metadata("missing --- metadata block".to_string()))?;
    let raw: RawSongMetadata = if content.trim().is_empty() {
        RawSongMetadata::default()
    } else {
        serde_yaml::from_str(&content).map_err(|e| PraiseError::Metadata(e.to_string()))?
    };

    let title = non_empty(raw.title)
        .ok_or_else(|| PraiseError::Metadata("title is required".to_string()))?;

    Ok(SongDraft {
        title,
        original_key: non_empty(raw.key).unwrap_or_else(|| DEFAULT_KEY.to_string()),
        lyrics: body.trim_matches('\n').to_string(),
        artist: non_empty(raw.artist),
        category: non_empty(raw.category),
    })
}

/// Render a song back to sheet-file form.
pub fn to_song_file(song: &Song) -> String {
    let mut out = String::from("---\n");
    out.push_str(&format!("title: {}\n", yaml_scalar(&song.title)));
    out.push_str(&format!("key: {}\n", yaml_scalar(&song.original_key)));
    if let Some(artist) = &song.artist {
        out.push_str(&format!("artist: {}\n", yaml_scalar(artist)));
    }
    if let Some(category) = &song.category {
        out.push_str(&format!("category: {}\n", yaml_scalar(category)));
    }
    out.push_str("---\n");
    out.push_str(&song.lyrics);
    out.push('\n');
    out
}

/// Quote a scalar so `C#` or `Praise: Live` survive the YAML round trip.
fn yaml_scalar(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
