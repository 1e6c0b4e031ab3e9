//! # Transposition Module
//!
//! Shifts the chords of a lyrics/chords sheet by a number of semitones.
//!
//! ## Line Classification
//! A sheet mixes chord lines and lyric lines:
//!
//! ```text
//! G        C       G
//! Amazing grace how sweet the sound
//! ```
//!
//! Only lines made entirely of chord characters (`A-G`, `#`, `b`, `m`, digits,
//! whitespace, `/`) are touched. Every other line comes back verbatim, so a lyric
//! that starts with a capital "A" is never rewritten. Missing a chord line is
//! acceptable; mangling a lyric is not.
//!
//! ## Tabs
//! Tabs are expanded to spaces before anything else so chords stay aligned over
//! the syllables they belong to.
//!
//! ## Offsets
//! Offsets are always measured from the song's original key, never accumulated.
//! [`offset_for`] computes one from a pair of key names.
//!
//! ## Example
//! ```rust
//! use praise::transpose;
//!
//! let sheet = "C  G  Am  F\nHello world";
//! assert_eq!(transpose(sheet, 2), "D  A  Bm  G\nHello world");
//! ```

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::chord::{scale_index, transpose_chord};

/// Spaces per tab when none is configured.
pub const DEFAULT_TAB_WIDTH: usize = 4;

static CHORD_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-G#bm0-9\s/]+$").expect("valid regex"));

/// Root, accidental, quality, extension. The trailing boundary is checked by hand
/// in [`transpose_line`] since `#` is not a word character.
static CHORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-G])(#|b)?(maj|min|dim|aug|sus[0-9]*|m)?[0-9]*").expect("valid regex")
});

/// Replace every tab with `tab_width` spaces.
pub fn normalize_tabs(text: &str, tab_width: usize) -> Cow<'_, str> {
    if text.contains('\t') {
        Cow::Owned(text.replace('\t', &" ".repeat(tab_width)))
    } else {
        Cow::Borrowed(text)
    }
}

/// Whether a line looks like it holds only chords.
///
/// # Examples
/// ```
/// use praise::is_chord_line;
///
/// assert!(is_chord_line("  G   D/F#   Em7  "));
/// assert!(!is_chord_line("Amazing grace"));
/// assert!(!is_chord_line(""));
/// ```
pub fn is_chord_line(line: &str) -> bool {
    CHORD_LINE_RE.is_match(line.trim())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Transpose every chord token on a single chord line.
fn transpose_line(line: &str, steps: i32) -> Cow<'_, str> {
    CHORD_TOKEN_RE.replace_all(line, |caps: &Captures| {
        let token = &caps[0];
        let end = caps.get(0).map_or(line.len(), |m| m.end());

        // "CD" or "C#b" is not a chord symbol
        if line[end..].chars().next().is_some_and(is_word_char) {
            return token.to_string();
        }
        transpose_chord(token, steps)
    })
}

/// Transpose a sheet by `steps` semitones using the default tab width.
///
/// The result has exactly as many lines as the input.
pub fn transpose(text: &str, steps: i32) -> String {
    transpose_with_tab_width(text, steps, DEFAULT_TAB_WIDTH)
}

/// Transpose a sheet by `steps` semitones, expanding tabs to `tab_width` spaces.
pub fn transpose_with_tab_width(text: &str, steps: i32, tab_width: usize) -> String {
    let normalized = normalize_tabs(text, tab_width);

    normalized
        .split('\n')
        .map(|line| {
            if is_chord_line(line) {
                transpose_line(line, steps)
            } else {
                Cow::Borrowed(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Semitone offset from `original` to `target`, in `-11..=11`.
///
/// Unknown keys (including flat spellings) give 0, meaning "leave as is".
///
/// # Examples
/// ```
/// use praise::offset_for;
///
/// assert_eq!(offset_for("C", "D"), 2);
/// assert_eq!(offset_for("G", "F"), -2);
/// assert_eq!(offset_for("Bb", "C"), 0);
/// ```
pub fn offset_for(original: &str, target: &str) -> i32 {
    match (scale_index(original.trim()), scale_index(target.trim())) {
        (Some(from), Some(to)) => to as i32 - from as i32,
        _ => 0,
    }
}

/// Transpose a sheet written in `original` so it reads in `target`.
pub fn transpose_to_key(text: &str, original: &str, target: &str) -> String {
    transpose(text, offset_for(original, target))
}
