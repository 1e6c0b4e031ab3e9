//! # Setlist Export
//!
//! Turns a [`SetlistView`] into a printable document for the band.
//!
//! ## Layout
//! 1. Setlist name in bold (or "Untitled Setlist")
//! 2. `Date: 2026-10-18` in italics
//! 3. `Guitar: … | Drummer: … | Piano: … | Acoustic: … | Bass: …`, `-` for empty slots
//! 4. For each song, `1. Title` in bold followed by one paragraph per lyric line
//!
//! ## Formats
//! - [`to_text`] - plain text
//! - [`to_word_xml`] - Word 2003 XML (WordprocessingML), a single `.xml` file Word opens directly
//!
//! ## Example
//! ```rust
//! use chrono::NaiveDate;
//! use praise::{export, Musicians, Setlist, SetlistSong, SetlistView};
//!
//! let view = SetlistView {
//!     setlist: Setlist {
//!         id: "1".to_string(),
//!         name: "Sunday Morning".to_string(),
//!         date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
//!         musicians: Musicians::default(),
//!     },
//!     songs: vec![SetlistSong {
//!         song_id: "a".to_string(),
//!         title: "Doxology".to_string(),
//!         lyrics: "G  D\nPraise God".to_string(),
//!     }],
//! };
//!
//! let text = export::to_text(&view);
//! assert!(text.starts_with("Sunday Morning\n"));
//! assert!(text.contains("1. Doxology\nG  D\nPraise God"));
//! ```

use quick_xml::escape::escape;

use crate::models::SetlistView;

const UNTITLED: &str = "Untitled Setlist";
const WORDML_NS: &str = "http://schemas.microsoft.com/office/word/2003/wordml";

/// A paragraph of the exported document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in half-points, `None` for the default.
    pub size: Option<u32>,
    /// Spacing before/after in twentieths of a point.
    pub space_before: u32,
    pub space_after: u32,
}

impl Paragraph {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Default::default() }
    }
}

fn slot(name: &str) -> &str {
    if name.trim().is_empty() {
        "-"
    } else {
        name
    }
}

/// The musicians line shared by both formats.
pub fn musicians_line(view: &SetlistView) -> String {
    let m = &view.setlist.musicians;
    format!(
        "Guitar: {} | Drummer: {} | Piano: {} | Acoustic: {} | Bass: {}",
        slot(&m.guitar),
        slot(&m.drummer),
        slot(&m.piano),
        slot(&m.acoustic),
        slot(&m.bass)
    )
}

/// Build the paragraphs of a setlist document.
pub fn paragraphs(view: &SetlistView) -> Vec<Paragraph> {
    let title = if view.setlist.name.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        view.setlist.name.clone()
    };

    let mut paragraphs = vec![
        Paragraph {
            text: title,
            bold: true,
            size: Some(32),
            space_after: 300,
            ..Default::default()
        },
        Paragraph {
            text: format!("Date: {}", view.setlist.date),
            italic: true,
            space_after: 300,
            ..Default::default()
        },
        Paragraph {
            text: musicians_line(view),
            space_after: 400,
            ..Default::default()
        },
    ];

    for (index, song) in view.songs.iter().enumerate() {
        paragraphs.push(Paragraph {
            text: format!("{}. {}", index + 1, song.title),
            bold: true,
            space_before: 300,
            space_after: 100,
            ..Default::default()
        });
        if !song.lyrics.is_empty() {
            paragraphs.extend(song.lyrics.split('\n').map(Paragraph::plain));
        }
    }

    paragraphs
}

/// Plain-text rendering, one paragraph per line with a blank line between songs.
pub fn to_text(view: &SetlistView) -> String {
    let mut out = String::new();
    for paragraph in paragraphs(view) {
        if paragraph.space_before > 0 && !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&paragraph.text);
        out.push('\n');
    }
    out
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    let mut xml = String::from("    <w:p>");

    if paragraph.space_before > 0 || paragraph.space_after > 0 {
        xml.push_str(&format!(
            "<w:pPr><w:spacing w:before=\"{}\" w:after=\"{}\"/></w:pPr>",
            paragraph.space_before, paragraph.space_after
        ));
    }

    xml.push_str("<w:r>");
    if paragraph.bold || paragraph.italic || paragraph.size.is_some() {
        xml.push_str("<w:rPr>");
        if paragraph.bold {
            xml.push_str("<w:b/>");
        }
        if paragraph.italic {
            xml.push_str("<w:i/>");
        }
        if let Some(size) = paragraph.size {
            xml.push_str(&format!("<w:sz w:val=\"{}\"/>", size));
        }
        xml.push_str("</w:rPr>");
    }
    xml.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t>",
        escape(paragraph.text.as_str())
    ));
    xml.push_str("</w:r></w:p>\n");
    xml
}

/// Word 2003 XML rendering.
pub fn to_word_xml(view: &SetlistView) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
    xml.push_str("<?mso-application progid=\"Word.Document\"?>\n");
    xml.push_str(&format!("<w:wordDocument xmlns:w=\"{}\">\n", WORDML_NS));
    xml.push_str("  <w:body>\n");
    for paragraph in paragraphs(view) {
        xml.push_str(&paragraph_xml(&paragraph));
    }
    xml.push_str("  </w:body>\n");
    xml.push_str("</w:wordDocument>\n");
    xml
}

/// Download file name: the setlist name (or "setlist") with the given extension.
pub fn file_name(view: &SetlistView, extension: &str) -> String {
    let base = view.setlist.name.trim();
    let base = if base.is_empty() { "setlist" } else { base };
    let safe: String = base
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    format!("{}.{}", safe, extension)
}
