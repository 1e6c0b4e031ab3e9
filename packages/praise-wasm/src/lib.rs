use serde::Serialize;
use wasm_bindgen::prelude::*;

use praise::{export, parse_song, PraiseError, SetlistView, Song};

#[derive(Debug, Serialize, PartialEq)]
struct ErrorMessage {
    message: String,
}

impl From<PraiseError> for ErrorMessage {
    fn from(e: PraiseError) -> Self {
        ErrorMessage { message: e.to_string() }
    }
}

impl From<serde_json::Error> for ErrorMessage {
    fn from(e: serde_json::Error) -> Self {
        ErrorMessage { message: format!("Invalid JSON: {}", e) }
    }
}

impl From<serde_wasm_bindgen::Error> for ErrorMessage {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ErrorMessage { message: e.to_string() }
    }
}

fn to_js_error(e: ErrorMessage) -> JsValue {
    let json = serde_json::to_string(&e).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", e.message));
    JsValue::from_str(&json)
}

fn search(songs_json: &str, term: &str) -> Result<String, ErrorMessage> {
    let songs: Vec<Song> = serde_json::from_str(songs_json)?;
    let found = praise::search_songs(&songs, term);
    Ok(serde_json::to_string(&found)?)
}

fn setlist_text(view_json: &str) -> Result<String, ErrorMessage> {
    let view: SetlistView = serde_json::from_str(view_json)?;
    Ok(export::to_text(&view))
}

fn setlist_word_xml(view_json: &str) -> Result<String, ErrorMessage> {
    let view: SetlistView = serde_json::from_str(view_json)?;
    Ok(export::to_word_xml(&view))
}

/// Bundled songs parsed into library records, keyed by their bundle name.
fn bundled_songs() -> Result<Vec<Song>, ErrorMessage> {
    praise_songbook::get_all_songs()
        .into_iter()
        .map(|bundled| {
            let draft = parse_song(&bundled.content).map_err(|e| ErrorMessage {
                message: format!("{}: {}", bundled.name, e),
            })?;
            Ok(draft.into_song(bundled.name))
        })
        .collect()
}

/// Shift every chord on chord lines by `steps` semitones
#[wasm_bindgen]
pub fn transpose(text: &str, steps: i32) -> String {
    praise::transpose(text, steps)
}

/// Semitone offset from `original` to `target`, 0 if either key is unknown
#[wasm_bindgen]
pub fn offset_for(original: &str, target: &str) -> i32 {
    praise::offset_for(original, target)
}

/// Transpose a sheet written in `original` into `target`
#[wasm_bindgen]
pub fn transpose_to_key(text: &str, original: &str, target: &str) -> String {
    praise::transpose_to_key(text, original, target)
}

/// Whether two arrays of song ids differ in content or order
#[wasm_bindgen]
pub fn has_order_changed(old: JsValue, new: JsValue) -> Result<bool, JsValue> {
    let old: Vec<String> = serde_wasm_bindgen::from_value(old).map_err(|e| to_js_error(e.into()))?;
    let new: Vec<String> = serde_wasm_bindgen::from_value(new).map_err(|e| to_js_error(e.into()))?;
    Ok(praise::has_order_changed(&old, &new))
}

/// `[{ song_id, position }]` rows for an ordered array of song ids
#[wasm_bindgen]
pub fn build_replacement(order: JsValue) -> Result<JsValue, JsValue> {
    let order: Vec<String> = serde_wasm_bindgen::from_value(order).map_err(|e| to_js_error(e.into()))?;
    serde_wasm_bindgen::to_value(&praise::build_replacement(&order)).map_err(|e| to_js_error(e.into()))
}

/// Filter a JSON array of songs by title, artist or category, sorted by title
#[wasm_bindgen]
pub fn search_songs(songs_json: &str, term: &str) -> Result<String, JsValue> {
    search(songs_json, term).map_err(to_js_error)
}

/// Plain-text rendering of a JSON setlist view
#[wasm_bindgen]
pub fn export_setlist_text(view_json: &str) -> Result<String, JsValue> {
    setlist_text(view_json).map_err(to_js_error)
}

/// Word 2003 XML rendering of a JSON setlist view
#[wasm_bindgen]
pub fn export_setlist_word(view_json: &str) -> Result<String, JsValue> {
    setlist_word_xml(view_json).map_err(to_js_error)
}

/// Bundled songs as a JSON array of library records
#[wasm_bindgen]
pub fn builtin_songs() -> Result<String, JsValue> {
    bundled_songs()
        .and_then(|songs| Ok(serde_json::to_string(&songs)?))
        .map_err(to_js_error)
}
