pub mod api;
pub mod availability;
pub mod chord;
pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod models;
pub mod roster;
pub mod setlist;
pub mod song;
pub mod store;
pub mod transpose;

pub use api::*;
pub use availability::{group_by_month, MonthGroup};
pub use chord::{scale_index, transpose_chord, ChordToken, CHROMATIC_SCALE};
pub use config::Config;
pub use error::*;
pub use library::{filter_by_title, search_songs};
pub use models::*;
pub use setlist::{build_replacement, has_order_changed, move_song, Direction, StagedOrder};
pub use song::{parse_song, to_song_file};
pub use store::{MemoryStore, Store};
pub use transpose::{
    is_chord_line, normalize_tabs, offset_for, transpose, transpose_to_key,
    transpose_with_tab_width, DEFAULT_TAB_WIDTH,
};
