//! # Setlist Reconciliation
//!
//! Decides when a setlist's song order has to be rewritten and builds the rows to
//! write.
//!
//! The store cannot reorder associations in place, so any change (insert, removal
//! or reorder) replaces the whole set: delete every entry of the setlist, then
//! insert one entry per song with its index as position. No attempt is made to
//! keep existing rows across a reorder.
//!
//! Reordering in the UI is staged with [`StagedOrder`] and only persisted when the
//! user saves, so several moves turn into a single rewrite.
//!
//! ## Example
//! ```rust
//! use praise::{build_replacement, has_order_changed, SetlistEntry};
//!
//! let old = ["s1", "s2", "s3"];
//! let new = ["s1", "s3", "s2"];
//! assert!(has_order_changed(&old, &new));
//!
//! let rows = build_replacement(&new);
//! assert_eq!(rows[1], SetlistEntry { song_id: "s3".to_string(), position: 1 });
//! ```

use tracing::debug;

use crate::models::SetlistEntry;

/// Whether two ordered song lists differ in length or at any index.
pub fn has_order_changed<T: PartialEq>(old: &[T], new: &[T]) -> bool {
    old != new
}

/// Pair every song id with its index, preserving the given order.
pub fn build_replacement<S: AsRef<str>>(order: &[S]) -> Vec<SetlistEntry> {
    order
        .iter()
        .enumerate()
        .map(|(position, id)| SetlistEntry {
            song_id: id.as_ref().to_string(),
            position,
        })
        .collect()
}

/// Direction of a manual move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("Unknown direction: {} (expected up or down)", other)),
        }
    }
}

/// Swap the item at `index` with its neighbour.
///
/// Returns `false` (and leaves the list alone) when the move would leave the
/// list: first item up, last item down, or an index out of range.
pub fn move_song<T>(order: &mut [T], index: usize, direction: Direction) -> bool {
    let neighbour = match direction {
        Direction::Up if index > 0 && index < order.len() => index - 1,
        Direction::Down if index + 1 < order.len() => index + 1,
        _ => return false,
    };
    order.swap(index, neighbour);
    true
}

/// A setlist's song order being edited, next to the order last persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StagedOrder {
    persisted: Vec<String>,
    working: Vec<String>,
}

impl StagedOrder {
    pub fn new(persisted: Vec<String>) -> Self {
        Self {
            working: persisted.clone(),
            persisted,
        }
    }

    /// The order as currently staged.
    pub fn songs(&self) -> &[String] {
        &self.working
    }

    pub fn persisted(&self) -> &[String] {
        &self.persisted
    }

    pub fn move_song(&mut self, index: usize, direction: Direction) -> bool {
        let moved = move_song(&mut self.working, index, direction);
        if moved {
            debug!(index, ?direction, "staged song move");
        }
        moved
    }

    /// Append a song unless it is already selected.
    pub fn select(&mut self, song_id: &str) -> bool {
        if self.working.iter().any(|id| id == song_id) {
            return false;
        }
        self.working.push(song_id.to_string());
        true
    }

    /// Remove every occurrence of a song.
    pub fn deselect(&mut self, song_id: &str) -> bool {
        let before = self.working.len();
        self.working.retain(|id| id != song_id);
        self.working.len() != before
    }

    pub fn is_dirty(&self) -> bool {
        has_order_changed(&self.persisted, &self.working)
    }

    /// Rows to write back, or `None` when nothing changed.
    pub fn pending_replacement(&self) -> Option<Vec<SetlistEntry>> {
        self.is_dirty().then(|| build_replacement(&self.working))
    }

    /// Record that the working order has been persisted.
    pub fn mark_committed(&mut self) {
        self.persisted = self.working.clone();
    }

    /// Drop staged changes.
    pub fn reset(&mut self) {
        self.working = self.persisted.clone();
    }
}
