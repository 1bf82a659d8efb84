//! Append-only record of what happened at the table.
//!
//! The log is the only channel through which a frontend learns about asks,
//! responses and books; entries are never edited or reordered, so their index
//! is a stable key.

use crate::cards::Rank;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Answer to an ask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum Response {
    GoFish,
    /// Number of cards handed over, 1 to 3.
    TakeThese { count: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content")]
pub enum Announcement {
    Action {
        player_asking: usize,
        player_asked: usize,
        asked_for: Rank,
        response: Response,
    },
    BookFormed {
        player: usize,
        book: Rank,
    },
}

impl Announcement {
    /// Seat the announcement is about: the asker or the book owner.
    pub fn actor(&self) -> usize {
        match *self {
            Announcement::Action { player_asking, .. } => player_asking,
            Announcement::BookFormed { player, .. } => player,
        }
    }
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Announcement::Action { player_asking, player_asked, asked_for, response } => {
                write!(f, "P{player_asking} asks P{player_asked} for {asked_for}s: ")?;
                match response {
                    Response::GoFish => write!(f, "go fish"),
                    Response::TakeThese { count } => write!(f, "takes {count}"),
                }
            }
            Announcement::BookFormed { player, book } => {
                write!(f, "P{player} completes the book of {book}s")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnouncementLog {
    entries: Vec<Announcement>,
}

impl AnnouncementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, announcement: Announcement) {
        self.entries.push(announcement);
    }

    /// Every entry in insertion order.
    pub fn all(&self) -> &[Announcement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended after the first `mark` entries.
    pub fn since(&self, mark: usize) -> &[Announcement] {
        &self.entries[mark.min(self.entries.len())..]
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> &[Announcement] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }
}
