//! Owned, serializable views of a game handed to frontends.

use crate::announce::Announcement;
use crate::cards::Card;
use crate::game::Stage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Held cards in arrival order.
    pub hand: Vec<Card>,
    /// Completed books, each in card value order.
    pub books: Vec<[Card; 4]>,
}

/// Everything a renderer needs to draw the table. Produced by
/// [`GameEngine::snapshot`](crate::game::GameEngine::snapshot); holds no references
/// into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub pool_count: usize,
    pub players: Vec<PlayerState>,
    pub announcements: Vec<Announcement>,
    pub stage: Stage,
}

impl GameState {
    pub fn total_books(&self) -> usize {
        self.players.iter().map(|p| p.books.len()).sum()
    }

    /// Cards visible anywhere in the snapshot; 52 for any consistent game.
    pub fn card_count(&self) -> usize {
        let held: usize = self.players.iter().map(|p| p.hand.len() + 4 * p.books.len()).sum();
        self.pool_count + held
    }
}
