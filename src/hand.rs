use crate::cards::{Card, Rank};
use serde::{Deserialize, Serialize};

/// All four cards of one rank, out of play and credited to a player. Only
/// built by book promotion, so a book is always complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    rank: Rank,
    cards: [Card; 4],
}

impl Book {
    pub(crate) fn of_rank(rank: Rank) -> Self {
        Self { rank, cards: rank.in_all_suits() }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The four cards in value order.
    pub fn cards(&self) -> [Card; 4] {
        self.cards
    }
}

/// Cards currently held by one player, in the order they arrived.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub fn count_rank(&self, rank: Rank) -> usize {
        self.cards.iter().filter(|c| c.rank() == rank).count()
    }

    pub fn has_rank(&self, rank: Rank) -> bool {
        self.cards.iter().any(|c| c.rank() == rank)
    }

    /// Distinct ranks held, in rank order.
    pub fn ranks(&self) -> Vec<Rank> {
        Rank::ALL.into_iter().filter(|&r| self.has_rank(r)).collect()
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return every card of `rank`, preserving the order of the rest.
    pub(crate) fn take_rank(&mut self, rank: Rank) -> Vec<Card> {
        let (taken, kept): (Vec<Card>, Vec<Card>) =
            self.cards.iter().partition(|c| c.rank() == rank);
        self.cards = kept;
        taken
    }
}

/// One seat's holdings: the live hand plus completed books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerHand {
    hand: Hand,
    books: Vec<Book>,
}

impl PlayerHand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Total cards accounted to this seat, books included.
    pub fn card_count(&self) -> usize {
        self.hand.len() + 4 * self.books.len()
    }

    pub(crate) fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    pub(crate) fn give_up(&mut self, rank: Rank) -> Vec<Card> {
        self.hand.take_rank(rank)
    }

    /// Move every four-of-a-kind out of the hand into books, returning the ranks promoted.
    pub(crate) fn promote_books(&mut self) -> Vec<Rank> {
        let mut formed = Vec::new();
        for rank in self.hand.ranks() {
            if self.hand.count_rank(rank) < 4 {
                continue;
            }
            // cards are unique, so four of a rank is exactly one per suit
            self.hand.take_rank(rank);
            self.books.push(Book::of_rank(rank));
            formed.push(rank);
        }
        formed
    }
}
