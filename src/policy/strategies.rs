use crate::announce::{Announcement, Response};
use crate::cards::{Card, Rank};
use rand::{Rng, RngCore};

use super::{Ask, TableView, TurnPolicy};

fn pick_target(view: &TableView<'_>, rng: &mut dyn RngCore) -> Option<usize> {
    let targets = view.targets();
    if targets.is_empty() {
        return None;
    }
    Some(targets[rng.random_range(0..targets.len())])
}

/// Asks a random opponent for the rank of a random card in hand, so ranks
/// held in bulk are asked for more often.
#[derive(Debug, Default)]
pub struct RandomPolicy;

impl RandomPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl TurnPolicy for RandomPolicy {
    fn choose(&mut self, view: &TableView<'_>, rng: &mut dyn RngCore) -> Option<Ask> {
        if view.hand.is_empty() {
            return None;
        }
        let target = pick_target(view, rng)?;
        let rank = view.hand[rng.random_range(0..view.hand.len())].rank();
        Some(Ask { target, rank })
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

/// Walks the ranks in cyclic order starting from the last card received and
/// asks for the next rank it holds, moving on by one after every ask.
#[derive(Debug)]
pub struct CyclingPolicy {
    next_rank: Rank,
}

impl CyclingPolicy {
    pub fn new() -> Self {
        Self { next_rank: Rank::Ace }
    }
}

impl Default for CyclingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnPolicy for CyclingPolicy {
    fn choose(&mut self, view: &TableView<'_>, rng: &mut dyn RngCore) -> Option<Ask> {
        let target = pick_target(view, rng)?;
        // bounded: an empty hand would otherwise spin forever
        for _ in 0..Rank::ALL.len() {
            let rank = self.next_rank;
            self.next_rank = rank.next();
            if view.holds(rank) {
                return Some(Ask { target, rank });
            }
        }
        None
    }

    fn on_card(&mut self, card: Card) {
        self.next_rank = card.rank();
    }

    fn name(&self) -> &'static str {
        "cycling"
    }
}

/// Tracks what the table has revealed: whoever asks for a rank must hold it.
/// Asks the latest known holder of a rank it shares; otherwise asks a random
/// opponent for its most-held rank.
#[derive(Debug)]
pub struct RecallPolicy {
    seat: usize,
    known_holder: [Option<usize>; 13],
}

impl RecallPolicy {
    pub fn new(seat: usize) -> Self {
        Self { seat, known_holder: [None; 13] }
    }

    /// Last seat known to hold `rank`, if any.
    pub fn known_holder(&self, rank: Rank) -> Option<usize> {
        self.known_holder[rank.index() as usize]
    }

    fn set(&mut self, rank: Rank, holder: Option<usize>) {
        self.known_holder[rank.index() as usize] = holder;
    }
}

impl TurnPolicy for RecallPolicy {
    fn choose(&mut self, view: &TableView<'_>, rng: &mut dyn RngCore) -> Option<Ask> {
        let targets = view.targets();
        let mut held: Vec<Rank> = Rank::ALL.into_iter().filter(|&r| view.holds(r)).collect();
        if targets.is_empty() || held.is_empty() {
            return None;
        }
        // most copies first; stable sort keeps rank order among ties
        held.sort_by_key(|&r| std::cmp::Reverse(view.count(r)));

        for &rank in &held {
            if let Some(holder) = self.known_holder(rank) {
                if targets.contains(&holder) {
                    return Some(Ask { target: holder, rank });
                }
            }
        }
        let target = targets[rng.random_range(0..targets.len())];
        Some(Ask { target, rank: held[0] })
    }

    fn observe(&mut self, announcement: &Announcement) {
        match *announcement {
            Announcement::Action { player_asking, asked_for, response, .. } => {
                if player_asking != self.seat {
                    // the asker held the rank before and holds every copy outside books after
                    self.set(asked_for, Some(player_asking));
                } else if matches!(response, Response::TakeThese { .. }) {
                    self.set(asked_for, None);
                }
            }
            Announcement::BookFormed { book, .. } => self.set(book, None),
        }
    }

    fn name(&self) -> &'static str {
        "recall"
    }
}
