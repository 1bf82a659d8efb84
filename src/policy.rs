//! Turn policies: the pluggable decision procedure behind each seat.
//!
//! The engine owns one boxed [`TurnPolicy`] per seat and consults it whenever
//! that seat has to ask. Policies only see a [`TableView`] of the game and the
//! engine's RNG, so a seeded engine makes every decision reproducible. Custom
//! policies can be installed with [`GameEngine::with_policies`], which is how
//! tests script exact asks.
//!
//! [`GameEngine::with_policies`]: crate::game::GameEngine::with_policies

use crate::announce::Announcement;
use crate::cards::{Card, Rank};
use crate::config::PolicyKind;
use rand::RngCore;

mod strategies;

pub use strategies::{CyclingPolicy, RandomPolicy, RecallPolicy};

/// A request for every card of `rank` held by seat `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ask {
    pub target: usize,
    pub rank: Rank,
}

/// What any player can see about a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatView {
    pub seat: usize,
    pub cards_in_hand: usize,
    pub books: usize,
}

/// Everything a policy is shown when its seat must act.
#[derive(Debug, Clone, Copy)]
pub struct TableView<'a> {
    /// The acting seat.
    pub seat: usize,
    /// The acting seat's own cards.
    pub hand: &'a [Card],
    pub seats: &'a [SeatView],
    pub pool_count: usize,
}

impl TableView<'_> {
    /// Seats that may legally be asked: anyone else still holding cards.
    pub fn targets(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| s.seat != self.seat && s.cards_in_hand > 0)
            .map(|s| s.seat)
            .collect()
    }

    pub fn holds(&self, rank: Rank) -> bool {
        self.hand.iter().any(|c| c.rank() == rank)
    }

    pub fn count(&self, rank: Rank) -> usize {
        self.hand.iter().filter(|c| c.rank() == rank).count()
    }
}

/// A seat controller consulted once per ask.
pub trait TurnPolicy {
    /// Pick whom to ask and for what. Must return a rank present in `view.hand`
    /// and a seat from `view.targets()`, or `None` when there is nobody to ask.
    /// Draws made from `rng` are discarded if the engine rejects the ask.
    fn choose(&mut self, view: &TableView<'_>, rng: &mut dyn RngCore) -> Option<Ask>;

    /// Called for every card that enters this seat's hand (deal, draw or transfer).
    fn on_card(&mut self, _card: Card) {}

    /// Called for every announcement, in log order, after the step that produced it.
    fn observe(&mut self, _announcement: &Announcement) {}

    fn name(&self) -> &'static str;
}

impl PolicyKind {
    /// Instantiate the built-in policy for `seat`.
    pub fn build(self, seat: usize) -> Box<dyn TurnPolicy> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new()),
            PolicyKind::Cycling => Box::new(CyclingPolicy::new()),
            PolicyKind::Recall => Box::new(RecallPolicy::new(seat)),
        }
    }
}
