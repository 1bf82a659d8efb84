use crate::announce::{Announcement, AnnouncementLog, Response};
use crate::cards::{Card, Rank, DECK_SIZE};
use crate::config::{ConfigError, GameConfig};
use crate::deck::Deck;
use crate::hand::{Book, PlayerHand};
use crate::policy::{Ask, SeatView, TableView, TurnPolicy};
use crate::snapshot::{GameState, PlayerState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use tracing::{debug, info, trace, warn};

/// Top-level phase of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "content")]
pub enum Stage {
    /// `who_next` receives the next dealt card.
    Dealing { who_next: usize },
    /// `who_next` acts on the next step.
    Playing { who_next: usize },
    /// Seats ordered by book count, most first; ties go to the lower seat.
    Done { ranking: Vec<usize> },
}

impl Stage {
    pub fn is_done(&self) -> bool {
        matches!(self, Stage::Done { .. })
    }

    pub fn winner(&self) -> Option<usize> {
        match self {
            Stage::Done { ranking } => ranking.first().copied(),
            _ => None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AskError {
    #[error("cannot ask yourself")]
    SelfAsk,
    #[error("no player at seat {0}")]
    UnknownSeat(usize),
    #[error("player {0} holds no cards")]
    EmptyHandedTarget(usize),
    #[error("asker holds no {0}")]
    RankNotHeld(Rank),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("the game is already over")]
    GameAlreadyOver,
    #[error("invalid ask by player {asker}: {reason}")]
    InvalidAsk { asker: usize, reason: AskError },
    #[error("game still running after {limit} steps")]
    StepLimitExceeded { limit: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvariantViolation {
    #[error("{0} cards accounted for, expected 52")]
    CardCount(usize),
    #[error("card {0} is in more than one place")]
    Duplicate(Card),
    #[error("player {player} holds a book of {rank}s with foreign cards")]
    MalformedBook { player: usize, rank: Rank },
    #[error("player {player} still holds four {rank}s")]
    UnpromotedBook { player: usize, rank: Rank },
}

/// A self-playing game of Go Fish, advanced one atomic action per [`step`](Self::step).
///
/// ```
/// use go_fish::game::GameEngine;
///
/// let mut game = GameEngine::with_players(3, 7).unwrap();
/// while !game.is_over() {
///     game.step().unwrap();
/// }
/// assert_eq!(game.snapshot().total_books(), 13);
/// ```
pub struct GameEngine {
    seed: u64,
    cards_per_player: usize,
    dealt: usize,
    deck: Deck,
    players: Vec<PlayerHand>,
    log: AnnouncementLog,
    stage: Stage,
    rng: ChaCha8Rng,
    policies: Vec<Box<dyn TurnPolicy>>,
}

impl fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policies: Vec<&str> = self.policies.iter().map(|p| p.name()).collect();
        f.debug_struct("GameEngine")
            .field("seed", &self.seed)
            .field("stage", &self.stage)
            .field("pool", &self.deck.len())
            .field("players", &self.players)
            .field("announcements", &self.log.len())
            .field("policies", &policies)
            .finish()
    }
}

impl GameEngine {
    /// Build a game with the built-in policies named by `config`.
    pub fn new(config: GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let policies =
            (0..config.player_count).map(|seat| config.policy_for(seat).build(seat)).collect();
        Self::with_policies(config, policies)
    }

    /// Standard deal, random policies, fixed seed.
    pub fn with_players(player_count: usize, seed: u64) -> Result<Self, EngineError> {
        Self::new(GameConfig::new(player_count).with_seed(seed))
    }

    /// Build a game driven by caller-supplied policies, one per seat in seat
    /// order. The kinds listed in `config.policies` are not used.
    pub fn with_policies(
        config: GameConfig,
        policies: Vec<Box<dyn TurnPolicy>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let players = config.player_count;
        if policies.len() != players {
            return Err(ConfigError::PolicyCount { players, policies: policies.len() }.into());
        }
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = Deck::standard();
        deck.shuffle_with(&mut rng);
        debug!(seed, players, per_player = config.cards_per_player(), "new game");
        Ok(Self {
            seed,
            cards_per_player: config.cards_per_player(),
            dealt: 0,
            deck,
            players: vec![PlayerHand::new(); players],
            log: AnnouncementLog::new(),
            stage: Stage::Dealing { who_next: 0 },
            rng,
            policies,
        })
    }

    /// Seed the shuffle and all policy decisions were derived from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn is_over(&self) -> bool {
        self.stage.is_done()
    }

    pub fn winner(&self) -> Option<usize> {
        self.stage.winner()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn cards_per_player(&self) -> usize {
        self.cards_per_player
    }

    /// Cards left in the undealt pool.
    pub fn pool_count(&self) -> usize {
        self.deck.len()
    }

    pub fn players(&self) -> &[PlayerHand] {
        &self.players
    }

    pub fn announcements(&self) -> &AnnouncementLog {
        &self.log
    }

    /// Advance by exactly one atomic action.
    ///
    /// Either the whole transition applies or, on error, the engine is left as
    /// it was, RNG included. A rejected ask can still have changed the acting
    /// policy's own bookkeeping, since `choose` takes `&mut self`.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let mark = self.log.len();
        trace!(stage = ?self.stage, "step");
        match self.stage {
            Stage::Dealing { who_next } => self.deal_one(who_next),
            Stage::Playing { who_next } => self.play_turn(who_next)?,
            Stage::Done { .. } => return Err(EngineError::GameAlreadyOver),
        }
        for announcement in self.log.since(mark) {
            for policy in &mut self.policies {
                policy.observe(announcement);
            }
        }
        debug_assert_eq!(self.check_invariants(), Ok(()));
        Ok(())
    }

    /// Owned copy of everything a frontend may show.
    pub fn snapshot(&self) -> GameState {
        GameState {
            pool_count: self.deck.len(),
            players: self
                .players
                .iter()
                .map(|p| PlayerState {
                    hand: p.hand().as_slice().to_vec(),
                    books: p.books().iter().map(Book::cards).collect(),
                })
                .collect(),
            announcements: self.log.all().to_vec(),
            stage: self.stage.clone(),
        }
    }

    /// The snapshot as a JSON document.
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.snapshot())
    }

    /// Verify conservation and uniqueness of the 52 cards and the shape of every book.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = [false; DECK_SIZE];
        let mut total = 0;
        let held = self.players.iter().flat_map(|p| {
            p.hand().as_slice().iter().copied().chain(p.books().iter().flat_map(|b| b.cards()))
        });
        for card in self.deck.cards().iter().copied().chain(held) {
            total += 1;
            let slot = &mut seen[card.value() as usize];
            if *slot {
                return Err(InvariantViolation::Duplicate(card));
            }
            *slot = true;
        }
        if total != DECK_SIZE {
            return Err(InvariantViolation::CardCount(total));
        }
        for (player, p) in self.players.iter().enumerate() {
            for book in p.books() {
                if book.cards().iter().any(|c| c.rank() != book.rank()) {
                    return Err(InvariantViolation::MalformedBook { player, rank: book.rank() });
                }
            }
            if let Some(rank) = p.hand().ranks().into_iter().find(|&r| p.hand().count_rank(r) >= 4)
            {
                return Err(InvariantViolation::UnpromotedBook { player, rank });
            }
        }
        Ok(())
    }

    fn next_seat(&self, seat: usize) -> usize {
        (seat + 1) % self.players.len()
    }

    fn deal_one(&mut self, seat: usize) {
        if let Some(card) = self.deck.draw() {
            self.give(seat, card);
            self.dealt += 1;
            self.promote_books(seat);
        }
        if self.dealt >= self.players.len() * self.cards_per_player || self.deck.is_empty() {
            debug!(pool = self.deck.len(), "dealing complete");
            self.stage = Stage::Playing { who_next: 0 };
            self.check_game_over();
        } else {
            self.stage = Stage::Dealing { who_next: self.next_seat(seat) };
        }
    }

    fn play_turn(&mut self, seat: usize) -> Result<(), EngineError> {
        let next = self.next_seat(seat);

        if self.players[seat].hand().is_empty() {
            // out of cards: replenish from the pool and keep the turn, or sit out
            match self.deck.draw() {
                Some(card) => {
                    debug!(player = seat, "draws into an empty hand");
                    self.give(seat, card);
                    self.promote_books(seat);
                }
                None => self.stage = Stage::Playing { who_next: next },
            }
            self.check_game_over();
            return Ok(());
        }

        let seats = self.seat_views();
        if !seats.iter().any(|s| s.seat != seat && s.cards_in_hand > 0) {
            // nobody to ask
            if let Some(card) = self.deck.draw() {
                debug!(player = seat, "no one to ask, draws");
                self.give(seat, card);
                self.promote_books(seat);
            }
            self.stage = Stage::Playing { who_next: next };
            self.check_game_over();
            return Ok(());
        }

        let view = TableView {
            seat,
            hand: self.players[seat].hand().as_slice(),
            seats: &seats,
            pool_count: self.deck.len(),
        };
        // draws come from a copy, committed only once the ask is accepted
        let mut rng = self.rng.clone();
        let Some(ask) = self.policies[seat].choose(&view, &mut rng) else {
            warn!(player = seat, policy = self.policies[seat].name(), "policy declined to ask");
            self.rng = rng;
            self.stage = Stage::Playing { who_next: next };
            return Ok(());
        };
        self.validate_ask(seat, ask)
            .map_err(|reason| EngineError::InvalidAsk { asker: seat, reason })?;
        self.rng = rng;
        self.resolve(seat, ask);
        self.check_game_over();
        Ok(())
    }

    fn validate_ask(&self, seat: usize, ask: Ask) -> Result<(), AskError> {
        if ask.target == seat {
            return Err(AskError::SelfAsk);
        }
        let target = self.players.get(ask.target).ok_or(AskError::UnknownSeat(ask.target))?;
        if target.hand().is_empty() {
            return Err(AskError::EmptyHandedTarget(ask.target));
        }
        if !self.players[seat].hand().has_rank(ask.rank) {
            return Err(AskError::RankNotHeld(ask.rank));
        }
        Ok(())
    }

    fn resolve(&mut self, seat: usize, ask: Ask) {
        let taken = self.players[ask.target].give_up(ask.rank);
        let response = if taken.is_empty() {
            if let Some(card) = self.deck.draw() {
                self.give(seat, card);
            }
            Response::GoFish
        } else {
            let count = taken.len() as u8;
            for card in taken {
                self.give(seat, card);
            }
            Response::TakeThese { count }
        };
        debug!(asker = seat, target = ask.target, rank = %ask.rank, ?response, "ask resolved");
        self.log.push(Announcement::Action {
            player_asking: seat,
            player_asked: ask.target,
            asked_for: ask.rank,
            response,
        });
        self.promote_books(seat);
        if response == Response::GoFish {
            self.stage = Stage::Playing { who_next: self.next_seat(seat) };
        }
    }

    fn give(&mut self, seat: usize, card: Card) {
        self.players[seat].receive(card);
        self.policies[seat].on_card(card);
    }

    fn promote_books(&mut self, seat: usize) {
        for book in self.players[seat].promote_books() {
            debug!(player = seat, book = %book, "book formed");
            self.log.push(Announcement::BookFormed { player: seat, book });
        }
    }

    fn seat_views(&self) -> Vec<SeatView> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| SeatView {
                seat,
                cards_in_hand: p.hand().len(),
                books: p.book_count(),
            })
            .collect()
    }

    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by_key(|&i| (Reverse(self.players[i].book_count()), i));
        order
    }

    fn check_game_over(&mut self) {
        let books: usize = self.players.iter().map(PlayerHand::book_count).sum();
        let all_booked = books * 4 == DECK_SIZE;
        let exhausted = self.deck.is_empty() && self.players.iter().all(|p| p.hand().is_empty());
        if all_booked || exhausted {
            let ranking = self.ranking();
            info!(winner = ranking[0], ?ranking, announcements = self.log.len(), "game over");
            self.stage = Stage::Done { ranking };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Suit};
    use crate::policy::RandomPolicy;
    use rand::RngCore;
    use std::collections::VecDeque;

    /// Replays a fixed list of asks, then declines.
    #[derive(Debug)]
    struct Scripted(VecDeque<Ask>);

    impl TurnPolicy for Scripted {
        fn choose(&mut self, _view: &TableView<'_>, _rng: &mut dyn RngCore) -> Option<Ask> {
            self.0.pop_front()
        }
        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn scripted(asks: &[(usize, Rank)]) -> Box<dyn TurnPolicy> {
        Box::new(Scripted(asks.iter().map(|&(target, rank)| Ask { target, rank }).collect()))
    }

    fn idle() -> Box<dyn TurnPolicy> {
        Box::new(RandomPolicy::new())
    }

    enum Pool<'a> {
        /// Every unassigned card, with these on top; the first listed is drawn first.
        Rest { top: &'a str },
        /// Nothing left to draw; unassigned full ranks become books of the
        /// last seat and stray cards go to its hand.
        Empty,
    }

    /// A game in `Playing { who_next: 0 }` with the given hands.
    fn arranged(hands: &[&str], pool: Pool<'_>, policies: Vec<Box<dyn TurnPolicy>>) -> GameEngine {
        let mut g = GameEngine::with_policies(GameConfig::new(hands.len()).with_seed(1), policies)
            .expect("valid config");
        g.players = vec![PlayerHand::new(); hands.len()];
        let mut placed: Vec<Card> = Vec::new();
        for (seat, listed) in hands.iter().enumerate() {
            for card in parse_cards(listed).unwrap() {
                g.players[seat].receive(card);
                placed.push(card);
            }
        }
        let last = hands.len() - 1;
        match pool {
            Pool::Rest { top } => {
                let top = parse_cards(top).unwrap();
                let mut cards: Vec<Card> =
                    Card::all().filter(|c| !placed.contains(c) && !top.contains(c)).collect();
                cards.extend(top.iter().rev());
                g.deck = Deck::from_cards(cards);
            }
            Pool::Empty => {
                for card in Card::all().filter(|c| !placed.contains(c)) {
                    g.players[last].receive(card);
                }
                g.players[last].promote_books();
                g.deck = Deck::from_cards(Vec::new());
            }
        }
        g.dealt = g.players.len() * g.cards_per_player;
        g.stage = Stage::Playing { who_next: 0 };
        g.check_invariants().expect("arranged table is consistent");
        g
    }

    fn hand_of(g: &GameEngine, seat: usize) -> Vec<Card> {
        g.players[seat].hand().as_slice().to_vec()
    }

    #[test]
    fn successful_ask_completing_a_book_keeps_the_turn() {
        let mut g = arranged(
            &["Ks Kh Kd 2s", "Kc 5h", "9d"],
            Pool::Rest { top: "" },
            vec![scripted(&[(1, Rank::King)]), idle(), idle()],
        );
        g.step().unwrap();

        assert_eq!(hand_of(&g, 0), parse_cards("2s").unwrap());
        assert_eq!(g.players[0].book_count(), 1);
        assert_eq!(hand_of(&g, 1), parse_cards("5h").unwrap());
        assert_eq!(
            g.announcements().all(),
            &[
                Announcement::Action {
                    player_asking: 0,
                    player_asked: 1,
                    asked_for: Rank::King,
                    response: Response::TakeThese { count: 1 },
                },
                Announcement::BookFormed { player: 0, book: Rank::King },
            ]
        );
        assert_eq!(g.stage(), &Stage::Playing { who_next: 0 });
    }

    #[test]
    fn take_these_counts_every_matching_card() {
        let mut g = arranged(
            &["7s 3c", "7h 7d 9s", "Jd"],
            Pool::Rest { top: "" },
            vec![scripted(&[(1, Rank::Seven)]), idle(), idle()],
        );
        g.step().unwrap();
        assert_eq!(
            g.announcements().all()[0],
            Announcement::Action {
                player_asking: 0,
                player_asked: 1,
                asked_for: Rank::Seven,
                response: Response::TakeThese { count: 2 },
            }
        );
        assert_eq!(g.players[0].hand().count_rank(Rank::Seven), 3);
        assert_eq!(g.announcements().len(), 1, "no book with three sevens");
        assert_eq!(g.stage(), &Stage::Playing { who_next: 0 });
    }

    #[test]
    fn go_fish_draws_one_card_and_passes_the_turn() {
        let mut g = arranged(
            &["4s 4h", "9c", "Jd"],
            Pool::Rest { top: "7d" },
            vec![scripted(&[(1, Rank::Four)]), idle(), idle()],
        );
        let pool_before = g.pool_count();
        g.step().unwrap();

        assert_eq!(hand_of(&g, 0), parse_cards("4s 4h 7d").unwrap());
        assert_eq!(g.pool_count(), pool_before - 1);
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
        assert_eq!(
            g.announcements().all(),
            &[Announcement::Action {
                player_asking: 0,
                player_asked: 1,
                asked_for: Rank::Four,
                response: Response::GoFish,
            }]
        );
    }

    #[test]
    fn go_fish_draw_can_complete_a_book_without_an_extra_turn() {
        let mut g = arranged(
            &["4s 4h 4d 8c", "9c", "Jd"],
            Pool::Rest { top: "4c" },
            vec![scripted(&[(2, Rank::Eight)]), idle(), idle()],
        );
        g.step().unwrap();
        assert_eq!(hand_of(&g, 0), parse_cards("8c").unwrap());
        assert_eq!(
            g.announcements().all()[1],
            Announcement::BookFormed { player: 0, book: Rank::Four }
        );
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
    }

    #[test]
    fn go_fish_with_empty_pool_passes_without_drawing() {
        let mut g = arranged(
            &["4s", "9c", ""],
            Pool::Empty,
            vec![scripted(&[(1, Rank::Four)]), idle(), idle()],
        );
        g.step().unwrap();

        assert_eq!(hand_of(&g, 0), parse_cards("4s").unwrap());
        assert_eq!(g.pool_count(), 0);
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
        assert!(!g.is_over());
    }

    #[test]
    fn invalid_asks_change_nothing() {
        let cases = [
            ((0, Rank::Four), AskError::SelfAsk),
            ((7, Rank::Four), AskError::UnknownSeat(7)),
            ((2, Rank::Four), AskError::EmptyHandedTarget(2)),
            ((1, Rank::Queen), AskError::RankNotHeld(Rank::Queen)),
        ];
        for ((target, rank), reason) in cases {
            let mut g = arranged(
                &["4s 4h", "9c", ""],
                Pool::Rest { top: "" },
                vec![scripted(&[(target, rank)]), idle(), idle()],
            );
            let before = g.snapshot();
            assert_eq!(g.step(), Err(EngineError::InvalidAsk { asker: 0, reason }));
            assert_eq!(g.snapshot(), before);
        }
    }

    #[test]
    fn empty_hand_draws_from_pool_and_keeps_turn() {
        let mut g =
            arranged(&["", "9c", "Jd"], Pool::Rest { top: "3h" }, vec![idle(), idle(), idle()]);
        g.step().unwrap();
        assert_eq!(hand_of(&g, 0), vec![Card::new(Rank::Three, Suit::Hearts)]);
        assert_eq!(g.stage(), &Stage::Playing { who_next: 0 });
        assert!(g.announcements().is_empty());
    }

    #[test]
    fn empty_hand_with_empty_pool_sits_out() {
        let mut g = arranged(&["", "4s 4h", ""], Pool::Empty, vec![idle(), idle(), idle()]);
        g.step().unwrap();
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
        assert!(g.announcements().is_empty());
    }

    #[test]
    fn lone_holder_draws_and_passes_when_nobody_can_be_asked() {
        let mut g =
            arranged(&["4s", "", ""], Pool::Rest { top: "Qd" }, vec![idle(), idle(), idle()]);
        g.step().unwrap();
        assert_eq!(hand_of(&g, 0), parse_cards("4s Qd").unwrap());
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
        assert!(g.announcements().is_empty());
    }

    #[test]
    fn declining_policy_forfeits_the_turn() {
        let mut g = arranged(
            &["4s", "9c", "Jd"],
            Pool::Rest { top: "" },
            vec![scripted(&[]), idle(), idle()],
        );
        let before = g.players.clone();
        g.step().unwrap();
        assert_eq!(g.players, before);
        assert_eq!(g.stage(), &Stage::Playing { who_next: 1 });
    }

    #[test]
    fn all_books_claimed_ends_the_game_and_further_steps_fail() {
        let mut g = arranged(&["", "", ""], Pool::Empty, vec![idle(), idle(), idle()]);
        g.step().unwrap();
        assert_eq!(g.stage(), &Stage::Done { ranking: vec![2, 0, 1] });
        assert_eq!(g.winner(), Some(2));

        let before = g.snapshot();
        assert_eq!(g.step(), Err(EngineError::GameAlreadyOver));
        assert_eq!(g.snapshot(), before);
    }

    #[test]
    fn ranking_orders_by_books_then_seat() {
        let mut g = GameEngine::with_players(4, 3).unwrap();
        let mut credit = |seat: usize, rank: Rank| {
            for card in rank.in_all_suits() {
                g.players[seat].receive(card);
            }
            g.players[seat].promote_books();
        };
        credit(1, Rank::Ace);
        credit(1, Rank::Two);
        credit(3, Rank::Three);
        credit(2, Rank::Four);
        assert_eq!(g.ranking(), vec![1, 2, 3, 0]);
    }

    #[test]
    fn dealing_promotes_a_dealt_four_of_a_kind() {
        let mut g = GameEngine::with_players(2, 1).unwrap();
        // alternate queens and fives off the top so each seat is dealt a full rank
        let queens = Rank::Queen.in_all_suits();
        let fives = Rank::Five.in_all_suits();
        let mut stacked: Vec<Card> =
            Card::all().filter(|c| !queens.contains(c) && !fives.contains(c)).collect();
        for i in (0..4).rev() {
            stacked.push(fives[i]);
            stacked.push(queens[i]);
        }
        g.deck = Deck::from_cards(stacked);

        for _ in 0..8 {
            g.step().unwrap();
        }
        assert_eq!(g.stage(), &Stage::Dealing { who_next: 0 });
        assert_eq!(
            g.announcements().all(),
            &[
                Announcement::BookFormed { player: 0, book: Rank::Queen },
                Announcement::BookFormed { player: 1, book: Rank::Five },
            ]
        );
        assert!(g.players[0].hand().is_empty());
        assert!(g.players[1].hand().is_empty());
    }

    #[test]
    fn dealing_hands_out_round_robin_then_starts_play() {
        let mut g = GameEngine::with_players(4, 9).unwrap();
        let mut recipients = Vec::new();
        while let Stage::Dealing { who_next } = *g.stage() {
            recipients.push(who_next);
            g.step().unwrap();
        }
        assert_eq!(recipients.len(), 20);
        assert!(recipients.iter().enumerate().all(|(i, &seat)| seat == i % 4));
        assert_eq!(g.stage(), &Stage::Playing { who_next: 0 });
        assert_eq!(g.pool_count(), 32);
    }
}
