//! Construction parameters for a game.
//!
//! A `GameConfig` is plain data: it can be built in code with the `with_*`
//! methods or deserialized from JSON. Nothing is checked until
//! [`GameConfig::validate`], which the engine calls on construction.

use crate::cards::DECK_SIZE;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Supported table sizes.
pub const PLAYER_RANGE: RangeInclusive<usize> = 2..=6;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("player count must be between 2 and 6, got {0}")]
    PlayerCount(usize),
    #[error("deal size must be at least one card")]
    EmptyDeal,
    #[error("dealing {per_player} cards to {players} players needs more than 52 cards")]
    DealExceedsDeck { players: usize, per_player: usize },
    #[error("expected one policy per seat ({players}), got {policies}")]
    PolicyCount { players: usize, policies: usize },
}

/// How many cards each player receives before play starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealRule {
    /// Seven cards for two or three players, five for four or more.
    #[default]
    Standard,
    Fixed(usize),
}

impl DealRule {
    pub fn cards_per_player(self, players: usize) -> usize {
        match self {
            DealRule::Standard if players <= 3 => 7,
            DealRule::Standard => 5,
            DealRule::Fixed(n) => n,
        }
    }
}

/// Built-in turn policies selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    Random,
    Cycling,
    Recall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_count: usize,
    /// Seed for the shuffle and every policy decision. Drawn at random when absent.
    pub seed: Option<u64>,
    pub deal: DealRule,
    /// One entry per seat; empty means every seat plays [`PolicyKind::Random`].
    pub policies: Vec<PolicyKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { player_count: 3, seed: None, deal: DealRule::Standard, policies: Vec::new() }
    }
}

impl GameConfig {
    pub fn new(player_count: usize) -> Self {
        Self { player_count, ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_deal(mut self, deal: DealRule) -> Self {
        self.deal = deal;
        self
    }

    pub fn with_policies(mut self, policies: Vec<PolicyKind>) -> Self {
        self.policies = policies;
        self
    }

    pub fn cards_per_player(&self) -> usize {
        self.deal.cards_per_player(self.player_count)
    }

    /// Policy for `seat`, falling back to the default when none were listed.
    pub fn policy_for(&self, seat: usize) -> PolicyKind {
        self.policies.get(seat).copied().unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = self.player_count;
        if !PLAYER_RANGE.contains(&players) {
            return Err(ConfigError::PlayerCount(players));
        }
        let per_player = self.cards_per_player();
        if per_player == 0 {
            return Err(ConfigError::EmptyDeal);
        }
        if players.saturating_mul(per_player) > DECK_SIZE {
            return Err(ConfigError::DealExceedsDeck { players, per_player });
        }
        if !self.policies.is_empty() && self.policies.len() != players {
            return Err(ConfigError::PolicyCount { players, policies: self.policies.len() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_deal_depends_on_table_size() {
        assert_eq!(DealRule::Standard.cards_per_player(2), 7);
        assert_eq!(DealRule::Standard.cards_per_player(3), 7);
        assert_eq!(DealRule::Standard.cards_per_player(4), 5);
        assert_eq!(DealRule::Standard.cards_per_player(6), 5);
        assert_eq!(DealRule::Fixed(9).cards_per_player(2), 9);
    }

    #[test]
    fn player_count_outside_range_is_rejected() {
        assert_eq!(GameConfig::new(1).validate(), Err(ConfigError::PlayerCount(1)));
        assert_eq!(GameConfig::new(7).validate(), Err(ConfigError::PlayerCount(7)));
        for n in PLAYER_RANGE {
            assert_eq!(GameConfig::new(n).validate(), Ok(()));
        }
    }

    #[test]
    fn oversized_and_empty_deals_are_rejected() {
        let cfg = GameConfig::new(6).with_deal(DealRule::Fixed(9));
        assert_eq!(cfg.validate(), Err(ConfigError::DealExceedsDeck { players: 6, per_player: 9 }));
        assert_eq!(GameConfig::new(4).with_deal(DealRule::Fixed(13)).validate(), Ok(()));
        assert_eq!(
            GameConfig::new(2).with_deal(DealRule::Fixed(0)).validate(),
            Err(ConfigError::EmptyDeal)
        );
    }

    #[test]
    fn policy_list_must_cover_every_seat() {
        let cfg = GameConfig::new(3).with_policies(vec![PolicyKind::Cycling]);
        assert_eq!(cfg.validate(), Err(ConfigError::PolicyCount { players: 3, policies: 1 }));
        let cfg =
            cfg.with_policies(vec![PolicyKind::Cycling, PolicyKind::Random, PolicyKind::Recall]);
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.policy_for(2), PolicyKind::Recall);
        assert_eq!(GameConfig::new(3).policy_for(1), PolicyKind::Random);
    }

    #[test]
    fn deserializes_from_partial_json() {
        let cfg: GameConfig =
            serde_json::from_str(r#"{"player_count": 4, "seed": 11, "deal": {"fixed": 6}}"#)
                .unwrap();
        assert_eq!(cfg.player_count, 4);
        assert_eq!(cfg.seed, Some(11));
        assert_eq!(cfg.deal, DealRule::Fixed(6));
        assert!(cfg.policies.is_empty());

        let cfg: GameConfig =
            serde_json::from_str(r#"{"policies": ["cycling", "random", "recall"]}"#).unwrap();
        assert_eq!(cfg.player_count, 3);
        assert_eq!(cfg.deal, DealRule::Standard);
        assert_eq!(cfg.validate(), Ok(()));
    }
}
