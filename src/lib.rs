//! go-fish: a self-playing Go Fish engine
//!
//! Goals:
//! - One atomic action per [`step`](game::GameEngine::step), so a frontend can
//!   pace and animate the game however it likes
//! - Reproducible games from a seed
//! - Owned, serializable [`snapshot`](game::GameEngine::snapshot)s that never
//!   borrow from the engine
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: play a seeded game to the end
//! ```
//! use go_fish::config::{GameConfig, PolicyKind};
//! use go_fish::engine::Engine;
//! use go_fish::game::GameEngine;
//!
//! let config = GameConfig::new(3)
//!     .with_seed(42)
//!     .with_policies(vec![PolicyKind::Random, PolicyKind::Cycling, PolicyKind::Recall]);
//! let mut game = GameEngine::new(config).unwrap();
//! game.run_to_end(100_000).unwrap();
//!
//! let state = game.snapshot();
//! assert_eq!(state.total_books(), 13);
//! assert!(game.winner().is_some());
//! ```
//!
//! ## CLI
//! Watch a game or simulate many with:
//! ```sh
//! cargo run --bin go-fish -- play --players 4 --seed 7
//! cargo run --bin go-fish -- simulate --games 1000 --policy recall --policy random
//! ```

pub mod announce;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod policy;
pub mod snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
