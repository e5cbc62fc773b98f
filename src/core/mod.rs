//! Core types: cards, players, errors, RNG, configuration, play records.
//!
//! This module holds the building blocks the rest of the engine is
//! assembled from. Nothing here runs the game; the state machine lives
//! in `engine` and the per-card rules in `effects`.

pub mod card;
pub mod player;
pub mod error;
pub mod rng;
pub mod config;
pub mod action;

pub use card::{Card, CardId, CardKind, DECK_SIZE};
pub use player::{Player, PlayerId, PlayerMap};
pub use error::EngineError;
pub use rng::GameRng;
pub use config::{ConfigError, GameConfig, DEFAULT_POINTS_TO_WIN, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{ChancellorChoice, PlayRecord};
