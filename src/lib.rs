//! # billet-doux
//!
//! A rules engine for the Chancellor edition of the letter-courting
//! card game: ten card kinds, 21-card deck, 2-6 players, rounds scored
//! until one seat reaches the win target.
//!
//! ## Design Principles
//!
//! 1. **Engine, Not Table**: This crate owns the rules. Lobbies,
//!    sessions and per-recipient hand redaction belong to the transport
//!    layer around it.
//!
//! 2. **Validate, Then Mutate**: Every rejected call leaves the state
//!    exactly as it was. There is no partially-applied play.
//!
//! 3. **Replayable**: All randomness flows through one seeded RNG.
//!    A seed plus the play sequence reproduces a whole match.
//!
//! ## Architecture
//!
//! - **Persistent Containers**: The append-heavy fields (discard pile,
//!   play log, spy set) use `im`, so state snapshots clone in O(1).
//!
//! - **Effects at the Seam**: Each card kind implements `CardEffect`;
//!   the engine owns turn order and scoring, effects own card rules.
//!
//! ## Modules
//!
//! - `core`: Card kinds, players, errors, RNG, configuration
//! - `deck`: The draw pile and its order conventions
//! - `effects`: The ten card behaviors
//! - `engine`: Match state and the engine driving it
//!
//! ## Example
//!
//! ```
//! use billet_doux::{CardKind, GameConfig, GameEngine, PlayRequest};
//!
//! let config = GameConfig::new("demo").with_players(["Ada", "Bela"]);
//! let mut engine = GameEngine::with_seed(&config, 7)?;
//!
//! engine.start_turn();
//! let me = engine.current_player_id();
//! let kind = engine.playable_kinds(me)[0];
//! let request = match kind {
//!     CardKind::Guard => {
//!         let target = engine.targetable_players(me)[0];
//!         PlayRequest::guessing(target, CardKind::Princess)
//!     }
//!     CardKind::Priest | CardKind::Baron | CardKind::Prince | CardKind::King => {
//!         PlayRequest::targeted(engine.targetable_players(me)[0])
//!     }
//!     _ => PlayRequest::simple(),
//! };
//! engine.play_card(me, kind, request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod deck;
pub mod effects;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardKind, ChancellorChoice, ConfigError, EngineError, GameConfig, GameRng,
    PlayRecord, Player, PlayerId, PlayerMap, DECK_SIZE,
};

pub use crate::deck::Deck;

pub use crate::effects::{CardEffect, PlayContext, PlayOutcome, Reveal};

pub use crate::engine::{GameEngine, GamePhase, GameState, PlayRequest, RoundSummary, TurnPhase};
