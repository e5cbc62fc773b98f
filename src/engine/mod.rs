//! Match state and the engine that drives it.
//!
//! - `GameState`: complete, serializable match state
//! - `GameEngine`: dealing, turn flow, play dispatch, scoring
//! - `PlayRequest`: payload of one play
//! - `GamePhase` / `TurnPhase`: lifecycle tracking

mod engine;
mod state;

pub use engine::{GameEngine, PlayRequest};
pub use state::{GamePhase, GameState, RoundSummary, TurnPhase};
