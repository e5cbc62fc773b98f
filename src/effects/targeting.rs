//! Target legality for the card kinds that aim at a seat.
//!
//! Targeted kinds follow one rule set: the target must exist, still be
//! in the round, and not sit behind Handmaid protection. Self-targeting
//! is legal here (Prince redirects to the actor when everyone else is
//! protected); client UIs narrow the offer through
//! `GameState::targetable_players`.

use crate::core::{EngineError, PlayerId};
use crate::engine::GameState;

use super::PlayContext;

/// Check one target against the current state.
pub fn validate_target(state: &GameState, target: PlayerId) -> Result<(), EngineError> {
    let player = state
        .players
        .try_get(target)
        .ok_or(EngineError::TargetNotFound(target))?;

    if player.eliminated {
        return Err(EngineError::TargetEliminated(target));
    }
    if player.protected {
        return Err(EngineError::TargetProtected(target));
    }

    Ok(())
}

/// Resolve the context's target, validating it when present.
///
/// `None` means the card was played without a target and resolves
/// without effect.
pub fn engaged_target(
    state: &GameState,
    ctx: &PlayContext,
) -> Result<Option<PlayerId>, EngineError> {
    match ctx.target {
        Some(target) => {
            validate_target(state, target)?;
            Ok(Some(target))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn state() -> GameState {
        GameState::new(&GameConfig::new("t").with_players(["Ada", "Bela", "Cleo"]))
    }

    fn ctx(actor: u8, target: Option<u8>) -> PlayContext {
        PlayContext {
            actor: PlayerId::new(actor),
            target: target.map(PlayerId::new),
            guess: None,
            chancellor: None,
        }
    }

    #[test]
    fn test_valid_target_passes() {
        let state = state();
        assert_eq!(validate_target(&state, PlayerId::new(1)), Ok(()));
        assert_eq!(
            engaged_target(&state, &ctx(0, Some(1))),
            Ok(Some(PlayerId::new(1)))
        );
    }

    #[test]
    fn test_missing_target_is_no_target() {
        let state = state();
        assert_eq!(engaged_target(&state, &ctx(0, None)), Ok(None));
    }

    #[test]
    fn test_unknown_seat_rejected() {
        let state = state();
        assert_eq!(
            validate_target(&state, PlayerId::new(7)),
            Err(EngineError::TargetNotFound(PlayerId::new(7)))
        );
    }

    #[test]
    fn test_eliminated_target_rejected() {
        let mut state = state();
        state.eliminate(PlayerId::new(2));
        assert_eq!(
            engaged_target(&state, &ctx(0, Some(2))),
            Err(EngineError::TargetEliminated(PlayerId::new(2)))
        );
    }

    #[test]
    fn test_protected_target_rejected() {
        let mut state = state();
        state.players[PlayerId::new(1)].protected = true;
        assert_eq!(
            engaged_target(&state, &ctx(0, Some(1))),
            Err(EngineError::TargetProtected(PlayerId::new(1)))
        );
    }
}
