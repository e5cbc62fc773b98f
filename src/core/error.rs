//! The engine's error taxonomy.
//!
//! Every variant is a local validation failure detected before any
//! state mutation for the rejected call. Nothing here is fatal to the
//! engine; the transport layer decides whether to re-prompt the client.

use serde::{Deserialize, Serialize};

use super::card::CardKind;
use super::player::PlayerId;

/// A rejected engine command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum EngineError {
    /// Acting player is not seated, or is already eliminated.
    #[error("acting player {0} not found or eliminated")]
    PlayerNotFound(PlayerId),

    /// Target id does not name a seat in this match.
    #[error("target player {0} not found")]
    TargetNotFound(PlayerId),

    /// Target is already out of the round.
    #[error("target player {0} is eliminated")]
    TargetEliminated(PlayerId),

    /// Target is under Handmaid protection.
    #[error("target player {0} is protected")]
    TargetProtected(PlayerId),

    /// Acting player does not hold the named card.
    #[error("{player} does not hold a {kind}")]
    MissingCard { player: PlayerId, kind: CardKind },

    /// Caller is not the current player, or the match is over.
    #[error("it is not {0}'s turn")]
    InvalidTurn(PlayerId),

    /// Forced-discard rule: the Countess must be played when held with
    /// the King or Prince.
    #[error("the Countess must be played while holding the King or Prince")]
    MustPlayCountess,

    /// Chancellor resolution data arrived with no pending Chancellor play.
    #[error("no Chancellor action is in progress")]
    ChancellorActionNotInProgress,

    /// Chancellor selected/top index missing or out of range.
    #[error("Chancellor card index missing or out of range")]
    InvalidChancellorIndex,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::MissingCard {
            player: PlayerId::new(1),
            kind: CardKind::Baron,
        };
        assert_eq!(err.to_string(), "Player 1 does not hold a Baron");

        let err = EngineError::InvalidTurn(PlayerId::new(2));
        assert_eq!(err.to_string(), "it is not Player 2's turn");

        let err = EngineError::InvalidChancellorIndex;
        assert_eq!(err.to_string(), "Chancellor card index missing or out of range");
    }

    #[test]
    fn test_errors_compare() {
        assert_eq!(
            EngineError::TargetProtected(PlayerId::new(0)),
            EngineError::TargetProtected(PlayerId::new(0))
        );
        assert_ne!(
            EngineError::TargetProtected(PlayerId::new(0)),
            EngineError::TargetEliminated(PlayerId::new(0))
        );
    }
}
