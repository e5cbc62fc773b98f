//! Card behavior seam.
//!
//! Each card kind implements `CardEffect`. An effect receives the
//! acting seat and the request payload, checks everything it needs
//! against the current state, and only then mutates: a rejected play
//! returns its error before the first state change.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardKind, ChancellorChoice, EngineError, PlayerId};
use crate::engine::GameState;

/// A play as the effects see it: the acting seat plus the payload the
/// transport collected from that player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayContext {
    /// Seat playing the card.
    pub actor: PlayerId,

    /// Targeted seat, for kinds that take one.
    pub target: Option<PlayerId>,

    /// Guessed kind, for Guard plays.
    pub guess: Option<CardKind>,

    /// Chancellor resolution payload. Present exactly when this call
    /// concludes a pending Chancellor action.
    pub chancellor: Option<ChancellorChoice>,
}

/// A card privately shown to the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    /// Whose card was shown.
    pub target: PlayerId,

    /// The card itself.
    pub card: Card,
}

/// What a resolved play reports back to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    /// Private information for the actor (Priest).
    pub revealed: Option<Reveal>,

    /// The play opened a Chancellor action; the turn must not advance
    /// until its resolution arrives.
    pub chancellor_pending: bool,

    /// Guard verdict: `Some(true)` on a hit, `Some(false)` on a miss,
    /// `None` for every other card.
    pub guard_hit: Option<bool>,
}

impl PlayOutcome {
    /// A play that fully resolved with nothing to report.
    #[must_use]
    pub const fn resolved() -> Self {
        Self {
            revealed: None,
            chancellor_pending: false,
            guard_hit: None,
        }
    }

    /// A play that left a Chancellor action pending.
    #[must_use]
    pub const fn pending() -> Self {
        Self {
            revealed: None,
            chancellor_pending: true,
            guard_hit: None,
        }
    }

    /// A play that revealed a card to the actor.
    #[must_use]
    pub const fn reveal(target: PlayerId, card: Card) -> Self {
        Self {
            revealed: Some(Reveal { target, card }),
            chancellor_pending: false,
            guard_hit: None,
        }
    }

    /// A Guard play with a verdict.
    #[must_use]
    pub const fn guard(hit: bool) -> Self {
        Self {
            revealed: None,
            chancellor_pending: false,
            guard_hit: Some(hit),
        }
    }
}

/// Behavior of one card kind.
///
/// The engine performs the turn-order, hand and forced-Countess checks
/// before dispatching here; effects own the checks specific to their
/// card (target legality, Chancellor phase rules).
///
/// ## Implementation Notes
///
/// - Validate before mutating: an `Err` return must leave the state
///   untouched.
/// - Discarding the played card is the first mutation.
/// - Targeted kinds treat a missing target as a play without effect,
///   not an error. That is how a card is played when every opponent
///   is protected.
pub trait CardEffect {
    /// Card kind this effect belongs to.
    fn kind(&self) -> CardKind;

    /// Validate and apply the play.
    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError>;
}

/// Move the played card from the hand to the discard pile.
///
/// The first mutation of every effect.
pub(super) fn discard_played(
    state: &mut GameState,
    actor: PlayerId,
    kind: CardKind,
) -> Result<Card, EngineError> {
    state
        .discard_played(actor, kind)
        .ok_or(EngineError::MissingCard {
            player: actor,
            kind,
        })
}
