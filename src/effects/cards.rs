//! The ten card behaviors and their dispatch table.
//!
//! Every effect discards the played card first, then applies what the
//! card does. Targeted kinds resolve without effect when no target was
//! supplied; that is the legal way to play them when every opponent is
//! protected.

use smallvec::SmallVec;

use crate::core::{Card, CardKind, ChancellorChoice, EngineError};
use crate::engine::{GamePhase, GameState, TurnPhase};

use super::effect::{discard_played, CardEffect, PlayContext, PlayOutcome};
use super::targeting::engaged_target;

/// Spy: no immediate effect; playing one enters the actor into the
/// end-of-round spy bonus.
pub struct SpyEffect;

impl CardEffect for SpyEffect {
    fn kind(&self) -> CardKind {
        CardKind::Spy
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        discard_played(state, ctx.actor, CardKind::Spy)?;
        state.played_spies.insert(ctx.actor);
        Ok(PlayOutcome::resolved())
    }
}

/// Guard: name a kind other than Guard; a correct guess knocks the
/// target out.
pub struct GuardEffect;

impl CardEffect for GuardEffect {
    fn kind(&self) -> CardKind {
        CardKind::Guard
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        // the guess engages only together with a target
        let engaged = match (ctx.target, ctx.guess) {
            (Some(_), Some(guess)) => engaged_target(state, ctx)?.map(|t| (t, guess)),
            _ => None,
        };

        discard_played(state, ctx.actor, CardKind::Guard)?;

        let Some((target, guess)) = engaged else {
            return Ok(PlayOutcome::resolved());
        };

        let hit = guess != CardKind::Guard
            && state.players[target]
                .held_card()
                .is_some_and(|card| card.kind == guess);

        if hit {
            state.eliminate(target);
            state.discard_hand(target);
        }

        Ok(PlayOutcome::guard(hit))
    }
}

/// Priest: privately look at the target's hand.
pub struct PriestEffect;

impl CardEffect for PriestEffect {
    fn kind(&self) -> CardKind {
        CardKind::Priest
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        let engaged = engaged_target(state, ctx)?;

        discard_played(state, ctx.actor, CardKind::Priest)?;

        if let Some(target) = engaged {
            if let Some(card) = state.players[target].held_card() {
                return Ok(PlayOutcome::reveal(target, card));
            }
        }

        Ok(PlayOutcome::resolved())
    }
}

/// Baron: compare hands; the strictly lower card is out. Ties do
/// nothing.
pub struct BaronEffect;

impl CardEffect for BaronEffect {
    fn kind(&self) -> CardKind {
        CardKind::Baron
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        let engaged = engaged_target(state, ctx)?;

        discard_played(state, ctx.actor, CardKind::Baron)?;

        if let Some(target) = engaged {
            let mine = state.players[ctx.actor].held_card().map(|c| c.value());
            let theirs = state.players[target].held_card().map(|c| c.value());

            let loser = match mine.cmp(&theirs) {
                std::cmp::Ordering::Less => Some(ctx.actor),
                std::cmp::Ordering::Greater => Some(target),
                std::cmp::Ordering::Equal => None,
            };

            if let Some(loser) = loser {
                state.eliminate(loser);
                state.discard_hand(loser);
            }
        }

        Ok(PlayOutcome::resolved())
    }
}

/// Handmaid: protection from other players' effects until the actor's
/// own next turn begins.
pub struct HandmaidEffect;

impl CardEffect for HandmaidEffect {
    fn kind(&self) -> CardKind {
        CardKind::Handmaid
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        discard_played(state, ctx.actor, CardKind::Handmaid)?;
        state.players[ctx.actor].protected = true;
        Ok(PlayOutcome::resolved())
    }
}

/// Prince: the target (the actor included) discards their hand and
/// draws a replacement.
pub struct PrinceEffect;

impl CardEffect for PrinceEffect {
    fn kind(&self) -> CardKind {
        CardKind::Prince
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        let engaged = engaged_target(state, ctx)?;

        discard_played(state, ctx.actor, CardKind::Prince)?;

        if let Some(target) = engaged {
            if let Some(discarded) = state.players[target].hand.pop() {
                state.discard.push_back(discarded);

                if discarded.kind == CardKind::Princess {
                    // discarding the Princess, even forced, is fatal
                    state.eliminate(target);
                } else if let Some(replacement) = state.deck.draw() {
                    state.players[target].hand.push(replacement);
                } else if let Some(hidden) = state.hidden_card.take() {
                    state.players[target].hand.push(hidden);
                }
            }
        }

        Ok(PlayOutcome::resolved())
    }
}

/// Chancellor: draw two, keep one of three, return the rest to the
/// bottom of the deck. Runs in two phases.
pub struct ChancellorEffect;

impl ChancellorEffect {
    /// Phase 1: discard the Chancellor and draw the choice pool. With
    /// an empty deck the play is a bare discard and the turn ends
    /// normally.
    fn begin(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        discard_played(state, ctx.actor, CardKind::Chancellor)?;

        if state.deck.is_empty() {
            return Ok(PlayOutcome::resolved());
        }

        state.phase = GamePhase::RoundActive(TurnPhase::ChancellorPending);

        // pool order: drawn cards first, the held card last
        let held: SmallVec<[Card; 2]> = std::mem::take(&mut state.players[ctx.actor].hand);
        for _ in 0..2 {
            if let Some(card) = state.deck.draw() {
                state.chancellor_pool.push(card);
            }
        }
        state.chancellor_pool.extend(held);

        tracing::debug!(
            actor = ctx.actor.0,
            pool = state.chancellor_pool.len(),
            "chancellor action opened"
        );

        Ok(PlayOutcome::pending())
    }

    /// Phase 2: keep the selected card, return the rest.
    ///
    /// With two cards going back, `top` names which of them ends
    /// bottom-most in the deck (drawn last); it must be 0 or 1. All
    /// checks run before the first mutation.
    fn conclude(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
        choice: ChancellorChoice,
    ) -> Result<PlayOutcome, EngineError> {
        if !state.chancellor_pending() {
            return Err(EngineError::ChancellorActionNotInProgress);
        }

        let pool_len = state.chancellor_pool.len();
        if choice.selected >= pool_len {
            return Err(EngineError::InvalidChancellorIndex);
        }
        if pool_len == 3 && !matches!(choice.top, Some(0 | 1)) {
            return Err(EngineError::InvalidChancellorIndex);
        }

        let pool: SmallVec<[Card; 3]> = std::mem::take(&mut state.chancellor_pool);
        let kept = pool[choice.selected];
        state.players[ctx.actor].hand.push(kept);

        let remaining: SmallVec<[Card; 2]> = pool
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| i != choice.selected)
            .map(|(_, card)| card)
            .collect();

        match (remaining.as_slice(), choice.top) {
            ([card], _) => state.deck.return_to_bottom(*card),
            ([a, b], Some(top)) => {
                let (bottom, above) = if top == 0 { (*a, *b) } else { (*b, *a) };
                state.deck.return_to_bottom(above);
                state.deck.return_to_bottom(bottom);
            }
            _ => {}
        }

        state.phase = GamePhase::RoundActive(TurnPhase::AwaitingPlay);

        tracing::debug!(
            actor = ctx.actor.0,
            kept = %kept,
            returned = remaining.len(),
            "chancellor action concluded"
        );

        Ok(PlayOutcome::resolved())
    }
}

impl CardEffect for ChancellorEffect {
    fn kind(&self) -> CardKind {
        CardKind::Chancellor
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        match ctx.chancellor {
            None => self.begin(state, ctx),
            Some(choice) => self.conclude(state, ctx, choice),
        }
    }
}

/// King: trade hands with the target.
pub struct KingEffect;

impl CardEffect for KingEffect {
    fn kind(&self) -> CardKind {
        CardKind::King
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        let engaged = engaged_target(state, ctx)?;

        discard_played(state, ctx.actor, CardKind::King)?;

        if let Some(target) = engaged {
            state.swap_hands(ctx.actor, target);
        }

        Ok(PlayOutcome::resolved())
    }
}

/// Countess: no effect. Holding her with King or Prince forces the
/// play; the engine enforces that before dispatch.
pub struct CountessEffect;

impl CardEffect for CountessEffect {
    fn kind(&self) -> CardKind {
        CardKind::Countess
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        discard_played(state, ctx.actor, CardKind::Countess)?;
        Ok(PlayOutcome::resolved())
    }
}

/// Princess: playing her eliminates the actor. The rest of the hand
/// stays where it is.
pub struct PrincessEffect;

impl CardEffect for PrincessEffect {
    fn kind(&self) -> CardKind {
        CardKind::Princess
    }

    fn resolve(
        &self,
        state: &mut GameState,
        ctx: &PlayContext,
    ) -> Result<PlayOutcome, EngineError> {
        discard_played(state, ctx.actor, CardKind::Princess)?;
        state.eliminate(ctx.actor);
        Ok(PlayOutcome::resolved())
    }
}

/// Look up the behavior for a card kind.
#[must_use]
pub fn effect_for(kind: CardKind) -> &'static dyn CardEffect {
    match kind {
        CardKind::Spy => &SpyEffect,
        CardKind::Guard => &GuardEffect,
        CardKind::Priest => &PriestEffect,
        CardKind::Baron => &BaronEffect,
        CardKind::Handmaid => &HandmaidEffect,
        CardKind::Prince => &PrinceEffect,
        CardKind::Chancellor => &ChancellorEffect,
        CardKind::King => &KingEffect,
        CardKind::Countess => &CountessEffect,
        CardKind::Princess => &PrincessEffect,
    }
}
