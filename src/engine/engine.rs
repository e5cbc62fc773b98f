//! The rules engine: dealing, turn flow, play dispatch, scoring.
//!
//! One `GameEngine` drives one match from creation to a filled
//! `game_winners`. The transport layer calls `start_turn` before each
//! turn and `play_card` for every play a client submits; everything
//! else (turn advancement, round scoring, dealing the next round) is
//! internal.
//!
//! ## Validation order
//!
//! `play_card` rejects in a fixed order, all before the first state
//! change: unknown or eliminated actor, wrong turn, card not in hand,
//! forced Countess. A pending Chancellor resolution skips the last two
//! because the actor's hand is empty while the action pends.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    CardKind, ChancellorChoice, ConfigError, EngineError, GameConfig, GameRng, PlayRecord,
    Player, PlayerId,
};
use crate::deck::Deck;
use crate::effects::{effect_for, PlayContext, PlayOutcome};

use super::state::{GamePhase, GameState, RoundSummary, TurnPhase};

/// Payload of one `play_card` call, beyond actor and card kind.
///
/// Unused fields stay `None`: a Handmaid play is `PlayRequest::simple()`,
/// a Guard play `PlayRequest::guessing(target, kind)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    /// Targeted seat, for kinds that take one.
    pub target: Option<PlayerId>,

    /// Guessed kind, for Guard plays.
    pub guess: Option<CardKind>,

    /// Resolution of a pending Chancellor action.
    pub chancellor: Option<ChancellorChoice>,
}

impl PlayRequest {
    /// A play with no target, guess or resolution data.
    #[must_use]
    pub const fn simple() -> Self {
        Self {
            target: None,
            guess: None,
            chancellor: None,
        }
    }

    /// A play aimed at a seat.
    #[must_use]
    pub const fn targeted(target: PlayerId) -> Self {
        Self {
            target: Some(target),
            guess: None,
            chancellor: None,
        }
    }

    /// A Guard play: target plus guessed kind.
    #[must_use]
    pub const fn guessing(target: PlayerId, guess: CardKind) -> Self {
        Self {
            target: Some(target),
            guess: Some(guess),
            chancellor: None,
        }
    }

    /// The second half of a Chancellor play.
    #[must_use]
    pub const fn chancellor(choice: ChancellorChoice) -> Self {
        Self {
            target: None,
            guess: None,
            chancellor: Some(choice),
        }
    }
}

/// Drives one match.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    rng: GameRng,
}

impl GameEngine {
    /// Create a match and deal the first round, seeding from OS
    /// entropy.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::build(config, GameRng::from_entropy())
    }

    /// Create a match with a fixed seed. The whole match replays
    /// identically from the same seed and play sequence.
    pub fn with_seed(config: &GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, GameRng::new(seed))
    }

    fn build(config: &GameConfig, mut rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut state = GameState::new(config);
        Self::deal_round(&mut state, &mut rng);

        tracing::info!(
            name = %state.name,
            players = state.player_count(),
            seed = rng.seed(),
            "match created"
        );

        Ok(Self { state, rng })
    }

    /// Resume a match from a stored state.
    ///
    /// The seed only feeds future deals; the restored round's cards are
    /// already laid out in `state`.
    #[must_use]
    pub fn from_state(state: GameState, seed: u64) -> Self {
        Self {
            state,
            rng: GameRng::new(seed),
        }
    }

    /// Build the next round's material in place: fresh shuffled deck,
    /// hidden card set aside, one card per seat, flags and piles reset.
    fn deal_round(state: &mut GameState, rng: &mut GameRng) {
        let mut deck = Deck::standard(rng);
        state.hidden_card = deck.draw_random(rng);

        for (_, player) in state.players.iter_mut() {
            player.hand.clear();
            player.eliminated = false;
            player.protected = false;
            if let Some(card) = deck.draw() {
                player.hand.push(card);
            }
        }

        state.deck = deck;
        state.discard = Vector::new();
        state.chancellor_pool.clear();
        state.played_spies = ImHashSet::new();
        state.phase = GamePhase::RoundActive(TurnPhase::AwaitingPlay);
        state.current_round += 1;
    }

    // === Turn flow ===

    /// Open the current player's turn: clear their protection and deal
    /// them their second card.
    ///
    /// No-op when the match is over, a Chancellor action pends, or the
    /// turn has already been opened. An empty deck ends the round
    /// instead of drawing. Eliminated seats are skipped.
    pub fn start_turn(&mut self) {
        if self.state.is_ended() || self.state.chancellor_pending() {
            return;
        }
        if self.state.current_player().hand.len() >= 2 {
            return;
        }

        let player_count = self.state.player_count();
        for _ in 0..player_count {
            if self.state.current_player().is_active() {
                break;
            }
            self.state.current_player_index =
                (self.state.current_player_index + 1) % player_count;
        }
        if !self.state.current_player().is_active() {
            self.check_end_of_round();
            return;
        }

        if self.state.deck.is_empty() {
            self.check_end_of_round();
            return;
        }

        let current = self.state.current_player_id();
        self.state.players[current].protected = false;
        if let Some(card) = self.state.deck.draw() {
            self.state.players[current].hand.push(card);
        }

        tracing::debug!(
            player = current.0,
            round = self.state.current_round,
            "turn started"
        );
    }

    /// Play a card for `player`.
    ///
    /// On success the play is logged, the turn advances (unless a
    /// Chancellor action was opened) and round scoring runs if the play
    /// ended the round. On error nothing changed.
    pub fn play_card(
        &mut self,
        player: PlayerId,
        kind: CardKind,
        request: PlayRequest,
    ) -> Result<PlayOutcome, EngineError> {
        let actor = self
            .state
            .players
            .try_get(player)
            .ok_or(EngineError::PlayerNotFound(player))?;
        if actor.eliminated {
            return Err(EngineError::PlayerNotFound(player));
        }

        if self.state.is_ended() || self.state.current_player_id() != player {
            return Err(EngineError::InvalidTurn(player));
        }

        let resolving_chancellor = self.state.chancellor_pending()
            && kind == CardKind::Chancellor
            && request.chancellor.is_some();

        if !resolving_chancellor {
            // while a Chancellor action pends the hand is empty, so
            // this also rejects any other play attempt
            if !self.state.players[player].holds(kind) {
                return Err(EngineError::MissingCard { player, kind });
            }
            if kind != CardKind::Countess && self.state.players[player].must_play_countess() {
                return Err(EngineError::MustPlayCountess);
            }
        }

        let ctx = PlayContext {
            actor: player,
            target: request.target,
            guess: request.guess,
            chancellor: request.chancellor,
        };
        let outcome = effect_for(kind).resolve(&mut self.state, &ctx)?;

        let record = PlayRecord::new(
            self.state.next_sequence(),
            player,
            kind,
            request.target,
            request.guess,
            outcome.guard_hit,
        );
        self.state.actions.push_back(record);

        tracing::info!(
            player = player.0,
            card = %kind,
            target = ?request.target,
            round = self.state.current_round,
            "card played"
        );

        self.finish_turn();
        self.check_end_of_round();

        Ok(outcome)
    }

    /// Advance the turn to the next seat still in the round.
    ///
    /// Holds still while a Chancellor action pends. When one or no
    /// seats remain the index stays put and scoring takes over.
    fn finish_turn(&mut self) {
        if self.state.chancellor_pending() {
            return;
        }

        let player_count = self.state.player_count();
        let start = self.state.current_player_index;
        let mut next = start;
        loop {
            next = (next + 1) % player_count;
            if next == start || self.state.players[PlayerId::new(next as u8)].is_active() {
                break;
            }
        }

        if self.state.active_count() <= 1 {
            return;
        }

        self.state.current_player_index = next;
        // the landed seat's turn is beginning; Handmaid cover ends
        self.state.players[PlayerId::new(next as u8)].protected = false;
    }

    /// Score the round if it is over: active hands compared, points
    /// awarded, then either the match ends or the next round is dealt.
    fn check_end_of_round(&mut self) {
        if self.state.is_ended() || self.state.chancellor_pending() {
            return;
        }

        let active: Vec<PlayerId> = self
            .state
            .players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect();

        let round_over = active.len() <= 1
            || (self.state.deck.is_empty()
                && active
                    .iter()
                    .all(|id| self.state.players[*id].hand.len() == 1));
        if !round_over {
            return;
        }

        self.settle_round(&active);
    }

    fn settle_round(&mut self, active: &[PlayerId]) {
        // spy bonus: exactly one surviving seat that played a Spy
        let spies: SmallVec<[PlayerId; 2]> = active
            .iter()
            .copied()
            .filter(|id| self.state.played_spies.contains(id))
            .collect();
        if let [spy] = spies.as_slice() {
            self.state.players[*spy].points += 1;
            tracing::info!(player = spy.0, "spy bonus awarded");
        }

        // every holder of the highest card wins the round
        let winners: Vec<PlayerId> = if active.len() == 1 {
            active.to_vec()
        } else {
            let best = active
                .iter()
                .filter_map(|id| self.state.players[*id].held_card())
                .map(|card| card.value())
                .max();
            active
                .iter()
                .copied()
                .filter(|id| {
                    self.state.players[*id]
                        .held_card()
                        .map(|card| card.value())
                        == best
                })
                .collect()
        };

        for id in &winners {
            self.state.players[*id].points += 1;
        }
        tracing::info!(
            round = self.state.current_round,
            winners = ?winners,
            "round ended"
        );
        self.state.round_winners = winners;

        let game_winners: Vec<PlayerId> = self
            .state
            .players
            .iter()
            .filter(|(_, p)| p.points >= self.state.points_to_win)
            .map(|(id, _)| id)
            .collect();

        if game_winners.is_empty() {
            self.start_new_round();
        } else {
            tracing::info!(winners = ?game_winners, "match ended");
            self.state.game_winners = game_winners;
            self.state.phase = GamePhase::GameEnded;
        }
    }

    /// Deal the next round and hand the first turn to the next seat
    /// round-robin.
    fn start_new_round(&mut self) {
        Self::deal_round(&mut self.state, &mut self.rng);
        self.state.current_player_index =
            (self.state.current_player_index + 1) % self.state.player_count();

        tracing::info!(
            round = self.state.current_round,
            starter = self.state.current_player_index,
            "new round dealt"
        );
    }

    // === Queries ===

    /// Borrow the live state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Clone the full state for the transport layer to redact and send.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Seed this match was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// One seat's state, `None` for an unknown seat.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.players.try_get(id)
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.state.current_player_id()
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    /// Seats `actor` may aim a card at.
    #[must_use]
    pub fn targetable_players(&self, actor: PlayerId) -> Vec<PlayerId> {
        self.state.targetable_players(actor)
    }

    /// Kinds the seat may legally play right now.
    #[must_use]
    pub fn playable_kinds(&self, player: PlayerId) -> SmallVec<[CardKind; 2]> {
        self.state.playable_kinds(player)
    }

    /// Is this seat allowed to act right now?
    #[must_use]
    pub fn can_act(&self, player: PlayerId) -> bool {
        self.state.can_act(player)
    }

    /// Does the forced-discard rule pin this seat to the Countess?
    #[must_use]
    pub fn must_play_countess(&self, player: PlayerId) -> bool {
        self.state.must_play_countess(player)
    }

    /// Cumulative points per seat.
    #[must_use]
    pub fn scores(&self) -> rustc_hash::FxHashMap<PlayerId, u32> {
        self.state.scores()
    }

    /// Digest of the round in progress.
    #[must_use]
    pub fn round_summary(&self) -> RoundSummary {
        self.state.round_summary()
    }
}
