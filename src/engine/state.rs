//! Authoritative match state.
//!
//! ## GameState
//!
//! One `GameState` per match, exclusively owned by its `GameEngine`.
//! External consumers only ever receive clones; the append-heavy fields
//! (discard pile, play log, spy set) use `im` persistent containers so
//! those clones share structure instead of copying.
//!
//! ## Phases
//!
//! `GamePhase` tracks the match lifecycle. A round in progress is
//! `RoundActive` with a `TurnPhase` inside it; the match is terminal
//! once `GameEnded` is reached. Round end itself is never observable
//! from outside: scoring either ends the match or deals the next round
//! within the same engine call.

use im::{HashSet as ImHashSet, Vector};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardKind, GameConfig, PlayRecord, Player, PlayerId, PlayerMap};
use crate::deck::Deck;

/// Where within a turn the round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player to play a card.
    AwaitingPlay,
    /// A Chancellor play awaits its resolution; the turn does not
    /// advance until it arrives.
    ChancellorPending,
}

/// Match lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// A round is running.
    RoundActive(TurnPhase),
    /// The win target was reached. Terminal.
    GameEnded,
}

impl GamePhase {
    /// Has the match ended?
    #[must_use]
    pub const fn is_ended(self) -> bool {
        matches!(self, GamePhase::GameEnded)
    }

    /// Is a Chancellor action awaiting resolution?
    #[must_use]
    pub const fn chancellor_pending(self) -> bool {
        matches!(self, GamePhase::RoundActive(TurnPhase::ChancellorPending))
    }
}

/// Complete match state.
///
/// Fields are public: the struct doubles as the snapshot type handed to
/// the transport layer, which redacts other players' hands per
/// recipient before sending anything on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // === Identity & configuration ===
    /// Match label from the lobby.
    pub name: String,

    /// Seats the match was created for.
    pub max_players: u8,

    /// Points a player needs to win the match.
    pub points_to_win: u32,

    // === Seats ===
    /// All players, fixed once the match starts.
    pub players: PlayerMap<Player>,

    // === Round material ===
    /// Face-down draw pile.
    pub deck: Deck,

    /// Face-up discard pile, append-only within a round.
    pub discard: Vector<Card>,

    /// The card set aside face-down at round start. Consumed only by a
    /// Prince replacement draw on an empty deck.
    pub hidden_card: Option<Card>,

    /// Drawn pool of a pending Chancellor action (0-3 cards).
    pub chancellor_pool: SmallVec<[Card; 3]>,

    // === Turn & phase ===
    /// Seat index whose turn it is.
    pub current_player_index: usize,

    /// Lifecycle phase.
    pub phase: GamePhase,

    /// 1-based round counter.
    pub current_round: u32,

    // === Scoring ===
    /// Winners of the most recently completed round (tie-aware; every
    /// max-value holder scored). Empty until a round completes.
    pub round_winners: Vec<PlayerId>,

    /// Match winners. Non-empty exactly when the match has ended.
    pub game_winners: Vec<PlayerId>,

    /// Seats that played a Spy this round.
    pub played_spies: ImHashSet<PlayerId>,

    // === History ===
    /// Append-only log of resolved plays for the whole match.
    pub actions: Vector<PlayRecord>,
}

impl GameState {
    /// Build the pre-deal state for a validated configuration.
    ///
    /// The engine deals the first round immediately afterwards;
    /// `current_round` is 0 until then.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let players = PlayerMap::new(config.player_count(), |id| {
            Player::new(id, config.player_names[id.index()].clone())
        });

        Self {
            name: config.name.clone(),
            max_players: config.max_players,
            points_to_win: config.points_to_win,
            players,
            deck: Deck::default(),
            discard: Vector::new(),
            hidden_card: None,
            chancellor_pool: SmallVec::new(),
            current_player_index: 0,
            phase: GamePhase::RoundActive(TurnPhase::AwaitingPlay),
            current_round: 0,
            round_winners: Vec::new(),
            game_winners: Vec::new(),
            played_spies: ImHashSet::new(),
            actions: Vector::new(),
        }
    }

    // === Seat queries ===

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        PlayerId::new(self.current_player_index as u8)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        self.players.get(self.current_player_id())
    }

    /// Players still in the round.
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().map(|(_, p)| p).filter(|p| p.is_active())
    }

    /// How many players are still in the round.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// Is a Chancellor action awaiting resolution?
    #[must_use]
    pub fn chancellor_pending(&self) -> bool {
        self.phase.chancellor_pending()
    }

    /// Has the match ended?
    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.phase.is_ended()
    }

    // === Transport-facing queries ===

    /// Seats `actor` may target: active, unprotected, and not `actor`
    /// itself. Self-targeting (Prince) stays legal at the engine level;
    /// this is the list a client UI offers.
    #[must_use]
    pub fn targetable_players(&self, actor: PlayerId) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(id, p)| *id != actor && p.is_active() && !p.protected)
            .map(|(id, _)| id)
            .collect()
    }

    /// Card kinds the player may legally play, after the forced-Countess
    /// rule. Duplicates appear twice, mirroring the hand.
    #[must_use]
    pub fn playable_kinds(&self, player: PlayerId) -> SmallVec<[CardKind; 2]> {
        match self.players.try_get(player) {
            Some(p) if p.must_play_countess() => p
                .hand
                .iter()
                .filter(|c| c.kind == CardKind::Countess)
                .map(|c| c.kind)
                .collect(),
            Some(p) => p.hand.iter().map(|c| c.kind).collect(),
            None => SmallVec::new(),
        }
    }

    /// Is this seat allowed to act right now?
    #[must_use]
    pub fn can_act(&self, player: PlayerId) -> bool {
        !self.is_ended()
            && self.current_player_index < self.player_count()
            && self.current_player_id() == player
            && self.current_player().is_active()
    }

    /// Does the forced-Countess rule bind this seat's next play?
    #[must_use]
    pub fn must_play_countess(&self, player: PlayerId) -> bool {
        self.players
            .try_get(player)
            .is_some_and(Player::must_play_countess)
    }

    /// Cumulative points per seat.
    #[must_use]
    pub fn scores(&self) -> FxHashMap<PlayerId, u32> {
        self.players.iter().map(|(id, p)| (id, p.points)).collect()
    }

    /// Diagnostic digest of the round in progress.
    #[must_use]
    pub fn round_summary(&self) -> RoundSummary {
        let recent = self.actions.len().saturating_sub(5);
        RoundSummary {
            round: self.current_round,
            cards_in_deck: self.deck.len(),
            active_players: self
                .players
                .iter()
                .filter(|(_, p)| p.is_active())
                .map(|(id, _)| id)
                .collect(),
            scores: self.scores(),
            recent_actions: self.actions.iter().skip(recent).cloned().collect(),
        }
    }

    // === Constrained mutations ===
    //
    // Multi-step card moves live here so every call site keeps the
    // conservation invariant: cards only ever move between the deck,
    // hands, the discard pile, the hidden slot and the Chancellor pool.

    /// Move the first held card of `kind` from the hand to the discard
    /// pile. Returns the moved card, `None` if the hand has no such
    /// card.
    pub fn discard_played(&mut self, player: PlayerId, kind: CardKind) -> Option<Card> {
        let position = self.players[player].hand_position(kind)?;
        let card = self.players[player].hand.remove(position);
        self.discard.push_back(card);
        Some(card)
    }

    /// Move the player's whole hand to the discard pile, face up.
    pub fn discard_hand(&mut self, player: PlayerId) {
        let cards: SmallVec<[Card; 2]> = std::mem::take(&mut self.players[player].hand);
        for card in cards {
            self.discard.push_back(card);
        }
    }

    /// Knock a player out of the round.
    pub fn eliminate(&mut self, player: PlayerId) {
        let p = self.players.get_mut(player);
        p.eliminated = true;
        tracing::debug!(player = player.0, name = %p.name, "player eliminated");
    }

    /// Swap two players' hands in place.
    pub fn swap_hands(&mut self, a: PlayerId, b: PlayerId) {
        let hand_a = std::mem::take(&mut self.players[a].hand);
        let hand_b = std::mem::replace(&mut self.players[b].hand, hand_a);
        self.players[a].hand = hand_b;
    }

    /// Sequence number for the next play record.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.actions.len() as u32
    }

    // === Persistence ===

    /// Serialize to the compact binary form the transport layer stores
    /// between calls.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a state written by [`GameState::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    // === Audit ===

    /// Total cards across deck, discard, hands, hidden slot and the
    /// Chancellor pool. Equals the deck composition size at every
    /// externally-observable point of a round.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.discard.len()
            + self
                .players
                .iter()
                .map(|(_, p)| p.hand.len())
                .sum::<usize>()
            + usize::from(self.hidden_card.is_some())
            + self.chancellor_pool.len()
    }
}

/// Snapshot digest for logs and spectator panels: round number, deck
/// size, who is still in, scores, the last few plays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: u32,

    /// Cards left in the draw pile.
    pub cards_in_deck: usize,

    /// Seats still in the round.
    pub active_players: Vec<PlayerId>,

    /// Cumulative points per seat.
    pub scores: FxHashMap<PlayerId, u32>,

    /// Up to the last five plays.
    pub recent_actions: Vec<PlayRecord>,
}
