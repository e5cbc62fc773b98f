//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe seat index. Seats are fixed once the match starts; the
//! transport layer owns any mapping from session ids to seats.
//!
//! ## Player
//!
//! Everything the game tracks about one seat: hand, elimination and
//! protection flags, cumulative points.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

use super::card::{Card, CardKind};

/// Seat index identifying a player.
///
/// Indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a match with `player_count` seats.
    ///
    /// ```
    /// use billet_doux::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(0));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One seat's state.
///
/// The hand is ordered and normally holds 1 card (2 during the owner's
/// turn, transiently 0 while a Chancellor action is pending).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat this player occupies.
    pub id: PlayerId,

    /// Display name, supplied at match creation.
    pub name: String,

    /// Cards currently held.
    pub hand: SmallVec<[Card; 2]>,

    /// Out of the current round.
    pub eliminated: bool,

    /// Handmaid protection, until this player's own next turn begins.
    pub protected: bool,

    /// Cumulative points across rounds.
    pub points: u32,
}

impl Player {
    /// Create a seated player with an empty hand.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: SmallVec::new(),
            eliminated: false,
            protected: false,
            points: 0,
        }
    }

    /// Still in the current round.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.eliminated
    }

    /// Does the hand contain a card of this kind?
    #[must_use]
    pub fn holds(&self, kind: CardKind) -> bool {
        self.hand.iter().any(|c| c.kind == kind)
    }

    /// Position of the first card of this kind in the hand.
    #[must_use]
    pub fn hand_position(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.kind == kind)
    }

    /// The held card, for players outside their own turn (hand size 1).
    ///
    /// Returns the first card when the hand holds more than one.
    #[must_use]
    pub fn held_card(&self) -> Option<Card> {
        self.hand.first().copied()
    }

    /// Forced-discard rule: Countess held together with King or Prince.
    #[must_use]
    pub fn must_play_countess(&self) -> bool {
        self.holds(CardKind::Countess)
            && (self.holds(CardKind::King) || self.holds(CardKind::Prince))
    }
}

/// Per-seat data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per seat.
///
/// ## Example
///
/// ```
/// use billet_doux::core::{PlayerId, PlayerMap};
///
/// let mut points: PlayerMap<u32> = PlayerMap::new(4, |_| 0);
/// points[PlayerId::new(1)] = 3;
/// assert_eq!(points[PlayerId::new(1)], 3);
/// assert_eq!(points[PlayerId::new(0)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each seat.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data. Panics on an out-of-range seat.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a seat's data. Panics on an out-of-range seat.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Get a reference to a seat's data, `None` for an unknown seat.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a seat's data, `None` for an unknown seat.
    pub fn try_get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all seat IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
